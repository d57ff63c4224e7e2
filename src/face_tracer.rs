use crate::graph_builder::WallGraph;
use std::collections::HashSet;
use tracing::warn;

/// Hard cap on steps per trace. A walk that has not returned to its
/// starting directed edge by then is discarded as malformed.
pub const MAX_TRACE_STEPS: usize = 10_000;

/// Enumerate the faces of the graph by walking every unvisited directed
/// edge with the clockwise turn rule. Returned faces are closed: the
/// first node appears again at the end.
///
/// Each directed edge is marked as visited while it is walked, so it
/// feeds exactly one trace and total work is bounded by the directed
/// edge count.
pub(crate) fn trace_all_faces(graph: &WallGraph) -> Vec<Vec<usize>> {
    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut faces = Vec::new();

    for node in 0..graph.nodes.len() {
        for &neighbor in &graph.nodes[node].neighbors {
            if visited.contains(&(node, neighbor)) {
                continue;
            }
            if let Some(face) = trace_face(graph, node, neighbor, &mut visited) {
                faces.push(face);
            }
        }
    }

    faces
}

/// Walk from the directed edge `start_from -> start_to` until the same
/// directed edge comes around again. Dead ends without a continuation
/// abort the trace; so does the step cap.
fn trace_face(
    graph: &WallGraph,
    start_from: usize,
    start_to: usize,
    visited: &mut HashSet<(usize, usize)>,
) -> Option<Vec<usize>> {
    let mut face = vec![start_from];
    let mut prev = start_from;
    let mut current = start_to;

    for _ in 0..MAX_TRACE_STEPS {
        visited.insert((prev, current));
        face.push(current);

        let next = next_clockwise(graph, prev, current)?;
        prev = current;
        current = next;

        if prev == start_from && current == start_to {
            return Some(face);
        }
    }

    warn!(
        "face trace from edge ({}, {}) exceeded {} steps, discarding",
        start_from, start_to, MAX_TRACE_STEPS
    );
    None
}

/// Turn rule: arriving at `current` from `prev`, continue along the
/// sharpest clockwise turn. With neighbor lists sorted ascending by
/// angle that is the entry immediately after `prev`, wrapping around.
/// A single-neighbor node bounces the walk back the way it came.
///
/// Interior faces traced this way wind clockwise (negative shoelace
/// sum); the classifier's sign test depends on that, so this rule and
/// the accepted sign must only ever change together.
fn next_clockwise(graph: &WallGraph, prev: usize, current: usize) -> Option<usize> {
    let neighbors = &graph.nodes[current].neighbors;
    if neighbors.is_empty() {
        return None;
    }
    let incoming = neighbors.iter().position(|&n| n == prev)?;
    Some(neighbors[(incoming + 1) % neighbors.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder::build_graph;
    use crate::{Point, Wall};

    fn wall(id: &str, start: (f64, f64), end: (f64, f64)) -> Wall {
        Wall {
            id: id.to_string(),
            start: Point {
                x: start.0,
                y: start.1,
            },
            end: Point { x: end.0, y: end.1 },
        }
    }

    fn square_walls() -> Vec<Wall> {
        vec![
            wall("b", (0.0, 0.0), (1.0, 0.0)),
            wall("r", (1.0, 0.0), (1.0, 1.0)),
            wall("t", (1.0, 1.0), (0.0, 1.0)),
            wall("l", (0.0, 1.0), (0.0, 0.0)),
        ]
    }

    #[test]
    fn square_traces_interior_and_exterior() {
        let graph = build_graph(&square_walls());

        let faces = trace_all_faces(&graph);

        // One bounded face and the unbounded exterior.
        assert_eq!(faces.len(), 2);
        for face in &faces {
            assert_eq!(face.len(), 5);
            assert_eq!(face.first(), face.last());
        }
    }

    #[test]
    fn every_directed_edge_feeds_exactly_one_face() {
        let mut walls = square_walls();
        walls.push(wall("diag", (0.0, 0.0), (1.0, 1.0)));
        let graph = build_graph(&walls);

        let faces = trace_all_faces(&graph);

        let directed_edges: usize = graph.nodes.iter().map(|n| n.neighbors.len()).sum();
        let steps: usize = faces.iter().map(|f| f.len() - 1).sum();
        assert_eq!(steps, directed_edges);
        // Two triangles plus the exterior.
        assert_eq!(faces.len(), 3);
    }

    #[test]
    fn dead_end_wall_bounces_into_a_degenerate_face() {
        let graph = build_graph(&[wall("lonely", (0.0, 0.0), (1.0, 0.0))]);

        let faces = trace_all_faces(&graph);

        // Out and back along the same wall: a, b, a.
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 3);
        assert_eq!(faces[0][0], faces[0][2]);
    }

    #[test]
    fn isolated_node_produces_no_face() {
        let graph = build_graph(&[wall("dot", (0.0, 0.0), (0.0, 0.0))]);

        assert!(trace_all_faces(&graph).is_empty());
    }
}
