use crate::{Point, Wall};
use ordered_float::OrderedFloat;

/// Endpoints closer than this are the same topological point (meters).
pub const MERGE_EPSILON: f64 = 0.05;

/// Node in the merged wall graph.
#[derive(Debug, Clone)]
pub(crate) struct GraphNode {
    pub position: Point,
    /// Neighbor node indices. Duplicate-free; sorted ascending by
    /// outgoing edge angle once the graph is built.
    pub neighbors: Vec<usize>,
}

/// Topological graph induced by a wall list, together with the
/// wall-to-node-pair table used to recover wall identities after
/// face tracing.
#[derive(Debug, Clone)]
pub(crate) struct WallGraph {
    pub nodes: Vec<GraphNode>,
    /// Node pair for each input wall, in wall input order. Degenerate
    /// walls map both entries to the same node.
    pub wall_nodes: Vec<(usize, usize)>,
}

/// Build the wall graph: merge near-coincident endpoints into unique
/// nodes, add symmetric adjacency, and sort every neighbor list by
/// angle so the face tracer can apply its turn rule.
pub(crate) fn build_graph(walls: &[Wall]) -> WallGraph {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut wall_nodes: Vec<(usize, usize)> = Vec::with_capacity(walls.len());

    for wall in walls {
        let a = find_or_create_node(&mut nodes, wall.start);
        let b = find_or_create_node(&mut nodes, wall.end);
        wall_nodes.push((a, b));

        // Zero-length walls keep their pair entry but never connect
        // anything, so they cannot appear on a face boundary.
        if a == b {
            continue;
        }

        // Multiple walls between the same node pair collapse to one
        // adjacency entry.
        if !nodes[a].neighbors.contains(&b) {
            nodes[a].neighbors.push(b);
            nodes[b].neighbors.push(a);
        }
    }

    let mut graph = WallGraph { nodes, wall_nodes };
    graph.sort_neighbors_by_angle();
    graph
}

/// Linear scan over existing nodes, first match wins. Which endpoints
/// coalesce therefore depends on wall processing order when three or
/// more endpoints sit within epsilon of each other.
fn find_or_create_node(nodes: &mut Vec<GraphNode>, position: Point) -> usize {
    for (index, node) in nodes.iter().enumerate() {
        if node.position.distance_to(&position) < MERGE_EPSILON {
            return index;
        }
    }
    nodes.push(GraphNode {
        position,
        neighbors: Vec::new(),
    });
    nodes.len() - 1
}

impl WallGraph {
    /// Sort every neighbor list ascending by the atan2 angle of the
    /// outgoing edge. Must run again if adjacency ever changes.
    fn sort_neighbors_by_angle(&mut self) {
        let positions: Vec<Point> = self.nodes.iter().map(|n| n.position).collect();
        for node in &mut self.nodes {
            let origin = node.position;
            node.neighbors.sort_by_key(|&neighbor| {
                let p = positions[neighbor];
                OrderedFloat((p.y - origin.y).atan2(p.x - origin.x))
            });
        }
    }
}
