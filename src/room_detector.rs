use crate::graph_builder::WallGraph;
use crate::{Point, Room, Wall};
use geo::{Area, Coord, LineString, Polygon};
use ordered_float::OrderedFloat;
use std::collections::HashSet;
use tracing::debug;

/// Faces with less area than this are numerical noise, not rooms (m²).
pub const MIN_ROOM_AREA: f64 = 0.01;

/// Classify traced faces and build the final room list: trim the
/// closing duplicate, deduplicate cycles, keep the interior-wound
/// faces, recover contributing wall ids, and sort ascending by area.
pub(crate) fn build_rooms(graph: &WallGraph, walls: &[Wall], faces: Vec<Vec<usize>>) -> Vec<Room> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut rooms = Vec::new();

    for mut face in faces {
        if face.len() > 1 && face.first() == face.last() {
            face.pop();
        }
        if face.len() < 3 {
            continue;
        }
        if !seen.insert(canonical_key(&face)) {
            // Same cycle reached from another starting edge.
            continue;
        }

        let signed = signed_area(graph, &face);
        if signed >= 0.0 {
            // Counter-clockwise faces bound the unbounded exterior
            // under the tracer's turn rule; see face_tracer.
            debug!("discarding exterior face with signed area {:.3}", signed);
            continue;
        }
        let area = signed.abs();
        if area < MIN_ROOM_AREA {
            continue;
        }

        let polygon: Vec<Point> = face.iter().map(|&n| graph.nodes[n].position).collect();
        let wall_ids = face_wall_ids(&face, walls, &graph.wall_nodes);
        rooms.push(Room {
            wall_ids,
            polygon,
            area,
        });
    }

    // Stable sort: equal-area rooms keep face-discovery order.
    rooms.sort_by_key(|room| OrderedFloat(room.area));
    rooms
}

/// Canonical form of a cycle: rotate so it starts at the minimum node
/// index, then join into a comparable key. Rotations of the same cycle
/// collapse to one key.
fn canonical_key(face: &[usize]) -> String {
    let pivot = face
        .iter()
        .enumerate()
        .min_by_key(|&(_, &node)| node)
        .map(|(position, _)| position)
        .unwrap_or(0);

    let mut rotated = Vec::with_capacity(face.len());
    rotated.extend_from_slice(&face[pivot..]);
    rotated.extend_from_slice(&face[..pivot]);
    rotated
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Shoelace sum over the face's node positions, sign retained.
fn signed_area(graph: &WallGraph, face: &[usize]) -> f64 {
    let coords: Vec<Coord> = face
        .iter()
        .map(|&n| {
            let p = graph.nodes[n].position;
            Coord { x: p.x, y: p.y }
        })
        .collect();
    Polygon::new(LineString::from(coords), vec![]).signed_area()
}

/// Recover the wall ids along a face boundary. For each consecutive
/// node pair the wall table is scanned in input order and the first
/// wall connecting that pair (in either orientation) contributes its
/// id; when several walls span the same pair only that first one is
/// reported.
fn face_wall_ids(face: &[usize], walls: &[Wall], wall_nodes: &[(usize, usize)]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for i in 0..face.len() {
        let a = face[i];
        let b = face[(i + 1) % face.len()];
        let hit = wall_nodes
            .iter()
            .position(|&(na, nb)| (na == a && nb == b) || (na == b && nb == a));
        if let Some(index) = hit {
            let id = &walls[index].id;
            if !ids.iter().any(|existing| existing == id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}
