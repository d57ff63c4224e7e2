//! Room detection for floorplan wall graphs.
//!
//! Given an unordered list of wall centerlines, discover every enclosed
//! region bounded by them: merge imprecise endpoints into a topological
//! graph, order edges angularly at each node, trace minimal cycles with
//! a clockwise turn rule, and keep the faces whose winding marks them as
//! interior. The whole pipeline is a pure function of the input wall
//! list; anomalies (dangling walls, degenerate segments, runaway traces)
//! are silently excluded rather than reported as errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

mod face_tracer;
mod graph_builder;
mod room_detector;

pub use face_tracer::MAX_TRACE_STEPS;
pub use graph_builder::MERGE_EPSILON;
pub use room_detector::MIN_ROOM_AREA;

/// 2D position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub(crate) fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Wall centerline as drawn in the editor. Duplicates and zero-length
/// segments are permitted; they simply never close a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub start: Point,
    pub end: Point,
}

/// Enclosed region bounded by walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Ids of the walls contributing to the boundary, deduplicated.
    pub wall_ids: Vec<String>,
    /// Boundary vertices in face order, closed loop without a repeated
    /// final vertex.
    pub polygon: Vec<Point>,
    /// Floor area in square meters, always non-negative.
    pub area: f64,
}

/// Detect every enclosed room in `walls`.
///
/// Returns rooms sorted ascending by area. Ties keep face-discovery
/// order, which follows input wall order. Walls that do not form at
/// least one cycle yield an empty list.
pub fn detect_rooms(walls: &[Wall]) -> Vec<Room> {
    if walls.is_empty() {
        return Vec::new();
    }

    let graph = graph_builder::build_graph(walls);
    debug!(
        "wall graph: {} nodes from {} walls",
        graph.nodes.len(),
        walls.len()
    );

    let faces = face_tracer::trace_all_faces(&graph);
    debug!("traced {} closed faces", faces.len());

    let rooms = room_detector::build_rooms(&graph, walls, faces);
    debug!("accepted {} rooms", rooms.len());
    rooms
}
