// Run room detection over a wall list exported from the editor.
//
// Usage: detect <walls.json>
// Input: JSON array of { "id": "...", "start": {"x":..,"y":..}, "end": {...} }
// Output: detected rooms as JSON on stdout, summary on stderr.
use anyhow::{Context, Result};
use room_detection::{detect_rooms, Wall};
use std::fs;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: detect <walls.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    let walls: Vec<Wall> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path))?;

    let rooms = detect_rooms(&walls);

    println!("{}", serde_json::to_string_pretty(&rooms)?);

    eprintln!("{} walls -> {} rooms", walls.len(), rooms.len());
    for (i, room) in rooms.iter().enumerate() {
        eprintln!(
            "  room {}: {} walls, {} vertices, {:.2} m²",
            i,
            room.wall_ids.len(),
            room.polygon.len(),
            room.area
        );
    }

    Ok(())
}
