use crate::domain::state::{EnemyRoster, Player, Rect};

/// Axis-aligned overlap test. Touching edges count as overlapping.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x + a.w < b.x || a.x > b.x + b.w || a.y + a.h < b.y || a.y > b.y + b.h)
}

/// True when a circular pickup at (`x`, `y`) is within reach of the player.
///
/// Reach is the pickup radius plus half the player's width, measured from the player's center.
pub fn within_reach(player: &Player, x: f32, y: f32, radius: f32) -> bool {
    let (px, py) = player.center();
    (px - x).hypot(py - y) < radius + player.size / 2.0
}

pub fn player_hit(player: &Player, roster: &EnemyRoster) -> bool {
    let bounds = player.bounds();
    roster.iter().any(|e| rects_overlap(bounds, e.bounds()))
}
