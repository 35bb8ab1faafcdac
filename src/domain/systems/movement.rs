use crate::domain::state::{Enemy, EnemyRoster, Player};
use crate::domain::tuning::ArenaTuning;

/// Integrates player velocity and keeps the avatar fully on the canvas.
pub fn update_player(player: &mut Player, arena: &ArenaTuning) {
    let max_x = (arena.width - player.size).max(0.0);
    let max_y = (arena.height - player.size).max(0.0);
    player.x = (player.x + player.dx).min(max_x).max(0.0);
    player.y = (player.y + player.dy).min(max_y).max(0.0);
}

/// Moves each enemy's center toward `target` by its own speed (seek behavior).
pub fn seek(enemies: &mut [Enemy], target: (f32, f32)) {
    for e in enemies {
        let (cx, cy) = e.center();
        let dx = target.0 - cx;
        let dy = target.1 - cy;
        let dist = dx.hypot(dy);
        // Zero distance leaves dx/dy at zero, so the fallback only avoids NaN.
        let dist = if dist > 0.0 { dist } else { 1.0 };
        e.x += dx / dist * e.speed;
        e.y += dy / dist * e.speed;
    }
}

/// Pushes two overlapping enemies apart, each by half the overlap along the line between centers.
pub fn resolve_overlap(a: &mut Enemy, b: &mut Enemy) {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let dx = bx - ax;
    let dy = by - ay;
    let dist = dx.hypot(dy);
    let min_dist = a.size / 2.0 + b.size / 2.0;
    if dist >= min_dist {
        return;
    }

    // Coincident centers have no defined normal; leave them for a later frame.
    let (nx, ny) = if dist > 0.0 {
        (dx / dist, dy / dist)
    } else {
        (0.0, 0.0)
    };
    let push = (min_dist - dist) / 2.0;

    a.x -= nx * push;
    a.y -= ny * push;
    b.x += nx * push;
    b.y += ny * push;
}

/// Resolves every overlapping pair once, in order.
pub fn separate(enemies: &mut [&mut Enemy]) {
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut *head[i];
        for b in tail.iter_mut() {
            resolve_overlap(a, b);
        }
    }
}

pub fn clamp_enemy(enemy: &mut Enemy, arena: &ArenaTuning) {
    let max_x = (arena.width - enemy.size).max(0.0);
    let max_y = (arena.height - enemy.size).max(0.0);
    enemy.x = enemy.x.min(max_x).max(0.0);
    enemy.y = enemy.y.min(max_y).max(0.0);
}

/// Per-frame enemy step: seek the player, separate across all tiers, then clamp to the canvas.
pub fn advance_enemies(roster: &mut EnemyRoster, player: &Player, arena: &ArenaTuning) {
    let target = player.center();
    seek(&mut roster.normal, target);
    seek(&mut roster.fast, target);
    seek(&mut roster.slow, target);

    let mut all: Vec<&mut Enemy> = roster.iter_mut().collect();
    separate(&mut all);

    for e in roster.iter_mut() {
        clamp_enemy(e, arena);
    }
}
