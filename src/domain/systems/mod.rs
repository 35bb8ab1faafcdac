// Per-frame simulation systems.

pub mod collision;
pub mod movement;
pub mod powerups;
pub mod spawning;
