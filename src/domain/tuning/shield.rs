use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldTuning {
    /// How long collisions are ignored after the shield absorbs a hit.
    pub invincibility: Duration,
    /// Period of the visibility flicker shown while invincible.
    pub flicker: Duration,
}

impl Default for ShieldTuning {
    fn default() -> Self {
        Self {
            invincibility: Duration::from_millis(1000),
            flicker: Duration::from_millis(100),
        }
    }
}
