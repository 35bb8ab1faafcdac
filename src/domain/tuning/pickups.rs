use std::time::Duration;

/// Tuning for shield/bomb powerups lying on the field.
#[derive(Debug, Clone, Copy)]
pub struct PowerupTuning {
    /// Pickup circle radius in pixels.
    pub radius: f32,
    /// Spawn positions stay this far from the right/bottom edges.
    pub spawn_margin: f32,
    /// Age after which a powerup starts fading out.
    pub fade_after: Duration,
    /// Opacity lost per frame once fading.
    pub fade_step: f32,
    /// Pulse animation phase advance per frame (radians).
    pub pulse_step: f32,
}

impl Default for PowerupTuning {
    fn default() -> Self {
        Self {
            radius: 15.0,
            spawn_margin: 30.0,
            fade_after: Duration::from_secs(10),
            fade_step: 0.05,
            pulse_step: 0.1,
        }
    }
}

/// Tuning for collectible coins.
#[derive(Debug, Clone, Copy)]
pub struct CoinTuning {
    pub radius: f32,
    /// Coins spawn at least this far from every edge.
    pub margin: f32,
    /// No new coins appear while this many are on the field.
    pub max_on_field: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for CoinTuning {
    fn default() -> Self {
        Self {
            radius: 6.0,
            margin: 5.0,
            max_on_field: 10,
            min_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(10),
        }
    }
}
