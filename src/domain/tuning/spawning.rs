use std::time::Duration;

/// Cadences for the time-driven spawners.
#[derive(Debug, Clone, Copy)]
pub struct SpawnTuning {
    /// Time between enemy waves.
    pub wave_interval: Duration,
    /// Upper bound of the random delay added to each powerup attempt.
    pub powerup_jitter: Duration,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            wave_interval: Duration::from_secs(10),
            powerup_jitter: Duration::from_secs(5),
        }
    }
}
