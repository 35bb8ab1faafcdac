use crate::domain::state::EnemyTier;

/// Per-tier movement and body stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStats {
    /// Seek speed in pixels per frame.
    pub speed: f32,
    /// Side length of the square body in pixels.
    pub size: f32,
    /// Fallback fill color when no enemy skin is equipped.
    pub color: &'static str,
}

const NORMAL: TierStats = TierStats {
    speed: 3.0,
    size: 15.0,
    color: "red",
};

const FAST: TierStats = TierStats {
    speed: 5.0,
    size: 10.0,
    color: "pink",
};

// Heavy enemies use the top of the 50..=75 size band.
const SLOW: TierStats = TierStats {
    speed: 2.0,
    size: 75.0,
    color: "green",
};

impl TierStats {
    pub fn for_tier(tier: EnemyTier) -> Self {
        match tier {
            EnemyTier::Normal => NORMAL,
            EnemyTier::Fast => FAST,
            EnemyTier::Slow => SLOW,
        }
    }
}
