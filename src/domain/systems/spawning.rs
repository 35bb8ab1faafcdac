// Difficulty curve: pure step functions of elapsed play time (seconds).

use std::time::Duration;

/// Fast enemies join waves from this point on.
pub const FAST_TIER_FROM: f32 = 50.0;
/// Heavy enemies are maintained from this point on.
pub const SLOW_TIER_FROM: f32 = 100.0;
/// One more heavy enemy is required every this many seconds.
pub const SLOW_TIER_EVERY: f32 = 100.0;

pub const FAST_ANNOUNCEMENT: &str = "Fast enemies incoming!";
pub const HEAVY_ANNOUNCEMENT: &str = "Heavy enemies incoming!";

/// Number of normal enemies added per wave.
pub fn normal_multiplier(elapsed: f32) -> usize {
    if elapsed >= 300.0 {
        10
    } else if elapsed >= 60.0 {
        3
    } else if elapsed >= 30.0 {
        2
    } else {
        1
    }
}

/// Required number of live heavy enemies at `elapsed`.
pub fn slow_target(elapsed: f32) -> usize {
    if elapsed < SLOW_TIER_FROM {
        return 0;
    }
    ((elapsed - SLOW_TIER_FROM) / SLOW_TIER_EVERY).floor() as usize + 1
}

/// Probability that a powerup attempt actually spawns one.
pub fn powerup_chance(elapsed: f32) -> f64 {
    if elapsed > 180.0 {
        0.7
    } else if elapsed > 60.0 {
        0.5
    } else {
        0.3
    }
}

/// Probability that a spawned powerup is a shield rather than a bomb.
pub fn shield_bias(elapsed: f32) -> f64 {
    if elapsed > 120.0 {
        0.4
    } else if elapsed > 60.0 {
        0.65
    } else {
        0.5
    }
}

/// Base wait before the next powerup attempt; jitter is added on top.
pub fn powerup_base_delay(elapsed: f32) -> Duration {
    if elapsed > 180.0 {
        Duration::from_secs(15)
    } else if elapsed > 60.0 {
        Duration::from_secs(20)
    } else {
        Duration::from_secs(25)
    }
}

/// What a single enemy wave adds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wave {
    pub normal: usize,
    pub fast: usize,
    pub slow: usize,
    pub announcements: Vec<&'static str>,
}

/// Wave planner. Tier announcements fire once per game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WavePlanner {
    fast_announced: bool,
    heavy_announced: bool,
}

impl WavePlanner {
    /// Plans the wave at `elapsed` given how many heavy enemies are currently alive.
    /// Heavy enemies are only topped up, never removed.
    pub fn plan(&mut self, elapsed: f32, slow_alive: usize) -> Wave {
        let mut wave = Wave {
            normal: normal_multiplier(elapsed),
            ..Wave::default()
        };

        if elapsed >= FAST_TIER_FROM {
            if !self.fast_announced {
                self.fast_announced = true;
                wave.announcements.push(FAST_ANNOUNCEMENT);
            }
            wave.fast = 1;
        }

        if elapsed >= SLOW_TIER_FROM {
            if !self.heavy_announced {
                self.heavy_announced = true;
                wave.announcements.push(HEAVY_ANNOUNCEMENT);
            }
            wave.slow = slow_target(elapsed).saturating_sub(slow_alive);
        }

        wave
    }
}
