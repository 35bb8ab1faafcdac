// One authoritative scheduler for every time-driven policy of a session.
//
// Gameplay deadlines are measured in elapsed play time, so a session that is not ticked
// (paused, game over) has no timers that can fire behind its back. The HUD deadline is
// measured in wall time because the HUD refreshes regardless of run state.

use crate::domain::systems::spawning::powerup_base_delay;
use crate::domain::tuning::{CoinTuning, SpawnTuning};
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    next_wave: Duration,
    next_coin: Duration,
    next_powerup: Option<Duration>,
    next_hud: Option<Duration>,
}

impl Scheduler {
    /// Enemy waves fire on a fixed grid: 0, interval, 2 * interval, ...
    pub fn wave_due(&mut self, elapsed: Duration, interval: Duration) -> bool {
        if elapsed < self.next_wave {
            return false;
        }
        self.next_wave += interval;
        if self.next_wave <= elapsed {
            // Never replay missed waves in a burst.
            self.next_wave = elapsed + interval;
        }
        true
    }

    /// Coin attempts reschedule themselves after a random delay.
    pub fn coin_due<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        tuning: &CoinTuning,
        rng: &mut R,
    ) -> bool {
        if elapsed < self.next_coin {
            return false;
        }
        self.next_coin = elapsed + random_between(tuning.min_delay, tuning.max_delay, rng);
        true
    }

    /// Powerup attempts get sooner as the game goes on. The first attempt is one full
    /// cadence after the first check.
    pub fn powerup_due<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        tuning: &SpawnTuning,
        rng: &mut R,
    ) -> bool {
        let due = match self.next_powerup {
            Some(at) => elapsed >= at,
            None => false,
        };
        if due || self.next_powerup.is_none() {
            let base = powerup_base_delay(elapsed.as_secs_f32());
            self.next_powerup =
                Some(elapsed + base + random_between(Duration::ZERO, tuning.powerup_jitter, rng));
        }
        due
    }

    pub fn hud_due(&mut self, now: Duration, interval: Duration) -> bool {
        match self.next_hud {
            Some(at) if now < at => false,
            _ => {
                self.next_hud = Some(now + interval);
                true
            }
        }
    }

    pub fn next_powerup(&self) -> Option<Duration> {
        self.next_powerup
    }
}

fn random_between<R: Rng + ?Sized>(min: Duration, max: Duration, rng: &mut R) -> Duration {
    if max <= min {
        return min;
    }
    min + (max - min).mul_f64(rng.r#gen::<f64>())
}
