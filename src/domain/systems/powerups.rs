use crate::domain::state::Powerup;
use crate::domain::tuning::{PowerupTuning, ShieldTuning};
use std::time::Duration;

pub const SHIELD_ANNOUNCEMENT: &str = "Shield Activated!";
pub const BOMB_ANNOUNCEMENT: &str = "BOOM! Enemies Cleared!";
pub const ABSORBED_ANNOUNCEMENT: &str = "Shield Absorbed the Hit!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Unshielded,
    Shielded,
    /// Collisions are ignored until `until` (elapsed play time).
    Invincible { since: Duration, until: Duration },
}

/// What a player-enemy collision amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored,
    Absorbed,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShieldState {
    protection: Protection,
    tuning: ShieldTuning,
}

impl ShieldState {
    pub fn new(tuning: ShieldTuning) -> Self {
        Self {
            protection: Protection::Unshielded,
            tuning,
        }
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    pub fn is_shielded(&self) -> bool {
        self.protection == Protection::Shielded
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.protection, Protection::Invincible { .. })
    }

    /// Raises the shield. Refused while invincible so the pickup stays on the field.
    pub fn grant_shield(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.protection = Protection::Shielded;
        true
    }

    pub fn on_hit(&mut self, now: Duration) -> HitOutcome {
        match self.protection {
            Protection::Invincible { .. } => HitOutcome::Ignored,
            Protection::Shielded => {
                self.protection = Protection::Invincible {
                    since: now,
                    until: now + self.tuning.invincibility,
                };
                HitOutcome::Absorbed
            }
            Protection::Unshielded => HitOutcome::Fatal,
        }
    }

    /// Ends an invincibility window whose time is up. Returns true if one ended.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.protection {
            Protection::Invincible { until, .. } if now >= until => {
                self.protection = Protection::Unshielded;
                true
            }
            _ => false,
        }
    }

    /// Whether the avatar is drawn dimmed at `now`; toggles every flicker period while invincible.
    pub fn flicker_dimmed(&self, now: Duration) -> bool {
        let Protection::Invincible { since, .. } = self.protection else {
            return false;
        };
        let period = self.tuning.flicker.as_nanos().max(1);
        let phase = now.saturating_sub(since).as_nanos() / period;
        phase % 2 == 1
    }
}

/// Advances pulse animation and fades out powerups older than the fade threshold.
/// Fully faded powerups are removed.
pub fn decay_powerups(powerups: &mut Vec<Powerup>, now: Duration, tuning: &PowerupTuning) {
    for p in powerups.iter_mut() {
        if now.saturating_sub(p.spawned_at) > tuning.fade_after {
            p.opacity -= tuning.fade_step;
        }
        p.pulse += tuning.pulse_step;
    }
    powerups.retain(|p| p.opacity > 0.0);
}
