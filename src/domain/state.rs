// Domain-level simulation entities and the snapshots handed to presentation.

use crate::domain::tuning::{ArenaTuning, PlayerTuning, TierStats};
use std::time::Duration;

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Player {
    /// Creates a motionless player centered in the arena.
    pub fn centered(arena: &ArenaTuning, tuning: &PlayerTuning) -> Self {
        Self {
            x: arena.width / 2.0 - tuning.size / 2.0,
            y: arena.height / 2.0 - tuning.size / 2.0,
            size: tuning.size,
            speed: tuning.speed,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.size,
            h: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyTier {
    Normal,
    Fast,
    Slow,
}

impl EnemyTier {
    pub fn stats(self) -> TierStats {
        TierStats::for_tier(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub tier: EnemyTier,
}

impl Enemy {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.size,
            h: self.size,
        }
    }
}

/// Enemies grouped by tier; each list keeps spawn order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyRoster {
    pub normal: Vec<Enemy>,
    pub fast: Vec<Enemy>,
    pub slow: Vec<Enemy>,
}

impl EnemyRoster {
    /// Appends the enemy to the list matching its tier.
    pub fn push(&mut self, enemy: Enemy) {
        self.list_mut(enemy.tier).push(enemy);
    }

    pub fn list(&self, tier: EnemyTier) -> &[Enemy] {
        match tier {
            EnemyTier::Normal => &self.normal,
            EnemyTier::Fast => &self.fast,
            EnemyTier::Slow => &self.slow,
        }
    }

    pub fn list_mut(&mut self, tier: EnemyTier) -> &mut Vec<Enemy> {
        match tier {
            EnemyTier::Normal => &mut self.normal,
            EnemyTier::Fast => &mut self.fast,
            EnemyTier::Slow => &mut self.slow,
        }
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.fast.len() + self.slow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.normal.clear();
        self.fast.clear();
        self.slow.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.normal.iter().chain(&self.fast).chain(&self.slow)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.normal
            .iter_mut()
            .chain(&mut self.fast)
            .chain(&mut self.slow)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    /// Center of the coin.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Bomb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    /// Center of the pickup circle.
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKind,
    pub radius: f32,
    // Animation state (radians; advances every frame).
    pub pulse: f32,
    pub opacity: f32,
    /// Elapsed play time at which the powerup appeared.
    pub spawned_at: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub tier: EnemyTier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerupSnapshot {
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKind,
    pub radius: f32,
    /// Radius multiplier for the pulse animation.
    pub scale: f32,
    pub opacity: f32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            x: p.x,
            y: p.y,
            size: p.size,
        }
    }
}

impl From<&Enemy> for EnemySnapshot {
    fn from(e: &Enemy) -> Self {
        Self {
            x: e.x,
            y: e.y,
            size: e.size,
            tier: e.tier,
        }
    }
}

impl From<&Coin> for CoinSnapshot {
    fn from(c: &Coin) -> Self {
        Self {
            x: c.x,
            y: c.y,
            radius: c.radius,
        }
    }
}

impl From<&Powerup> for PowerupSnapshot {
    fn from(p: &Powerup) -> Self {
        Self {
            x: p.x,
            y: p.y,
            kind: p.kind,
            radius: p.radius,
            scale: 1.0 + p.pulse.sin() * 0.2,
            opacity: p.opacity,
        }
    }
}
