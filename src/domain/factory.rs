// Entity construction with randomized placement.

use crate::domain::state::{Coin, Enemy, EnemyTier, Powerup, PowerupKind};
use crate::domain::tuning::{ArenaTuning, CoinTuning, PowerupTuning};
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct EntityFactory {
    pub arena: ArenaTuning,
    pub powerup: PowerupTuning,
    pub coin: CoinTuning,
}

impl EntityFactory {
    /// Places a new enemy on a random canvas edge, fully inside the canvas.
    pub fn enemy<R: Rng + ?Sized>(&self, tier: EnemyTier, rng: &mut R) -> Enemy {
        let stats = tier.stats();
        let max_x = (self.arena.width - stats.size).max(0.0);
        let max_y = (self.arena.height - stats.size).max(0.0);

        // 0 = top, 1 = right, 2 = bottom, 3 = left.
        let (x, y) = match rng.gen_range(0..4) {
            0 => (rng.r#gen::<f32>() * max_x, 0.0),
            1 => (max_x, rng.r#gen::<f32>() * max_y),
            2 => (rng.r#gen::<f32>() * max_x, max_y),
            _ => (0.0, rng.r#gen::<f32>() * max_y),
        };

        Enemy {
            x,
            y,
            size: stats.size,
            speed: stats.speed,
            tier,
        }
    }

    pub fn powerup<R: Rng + ?Sized>(
        &self,
        kind: PowerupKind,
        spawned_at: Duration,
        rng: &mut R,
    ) -> Powerup {
        let span_x = (self.arena.width - self.powerup.spawn_margin).max(0.0);
        let span_y = (self.arena.height - self.powerup.spawn_margin).max(0.0);
        Powerup {
            x: rng.r#gen::<f32>() * span_x,
            y: rng.r#gen::<f32>() * span_y,
            kind,
            radius: self.powerup.radius,
            pulse: 0.0,
            opacity: 1.0,
            spawned_at,
        }
    }

    pub fn coin<R: Rng + ?Sized>(&self, rng: &mut R) -> Coin {
        let margin = self.coin.margin;
        let span_x = (self.arena.width - 2.0 * margin).max(0.0);
        let span_y = (self.arena.height - 2.0 * margin).max(0.0);
        Coin {
            x: rng.r#gen::<f32>() * span_x + margin,
            y: rng.r#gen::<f32>() * span_y + margin,
            radius: self.coin.radius,
        }
    }
}
