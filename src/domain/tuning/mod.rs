// Gameplay tuning, kept separate from runtime/server configuration.

pub mod arena;
pub mod enemy;
pub mod pickups;
pub mod player;
pub mod shield;
pub mod spawning;

pub use arena::ArenaTuning;
pub use enemy::TierStats;
pub use pickups::{CoinTuning, PowerupTuning};
pub use player::PlayerTuning;
pub use shield::ShieldTuning;
pub use spawning::SpawnTuning;

/// Every gameplay knob a session needs, bundled so it can be passed around as one value.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameTuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub powerup: PowerupTuning,
    pub coin: CoinTuning,
    pub shield: ShieldTuning,
    pub spawning: SpawnTuning,
}
