// Domain layer: core simulation types and rules.

pub mod clock;
pub mod factory;
pub mod profile;
pub mod state;
pub mod systems;
pub mod tuning;

pub use clock::PlayClock;
pub use factory::EntityFactory;
pub use profile::{CoinBalance, EquippedSkins, ResolvedSkins, ShopItem};
pub use state::{
    Coin, CoinSnapshot, Enemy, EnemyRoster, EnemySnapshot, EnemyTier, Player, PlayerSnapshot,
    Powerup, PowerupKind, PowerupSnapshot,
};
