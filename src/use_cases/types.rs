// Use-case level inputs/outputs for a game session.

use crate::domain::{CoinSnapshot, EnemySnapshot, PlayerSnapshot, PowerupSnapshot};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl RunState {
    /// Live sessions get ticked every frame.
    pub fn is_live(self) -> bool {
        matches!(self, RunState::NotStarted | RunState::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
}

/// Commands a client sends into its session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Press(Control),
    Release(Control),
    TogglePause,
    Restart,
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Announced(String),
    CoinCollected { total: u32 },
    GameOver { survival_time: Duration },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub tick: u64,
    pub player: PlayerSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub coins: Vec<CoinSnapshot>,
    pub powerups: Vec<PowerupSnapshot>,
    pub shield_active: bool,
    pub invincible: bool,
    pub flicker_dimmed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    /// Active play time, or the final survival time after game over.
    pub elapsed: Duration,
    pub coins: u32,
    /// Wallet total last reported by the progress service.
    pub wallet_coins: Option<u64>,
    pub run_state: RunState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Announcement(String),
    Paused,
    GameOver { survival_time: Duration },
    /// Removes the paused/game-over overlay.
    Cleared,
}

/// Final numbers for a disposed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    pub coins_collected: u32,
    pub survival_time: Option<Duration>,
}
