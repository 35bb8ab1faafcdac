// Wire protocol DTOs and conversions for the browser client.
// Upstream service DTOs live with their client in `clients/`.

use crate::domain::{
    CoinSnapshot, EnemySnapshot, EnemyTier, PlayerSnapshot, PowerupKind, PowerupSnapshot,
    ResolvedSkins,
};
use crate::use_cases::{Control, FrameState, HudState, Overlay, RunState, SessionCommand};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Everything to draw for one frame.
    Frame(FrameDto),
    // Timer and coin counters, refreshed on their own cadence.
    Hud(HudDto),
    // Announcement banners and the paused/game-over screens.
    Overlay(OverlayDto),
    // Resolved cosmetic images; absent fields mean default shapes.
    Skins(SkinsDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    KeyDown { key: String },
    KeyUp { key: String },
    // "Play Again".
    Restart,
}

impl ClientMessage {
    /// Maps a raw keyboard message onto a session command. Unknown keys map to `None`.
    pub fn into_command(self) -> Option<SessionCommand> {
        match self {
            ClientMessage::KeyDown { key } if key == "Escape" => Some(SessionCommand::TogglePause),
            ClientMessage::KeyDown { key } => control_for_key(&key).map(SessionCommand::Press),
            ClientMessage::KeyUp { key } => control_for_key(&key).map(SessionCommand::Release),
            ClientMessage::Restart => Some(SessionCommand::Restart),
        }
    }
}

fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowRight" | "d" => Some(Control::Right),
        "ArrowLeft" | "a" => Some(Control::Left),
        "ArrowUp" | "w" => Some(Control::Up),
        "ArrowDown" | "s" => Some(Control::Down),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameDto {
    pub tick: u64,
    pub player: PlayerDto,
    pub enemies: Vec<EnemyDto>,
    pub coins: Vec<CoinDto>,
    pub powerups: Vec<PowerupDto>,
    pub shield_active: bool,
    pub invincible: bool,
    pub flicker_dimmed: bool,
}

impl From<&FrameState> for FrameDto {
    fn from(frame: &FrameState) -> Self {
        Self {
            tick: frame.tick,
            player: PlayerDto::from(&frame.player),
            enemies: frame.enemies.iter().map(EnemyDto::from).collect(),
            coins: frame.coins.iter().map(CoinDto::from).collect(),
            powerups: frame.powerups.iter().map(PowerupDto::from).collect(),
            shield_active: frame.shield_active,
            invincible: frame.invincible,
            flicker_dimmed: frame.flicker_dimmed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl From<&PlayerSnapshot> for PlayerDto {
    fn from(player: &PlayerSnapshot) -> Self {
        Self {
            x: player.x,
            y: player.y,
            size: player.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierDto {
    Normal,
    Fast,
    Slow,
}

impl From<EnemyTier> for TierDto {
    fn from(tier: EnemyTier) -> Self {
        match tier {
            EnemyTier::Normal => TierDto::Normal,
            EnemyTier::Fast => TierDto::Fast,
            EnemyTier::Slow => TierDto::Slow,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyDto {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub tier: TierDto,
    // Fallback fill when no enemy skin is equipped.
    pub color: &'static str,
}

impl From<&EnemySnapshot> for EnemyDto {
    fn from(enemy: &EnemySnapshot) -> Self {
        Self {
            x: enemy.x,
            y: enemy.y,
            size: enemy.size,
            tier: enemy.tier.into(),
            color: enemy.tier.stats().color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinDto {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl From<&CoinSnapshot> for CoinDto {
    fn from(coin: &CoinSnapshot) -> Self {
        Self {
            x: coin.x,
            y: coin.y,
            radius: coin.radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKindDto {
    Shield,
    Bomb,
}

impl From<PowerupKind> for PowerupKindDto {
    fn from(kind: PowerupKind) -> Self {
        match kind {
            PowerupKind::Shield => PowerupKindDto::Shield,
            PowerupKind::Bomb => PowerupKindDto::Bomb,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerupDto {
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKindDto,
    pub radius: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl From<&PowerupSnapshot> for PowerupDto {
    fn from(powerup: &PowerupSnapshot) -> Self {
        Self {
            x: powerup.x,
            y: powerup.y,
            kind: powerup.kind.into(),
            radius: powerup.radius,
            scale: powerup.scale,
            opacity: powerup.opacity,
        }
    }
}

/// Session lifecycle state sent to clients for UI flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStateDto {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl From<RunState> for RunStateDto {
    fn from(state: RunState) -> Self {
        match state {
            RunState::NotStarted => RunStateDto::NotStarted,
            RunState::Running => RunStateDto::Running,
            RunState::Paused => RunStateDto::Paused,
            RunState::GameOver => RunStateDto::GameOver,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HudDto {
    pub elapsed_secs: f64,
    pub coins: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_coins: Option<u64>,
    pub state: RunStateDto,
}

impl From<&HudState> for HudDto {
    fn from(hud: &HudState) -> Self {
        Self {
            elapsed_secs: hud.elapsed.as_secs_f64(),
            coins: hud.coins,
            wallet_coins: hud.wallet_coins,
            state: hud.run_state.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum OverlayDto {
    Announcement { text: String },
    Paused,
    GameOver { survival_secs: f64 },
    Cleared,
}

impl From<&Overlay> for OverlayDto {
    fn from(overlay: &Overlay) -> Self {
        match overlay {
            Overlay::Announcement(text) => OverlayDto::Announcement { text: text.clone() },
            Overlay::Paused => OverlayDto::Paused,
            Overlay::GameOver { survival_time } => OverlayDto::GameOver {
                survival_secs: survival_time.as_secs_f64(),
            },
            Overlay::Cleared => OverlayDto::Cleared,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkinsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enemy_img: Option<String>,
}

impl From<&ResolvedSkins> for SkinsDto {
    fn from(skins: &ResolvedSkins) -> Self {
        Self {
            player_img: skins.player_img.clone(),
            enemy_img: skins.enemy_img.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn command(raw: serde_json::Value) -> Option<SessionCommand> {
        serde_json::from_value::<ClientMessage>(raw)
            .expect("valid client message")
            .into_command()
    }

    #[test]
    fn when_arrow_and_wasd_keys_arrive_then_they_map_to_the_same_controls() {
        for (arrow, letter, control) in [
            ("ArrowRight", "d", Control::Right),
            ("ArrowLeft", "a", Control::Left),
            ("ArrowUp", "w", Control::Up),
            ("ArrowDown", "s", Control::Down),
        ] {
            let expected = Some(SessionCommand::Press(control));
            assert_eq!(command(json!({"type": "KeyDown", "data": {"key": arrow}})), expected);
            assert_eq!(command(json!({"type": "KeyDown", "data": {"key": letter}})), expected);
        }
        assert_eq!(
            command(json!({"type": "KeyUp", "data": {"key": "a"}})),
            Some(SessionCommand::Release(Control::Left))
        );
    }

    #[test]
    fn when_escape_is_pressed_then_pause_toggles_but_release_is_ignored() {
        assert_eq!(
            command(json!({"type": "KeyDown", "data": {"key": "Escape"}})),
            Some(SessionCommand::TogglePause)
        );
        assert_eq!(command(json!({"type": "KeyUp", "data": {"key": "Escape"}})), None);
    }

    #[test]
    fn when_unknown_key_arrives_then_it_is_ignored() {
        assert_eq!(command(json!({"type": "KeyDown", "data": {"key": "q"}})), None);
        assert_eq!(command(json!({"type": "Restart"})), Some(SessionCommand::Restart));
    }

    #[test]
    fn when_game_over_overlay_is_serialized_then_survival_is_in_seconds() {
        let msg = ServerMessage::Overlay(OverlayDto::from(&Overlay::GameOver {
            survival_time: Duration::from_millis(12_500),
        }));

        let value = serde_json::to_value(&msg).expect("serializable");

        assert_eq!(
            value,
            json!({"type": "Overlay", "data": {"kind": "GameOver", "survival_secs": 12.5}})
        );
    }

    #[test]
    fn when_hud_has_no_wallet_then_field_is_omitted() {
        let hud = HudState {
            elapsed: Duration::from_secs(3),
            coins: 2,
            wallet_coins: None,
            run_state: RunState::Paused,
        };

        let value = serde_json::to_value(ServerMessage::Hud(HudDto::from(&hud))).expect("json");

        assert_eq!(
            value,
            json!({"type": "Hud", "data": {"elapsed_secs": 3.0, "coins": 2, "state": "Paused"}})
        );
    }

    #[test]
    fn when_enemy_is_serialized_then_it_carries_tier_and_fallback_color() {
        let enemy = EnemySnapshot {
            x: 1.0,
            y: 2.0,
            size: 10.0,
            tier: EnemyTier::Fast,
        };

        let value = serde_json::to_value(EnemyDto::from(&enemy)).expect("json");

        assert_eq!(value["tier"], "fast");
        assert_eq!(value["color"], "pink");
    }
}
