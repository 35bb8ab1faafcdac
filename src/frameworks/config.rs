use crate::domain::tuning::ArenaTuning;
use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn progress_service_url() -> String {
    env::var("PROGRESS_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

pub fn upstream_timeout() -> Duration {
    let millis = env::var("UPSTREAM_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

/// Canvas size the browser client draws at; invalid or non-positive values fall back.
pub fn arena() -> ArenaTuning {
    let default = ArenaTuning::default();
    ArenaTuning {
        width: dimension("CANVAS_WIDTH").unwrap_or(default.width),
        height: dimension("CANVAS_HEIGHT").unwrap_or(default.height),
    }
}

fn dimension(key: &str) -> Option<f32> {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 256;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
pub const HUD_INTERVAL: Duration = Duration::from_millis(100);

/// Everything `run` needs, resolved up front so tests can override it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub progress_service_url: String,
    pub upstream_timeout: Duration,
    pub arena: ArenaTuning,
    pub tick_interval: Duration,
    pub hud_interval: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            progress_service_url: progress_service_url(),
            upstream_timeout: upstream_timeout(),
            arena: arena(),
            tick_interval: TICK_INTERVAL,
            hud_interval: HUD_INTERVAL,
        }
    }
}
