// Framework bootstrap for the survival game server runtime.

use crate::domain::tuning::GameTuning;
use crate::frameworks::config::{self, ServerConfig};
use crate::interface_adapters::clients::ProgressClient;
use crate::interface_adapters::http::leaderboard_handler;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{SessionServices, SessionSettings};

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, ServerConfig::from_env()).await
}

fn build_state(config: &ServerConfig) -> Result<Arc<AppState>> {
    let progress = ProgressClient::new(config.progress_service_url.clone(), config.upstream_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize progress client: {e}")))?;
    tracing::debug!(
        progress_service_url = %config.progress_service_url,
        upstream_timeout_ms = config.upstream_timeout.as_millis(),
        arena_width = config.arena.width,
        arena_height = config.arena.height,
        "progress client configured"
    );
    let progress = Arc::new(progress);

    Ok(Arc::new(AppState {
        services: SessionServices {
            progress: progress.clone(),
            catalog: progress.clone(),
        },
        progress,
        settings: SessionSettings {
            tick_interval: config.tick_interval,
            hud_interval: config.hud_interval,
            tuning: GameTuning {
                arena: config.arena,
                ..GameTuning::default()
            },
        },
        command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
        outbound_channel_capacity: config::OUTBOUND_CHANNEL_CAPACITY,
    }))
}
