use crate::interface_adapters::clients::ProgressClient;
use crate::use_cases::{SessionServices, SessionSettings};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Upstream client, also used directly by the leaderboard route.
    pub progress: Arc<ProgressClient>,
    // Ports handed to every session task.
    pub services: SessionServices,
    // Frame pacing and gameplay tuning for new sessions.
    pub settings: SessionSettings,
    // Client commands queued toward a session task.
    pub command_channel_capacity: usize,
    // Frames and HUD refreshes queued toward a socket; overlays and skins are unbounded.
    pub outbound_channel_capacity: usize,
}
