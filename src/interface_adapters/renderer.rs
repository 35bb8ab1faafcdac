// Renderer port implementation that serializes presentation updates for one socket.

use crate::domain::ResolvedSkins;
use crate::interface_adapters::protocol::{FrameDto, HudDto, OverlayDto, ServerMessage, SkinsDto};
use crate::use_cases::{FrameState, HudState, Overlay, Renderer};
use axum::extract::ws::Utf8Bytes;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

const LOG_THROTTLE: Duration = Duration::from_secs(1);

/// Queues serialized server messages for the connection's client loop.
///
/// Frames and HUD refreshes are superseded by the next one, so they go through a bounded queue
/// and are dropped when the client falls behind. Overlays and skins happen once and go through
/// an unbounded queue that never drops. Neither path blocks the session task.
pub struct SocketRenderer {
    frames_tx: mpsc::Sender<Utf8Bytes>,
    events_tx: mpsc::UnboundedSender<Utf8Bytes>,
    dropped: u64,
    last_drop_log: Option<Instant>,
}

impl SocketRenderer {
    pub fn new(
        frames_tx: mpsc::Sender<Utf8Bytes>,
        events_tx: mpsc::UnboundedSender<Utf8Bytes>,
    ) -> Self {
        Self {
            frames_tx,
            events_tx,
            dropped: 0,
            last_drop_log: None,
        }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn send_lossy(&mut self, msg: ServerMessage) {
        let Some(bytes) = serialize(&msg) else {
            return;
        };

        match self.frames_tx.try_send(bytes) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                if self.should_log() {
                    warn!(dropped = self.dropped, "frame queue full; dropping message");
                }
            }
            // Connection is going away; the session task ends once commands close.
            Err(TrySendError::Closed(_)) => debug!("frame queue closed"),
        }
    }

    fn send_reliable(&mut self, msg: ServerMessage) {
        let Some(bytes) = serialize(&msg) else {
            return;
        };

        if self.events_tx.send(bytes).is_err() {
            debug!("event queue closed");
        }
    }

    fn should_log(&mut self) -> bool {
        match self.last_drop_log {
            Some(last) if last.elapsed() < LOG_THROTTLE => false,
            _ => {
                self.last_drop_log = Some(Instant::now());
                true
            }
        }
    }
}

fn serialize(msg: &ServerMessage) -> Option<Utf8Bytes> {
    match serde_json::to_string(msg) {
        Ok(txt) => Some(Utf8Bytes::from(txt)),
        Err(e) => {
            warn!(error = %e, "failed to serialize server message");
            None
        }
    }
}

impl Renderer for SocketRenderer {
    fn render(&mut self, frame: &FrameState) {
        self.send_lossy(ServerMessage::Frame(FrameDto::from(frame)));
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        self.send_reliable(ServerMessage::Overlay(OverlayDto::from(overlay)));
    }

    fn update_hud(&mut self, hud: &HudState) {
        self.send_lossy(ServerMessage::Hud(HudDto::from(hud)));
    }

    fn apply_skins(&mut self, skins: &ResolvedSkins) {
        self.send_reliable(ServerMessage::Skins(SkinsDto::from(skins)));
    }
}
