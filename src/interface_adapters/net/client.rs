use crate::interface_adapters::protocol::ClientMessage;
use crate::interface_adapters::renderer::SocketRenderer;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::{conn_id, session_rng};
use crate::use_cases::{SessionCommand, session_task};

use axum::{
    Error,
    extract::{
        Query, State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    SessionClosed,
    OutboundClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SessionQuery {
    // Display name used for scores, coins and skins.
    #[serde(default)]
    username: Option<String>,
}

const DEFAULT_USERNAME: &str = "Anonymous";
const MAX_USERNAME_CHARS: usize = 64;
const LOG_THROTTLE: Duration = Duration::from_secs(1);
const MAX_INVALID_JSON: u32 = 10;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    let username = sanitize_username(query.username.as_deref());
    ws.on_upgrade(move |socket| handle_socket(socket, state, username))
}

/// Trims and truncates the requested name, falling back to `Anonymous`.
pub fn sanitize_username(raw: Option<&str>) -> Arc<str> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Arc::from(DEFAULT_USERNAME);
    }
    let truncated: String = trimmed.chars().take(MAX_USERNAME_CHARS).collect();
    Arc::from(truncated.as_str())
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, username: Arc<str>) {
    let conn_id = conn_id();
    let span = info_span!("session", conn_id, username = %username);

    async move {
        let (command_tx, command_rx) = mpsc::channel(state.command_channel_capacity);
        let (frames_tx, frames_rx) = mpsc::channel(state.outbound_channel_capacity);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        // The session task owns all game state; it ends once `command_tx` is dropped.
        let session = tokio::spawn(
            session_task(
                username.clone(),
                command_rx,
                SocketRenderer::new(frames_tx, events_tx),
                state.services.clone(),
                state.settings,
                session_rng(),
            )
            .in_current_span(),
        );

        info!("client connected");

        let mut ctx = ConnCtx {
            command_tx,
            frames_rx,
            events_rx,
            msgs_in: 0,
            msgs_out: 0,
            bytes_in: 0,
            bytes_out: 0,
            invalid_json: 0,
            last_command_full_log: None,
            last_invalid_input_log: None,
            close_frame: None,
        };

        if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
            warn!(error = ?e, "client loop exited with error");
        }

        let ConnCtx {
            command_tx,
            msgs_in,
            msgs_out,
            bytes_in,
            bytes_out,
            invalid_json,
            ..
        } = ctx;
        drop(command_tx);

        match session.await {
            Ok(summary) => debug!(
                frames = summary.frames,
                coins = summary.coins_collected,
                msgs_in,
                msgs_out,
                bytes_in,
                bytes_out,
                invalid_json,
                "client disconnected"
            ),
            Err(e) => warn!(error = %e, "session task failed"),
        }
    }
    .instrument(span)
    .await
}

struct ConnCtx {
    // Commands toward this connection's session task.
    pub command_tx: mpsc::Sender<SessionCommand>,
    // Serialized frames and HUD refreshes; lossy under backpressure.
    pub frames_rx: mpsc::Receiver<Utf8Bytes>,
    // Serialized overlays and skins; never dropped.
    pub events_rx: mpsc::UnboundedReceiver<Utf8Bytes>,

    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,

    pub invalid_json: u32,

    pub last_command_full_log: Option<Instant>,
    pub last_invalid_input_log: Option<Instant>,

    pub close_frame: Option<CloseFrame>,
}

enum LoopControl {
    Continue,
    Disconnect,
}

fn should_log(last: &mut Option<Instant>) -> bool {
    match last {
        Some(at) if at.elapsed() < LOG_THROTTLE => false,
        _ => {
            *last = Some(Instant::now());
            true
        }
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    // Split borrows so `tokio::select!` can hold them concurrently.
    let ConnCtx {
        command_tx,
        frames_rx,
        events_rx,
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        invalid_json,
        last_command_full_log,
        last_invalid_input_log,
        close_frame,
    } = ctx;

    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            // Drain one-off messages ahead of queued frames.
            biased;

            outgoing = events_rx.recv() => {
                match outgoing {
                    Some(bytes) => match forward_bytes(bytes, socket, msgs_out, bytes_out).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    None => {
                        fatal = Some(NetError::OutboundClosed);
                        true
                    }
                }
            }

            incoming = socket.recv() => {
                match handle_incoming_ws(
                    incoming,
                    command_tx,
                    msgs_in,
                    bytes_in,
                    invalid_json,
                    last_command_full_log,
                    last_invalid_input_log,
                    close_frame,
                ).await {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            outgoing = frames_rx.recv() => {
                match outgoing {
                    Some(bytes) => match forward_bytes(bytes, socket, msgs_out, bytes_out).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    None => {
                        fatal = Some(NetError::OutboundClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    command_tx: &mpsc::Sender<SessionCommand>,
    msgs_in: &mut u64,
    bytes_in: &mut u64,
    invalid_json: &mut u32,
    last_command_full_log: &mut Option<Instant>,
    last_invalid_input_log: &mut Option<Instant>,
    close_frame: &mut Option<CloseFrame>,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                *msgs_in += 1;
                *bytes_in += text.as_str().len() as u64;

                let msg = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(msg) => msg,
                    Err(e) => {
                        *invalid_json += 1;
                        if should_log(last_invalid_input_log) {
                            warn!(error = %e, count = *invalid_json, "invalid client message");
                        }
                        if *invalid_json > MAX_INVALID_JSON {
                            *close_frame = Some(CloseFrame {
                                code: close_code::POLICY,
                                reason: "too many invalid messages".into(),
                            });
                            return Ok(LoopControl::Disconnect);
                        }
                        return Ok(LoopControl::Continue);
                    }
                };

                // Unmapped keys are dropped silently; browsers send plenty of them.
                let Some(command) = msg.into_command() else {
                    return Ok(LoopControl::Continue);
                };
                forward_command(command, command_tx, last_command_full_log).await
            }
            Message::Binary(_) => {
                *close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

// Presses may be dropped under backpressure: the client re-sends them on key repeat and a lost
// press only costs a frame of movement. Releases, pause toggles and restarts change state that
// nothing later repairs, so they wait for room. The session task drains commands every loop
// iteration and never waits on this loop, so the wait is bounded.
async fn forward_command(
    command: SessionCommand,
    command_tx: &mpsc::Sender<SessionCommand>,
    last_command_full_log: &mut Option<Instant>,
) -> Result<LoopControl, NetError> {
    if !matches!(command, SessionCommand::Press(_)) {
        return match command_tx.send(command).await {
            Ok(()) => Ok(LoopControl::Continue),
            Err(_) => Err(NetError::SessionClosed),
        };
    }

    match command_tx.try_send(command) {
        Ok(()) => Ok(LoopControl::Continue),
        Err(TrySendError::Full(command)) => {
            if should_log(last_command_full_log) {
                warn!(?command, "command channel full; dropping key press");
            }
            Ok(LoopControl::Continue)
        }
        Err(TrySendError::Closed(_)) => Err(NetError::SessionClosed),
    }
}

async fn forward_bytes(
    msg: Utf8Bytes,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> LoopControl {
    let bytes_len = msg.as_str().len();
    match socket.send(Message::Text(msg)).await.map_err(NetError::Ws) {
        Ok(()) => {
            *msgs_out += 1;
            *bytes_out += bytes_len as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Disconnect follows immediately.
            warn!(error = ?err, "failed to send server message");
            LoopControl::Disconnect
        }
    }
}
