use super::ports::{ProgressService, Renderer, SkinCatalog, load_skins};
use super::session::GameSession;
use super::types::{Overlay, RunState, SessionCommand, SessionEvent, SessionSummary};
use crate::domain::ResolvedSkins;
use crate::domain::tuning::GameTuning;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Frame pacing and gameplay tuning for session tasks.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Fixed frame interval for the simulation.
    pub tick_interval: Duration,
    /// HUD refresh interval, independent of run state.
    pub hud_interval: Duration,
    pub tuning: GameTuning,
}

/// Upstream collaborators shared by every session.
#[derive(Clone)]
pub struct SessionServices {
    pub progress: Arc<dyn ProgressService>,
    pub catalog: Arc<dyn SkinCatalog>,
}

// Results of fire-and-forget upstream calls that feed back into the session.
enum Feedback {
    SkinsLoaded(ResolvedSkins),
    WalletSynced(u64),
}

/// Drives one game session until its command channel closes.
///
/// The session is owned by this task alone; pausing or ending the game just stops it from
/// being ticked, and dropping the command sender tears everything down.
pub async fn session_task<R: Renderer>(
    username: Arc<str>,
    mut command_rx: mpsc::Receiver<SessionCommand>,
    mut renderer: R,
    services: SessionServices,
    settings: SessionSettings,
    rng: StdRng,
) -> SessionSummary {
    let epoch = Instant::now();
    let mut session = GameSession::new(settings.tuning, rng);
    let (feedback_tx, mut feedback_rx) = mpsc::unbounded_channel::<Feedback>();

    spawn_skin_load(&username, &services, &feedback_tx);

    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(%username, "session started");

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else {
                    // Client went away.
                    break;
                };
                let now = epoch.elapsed();
                handle_command(
                    command,
                    now,
                    &mut session,
                    &mut renderer,
                    &username,
                    &services,
                    &feedback_tx,
                );
            }

            Some(feedback) = feedback_rx.recv() => match feedback {
                Feedback::SkinsLoaded(skins) => renderer.apply_skins(&skins),
                Feedback::WalletSynced(coins) => session.set_wallet_coins(coins),
            },

            _ = interval.tick() => {
                let now = epoch.elapsed();
                if session.run_state().is_live() {
                    let report = session.tick(now);
                    for event in report.events {
                        dispatch_event(
                            event,
                            &mut session,
                            &mut renderer,
                            &username,
                            &services,
                            &feedback_tx,
                            now,
                        );
                    }
                    if let Some(frame) = report.frame {
                        renderer.render(&frame);
                    }
                }
                if session.hud_due(now, settings.hud_interval) {
                    renderer.update_hud(&session.hud(now));
                }
            }
        }
    }

    let summary = session.dispose();
    info!(
        %username,
        frames = summary.frames,
        coins = summary.coins_collected,
        survival_secs = summary.survival_time.map(|t| t.as_secs_f64()),
        "session closed"
    );
    summary
}

fn handle_command<R: Renderer>(
    command: SessionCommand,
    now: Duration,
    session: &mut GameSession,
    renderer: &mut R,
    username: &Arc<str>,
    services: &SessionServices,
    feedback_tx: &mpsc::UnboundedSender<Feedback>,
) {
    match command {
        SessionCommand::Press(control) => session.press(control),
        SessionCommand::Release(control) => session.release(control),
        SessionCommand::TogglePause => match session.toggle_pause(now) {
            Some(RunState::Paused) => {
                debug!(%username, "paused");
                renderer.show_overlay(&Overlay::Paused);
                renderer.render(&session.frame_state(now));
                renderer.update_hud(&session.hud(now));
            }
            Some(_) => {
                debug!(%username, "resumed");
                renderer.show_overlay(&Overlay::Cleared);
                renderer.update_hud(&session.hud(now));
            }
            None => {}
        },
        SessionCommand::Restart => {
            info!(%username, "session reset");
            session.reset();
            renderer.show_overlay(&Overlay::Cleared);
            renderer.update_hud(&session.hud(now));
            spawn_skin_load(username, services, feedback_tx);
        }
    }
}

fn dispatch_event<R: Renderer>(
    event: SessionEvent,
    session: &mut GameSession,
    renderer: &mut R,
    username: &Arc<str>,
    services: &SessionServices,
    feedback_tx: &mpsc::UnboundedSender<Feedback>,
    now: Duration,
) {
    match event {
        SessionEvent::Announced(text) => renderer.show_overlay(&Overlay::Announcement(text)),
        SessionEvent::CoinCollected { total } => {
            debug!(%username, total, "coin collected");
            spawn_coin_report(username, services, feedback_tx);
        }
        SessionEvent::GameOver { survival_time } => {
            info!(
                %username,
                survival_secs = survival_time.as_secs_f64(),
                coins = session.coin_count(),
                "game over"
            );
            renderer.show_overlay(&Overlay::GameOver { survival_time });
            renderer.update_hud(&session.hud(now));
            spawn_score_report(username, services, survival_time);
        }
    }
}

fn spawn_skin_load(
    username: &Arc<str>,
    services: &SessionServices,
    feedback_tx: &mpsc::UnboundedSender<Feedback>,
) {
    let username = username.clone();
    let catalog = services.catalog.clone();
    let feedback_tx = feedback_tx.clone();
    tokio::spawn(async move {
        match load_skins(catalog.as_ref(), &username).await {
            Ok(skins) => {
                debug!(%username, ?skins, "skins loaded");
                let _ = feedback_tx.send(Feedback::SkinsLoaded(skins));
            }
            Err(e) => warn!(%username, error = ?e, "failed to load skins; using default visuals"),
        }
    });
}

fn spawn_coin_report(
    username: &Arc<str>,
    services: &SessionServices,
    feedback_tx: &mpsc::UnboundedSender<Feedback>,
) {
    let username = username.clone();
    let progress = services.progress.clone();
    let feedback_tx = feedback_tx.clone();
    tokio::spawn(async move {
        match progress.add_coins(&username, 1).await {
            Ok(balance) => {
                debug!(%username, wallet = balance.coins, "coin credited");
                let _ = feedback_tx.send(Feedback::WalletSynced(balance.coins));
            }
            Err(e) => warn!(%username, error = ?e, "failed to credit coin"),
        }
    });
}

fn spawn_score_report(username: &Arc<str>, services: &SessionServices, survival_time: Duration) {
    let survival_secs = survival_time.as_secs_f64();
    if survival_secs <= 0.0 {
        // The score service rejects non-positive survival times.
        debug!(%username, "skipping score report for zero survival time");
        return;
    }

    let username = username.clone();
    let progress = services.progress.clone();
    tokio::spawn(async move {
        match progress.submit_score(&username, survival_secs).await {
            Ok(()) => info!(%username, survival_secs, "score submitted"),
            Err(e) => warn!(%username, survival_secs, error = ?e, "failed to submit score"),
        }
    });
}
