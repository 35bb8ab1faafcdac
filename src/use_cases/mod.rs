// Use cases layer: session lifecycle, scheduling, and the ports it drives.

pub mod game;
pub mod ports;
pub mod scheduler;
pub mod session;
pub mod types;

pub use game::{SessionServices, SessionSettings, session_task};
pub use ports::{ProgressService, Renderer, SkinCatalog, UpstreamError};
pub use session::{GameSession, TickReport};
pub use types::{
    Control, FrameState, HudState, Overlay, RunState, SessionCommand, SessionEvent,
    SessionSummary,
};
