// Outbound HTTP clients for upstream services.

pub mod progress;

pub use progress::{ProgressClient, ScoreEntry};
