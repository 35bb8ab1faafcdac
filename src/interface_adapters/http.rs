// Plain HTTP routes and shared response types.

use crate::interface_adapters::clients::ScoreEntry;
use crate::interface_adapters::state::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

/// Proxies the top scores from the progress service.
pub async fn leaderboard_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.progress.leaderboard().await {
        Ok(scores) => (StatusCode::OK, Json::<Vec<ScoreEntry>>(scores)).into_response(),
        Err(e) => {
            warn!(error = ?e, "leaderboard fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "leaderboard unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
