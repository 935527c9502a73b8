//! Handler exposing the tail of the diagnostic log file.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::log::{LogTailQuery, LogTailResponse};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_TAIL_LINES: usize = 30;
const MAX_TAIL_LINES: usize = 500;

/// Returns the last N lines of the configured log file.
///
/// # Endpoint
///
/// `GET /api/log/tail?lines=30`
///
/// # Errors
///
/// Returns 404 when no log file is configured and 500 when it cannot be
/// read.
pub async fn log_tail_handler(
    State(state): State<AppState>,
    Query(query): Query<LogTailQuery>,
) -> Result<Json<LogTailResponse>, AppError> {
    let Some(path) = state.log_file.clone() else {
        return Err(AppError::not_found(
            "No log file configured",
            json!({ "hint": "set LOG_FILE to enable the diagnostic log" }),
        ));
    };

    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        AppError::internal(
            "Failed to read log file",
            json!({ "file": path.display().to_string(), "reason": e.to_string() }),
        )
    })?;

    let requested = query.lines.unwrap_or(DEFAULT_TAIL_LINES).min(MAX_TAIL_LINES);
    let all: Vec<&str> = content.lines().collect();
    let lines = all[all.len().saturating_sub(requested)..]
        .iter()
        .map(|s| s.to_string())
        .collect();

    Ok(Json(LogTailResponse {
        file: path.display().to_string(),
        lines,
    }))
}
