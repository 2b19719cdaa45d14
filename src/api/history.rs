//! Feedback history and AI summary endpoints.

use super::{AppState, require_session};
use crate::{
    core::{
        directory::{self, AiSummaryView},
        history::{self, HistoryEntry},
        session::require_employee_access,
    },
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

/// Returns an employee's feedback history, current period first when it
/// has a submission, followed by archived months newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<HistoryEntry>>> {
    let session = require_session(&state, &headers).await?;
    require_employee_access(&session, &id)?;

    let entries = history::assemble_history(&state.db, &state.store, &id).await?;
    Ok(Json(entries))
}

/// Returns an employee's AI feedback summary pair, with placeholders when
/// none is stored.
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<AiSummaryView>> {
    let session = require_session(&state, &headers).await?;
    require_employee_access(&session, &id)?;

    let summary = directory::get_summary_for_employee(&state.db, &id).await?;
    Ok(Json(summary))
}
