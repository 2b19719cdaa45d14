//! HR overview endpoint.

use super::{AppState, require_session};
use crate::{
    core::{
        report::{self, OverviewReport},
        session::{Role, require_role},
    },
    errors::Result,
};
use axum::{Json, extract::State, http::HeaderMap};

/// Returns the organization-wide overview. HR only.
pub async fn overview(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OverviewReport>> {
    let session = require_session(&state, &headers).await?;
    require_role(&session, &[Role::Hr])?;

    let report = report::generate_overview(&state.db, &state.store).await?;
    Ok(Json(report))
}
