//! AI rewrite endpoint.

use super::{AppState, require_session};
use crate::{
    errors::{Error, Result},
    services::RewriteOutcome,
};
use axum::{Json, extract::State, http::HeaderMap};
use serde::Deserialize;

/// Rewrite request body.
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    /// The draft text to reframe
    pub text: String,
}

/// Sends draft feedback text to the rewrite webhook.
///
/// Any logged-in role may use this. The response is always 200: webhook
/// failures come back as a `failed` outcome carrying the original text,
/// so clients can fall back to the author's own words.
pub async fn rewrite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteOutcome>> {
    require_session(&state, &headers).await?;

    if request.text.trim().is_empty() {
        return Err(Error::Validation {
            message: "Rewrite text cannot be empty".to_string(),
        });
    }

    let outcome = state.rewriter.rewrite(&request.text).await;
    Ok(Json(outcome))
}
