//! HTTP API layer - role-gated REST interface over the core modules
//!
//! This module wires the directory, check-in store, history assembly,
//! overview report, and rewrite gateway into an axum router. Every route
//! except `/health` and login requires a bearer token issued by the
//! session endpoint, and each handler enforces its own role rules before
//! touching the core.

/// Check-in read, submit, and clear endpoints
pub mod checkin;
/// Feedback history and AI summary endpoints
pub mod history;
/// HR overview endpoint
pub mod overview;
/// AI rewrite endpoint
pub mod rewrite;
/// Roster, directory search, and goal endpoints
pub mod roster;
/// Login, session introspection, and logout endpoints
pub mod session;

use crate::{
    core::{session::Session, store::CheckinStore},
    errors::{Error, Result},
    services::RewriteClient,
};
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared state available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for directory and history reads
    pub db: DatabaseConnection,
    /// Current-period check-in store
    pub store: Arc<CheckinStore>,
    /// Open login sessions
    pub sessions: Arc<crate::core::session::SessionManager>,
    /// Client for the AI rewrite webhook
    pub rewriter: Arc<RewriteClient>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::SessionRequired => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::EmployeeNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Config { .. } | Self::Storage { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Server-side failures keep their detail in the logs only.
        let message = if status.is_server_error() {
            error!("Request failed: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Extracts the bearer token from an Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the request's bearer token to an open session.
///
/// # Errors
/// Returns [`Error::SessionRequired`] when the header is missing, malformed,
/// or carries a token with no open session.
async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session> {
    let token = bearer_token(headers).ok_or(Error::SessionRequired)?;
    state
        .sessions
        .resolve(token)
        .await
        .ok_or(Error::SessionRequired)
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/session",
            post(session::login).get(session::me).delete(session::logout),
        )
        .route("/api/roster", get(roster::teams))
        .route("/api/employees", get(roster::search))
        .route("/api/employees/:id/goals", get(roster::goals))
        .route(
            "/api/employees/:id/checkin",
            get(checkin::current).post(checkin::submit).delete(checkin::clear),
        )
        .route("/api/employees/:id/history", get(history::history))
        .route("/api/employees/:id/summary", get(history::summary))
        .route("/api/overview", get(overview::overview))
        .route("/api/rewrite", post(rewrite::rewrite))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Binds the listener and serves the API until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
