//! Session endpoints - login, introspection, and logout.

use super::{AppState, bearer_token, require_session};
use crate::{
    core::session::{self, Session},
    errors::{Error, Result},
};
use axum::{Json, extract::State, http::HeaderMap};
use serde::Deserialize;
use tracing::debug;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Verifies credentials and opens a session.
///
/// The response is the full session object; clients send its `token` back
/// as a bearer token on every other call.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>> {
    let account = session::authenticate(&state.db, &request.email, &request.password).await?;
    let session = state.sessions.open(&account).await?;
    Ok(Json(session))
}

/// Returns the session behind the request's bearer token.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Session>> {
    let session = require_session(&state, &headers).await?;
    Ok(Json(session))
}

/// Closes the session behind the request's bearer token.
///
/// Logging out twice is a no-op; the second call still succeeds so clients
/// can always treat logout as best-effort cleanup.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode> {
    let token = bearer_token(&headers).ok_or(Error::SessionRequired)?;
    if !state.sessions.close(token).await {
        debug!("Logout for a token with no open session");
    }
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::session::Role, test_utils::*};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_login_returns_session_with_role() -> Result<()> {
        let state = setup_test_state().await?;

        let response = login(
            State(state),
            Json(LoginRequest {
                email: "manager@test.dev".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await?;

        assert_eq!(response.0.account_id, "mgr1");
        assert_eq!(response.0.role, Role::Manager);
        assert!(!response.0.token.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() -> Result<()> {
        let state = setup_test_state().await?;

        let result = login(
            State(state),
            Json(LoginRequest {
                email: "manager@test.dev".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::InvalidCredentials));

        Ok(())
    }

    #[tokio::test]
    async fn test_me_returns_open_session() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "employee@test.dev").await?;

        let response = me(State(state), bearer_headers(&session.token)).await?;
        assert_eq!(response.0.account_id, "emp1");
        assert_eq!(response.0.name, "Ana Field");

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_closes_session() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "hr@test.dev").await?;

        let status = logout(State(state.clone()), bearer_headers(&session.token)).await?;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.sessions.resolve(&session.token).await.is_none());

        // A second logout with the same token is still a success.
        let status = logout(State(state), bearer_headers(&session.token)).await?;
        assert_eq!(status, StatusCode::NO_CONTENT);

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_requires_a_token() -> Result<()> {
        let state = setup_test_state().await?;

        let result = logout(State(state), HeaderMap::new()).await;
        assert!(matches!(result.unwrap_err(), Error::SessionRequired));

        Ok(())
    }
}
