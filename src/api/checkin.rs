//! Check-in endpoints - read, submit, and clear the current period.

use super::{AppState, require_session};
use crate::{
    core::{
        checkin::{AuthorRole, EnvelopeDraft, PeriodRecord},
        directory,
        session::{Role, require_employee_access, require_role},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Warning attached to a submission that was accepted in memory but whose
/// snapshot write failed.
const PERSIST_WARNING: &str = "Submission accepted but not persisted; it may be lost on restart";

/// The current-period check-in state for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCheckin {
    /// Display label of the active period
    pub period: String,
    /// Whether the employee side has been submitted
    pub employee_submitted: bool,
    /// Whether the manager side has been submitted
    pub manager_submitted: bool,
    /// The record itself, absent when nothing has been submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PeriodRecord>,
}

/// Submission request body: the author side plus the draft fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Which side of the record this submission fills
    pub author_role: AuthorRole,
    /// The envelope content
    #[serde(flatten)]
    pub draft: EnvelopeDraft,
}

/// Submission response: the merged record, plus a warning when the
/// snapshot write failed and the submission lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// The employee's merged current-period record
    pub record: PeriodRecord,
    /// Present when the submission could not be persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Clear response, carrying a warning when the snapshot write failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    /// Present when the removal could not be persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Returns the current-period record and per-side submission flags.
pub async fn current(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<CurrentCheckin>> {
    let session = require_session(&state, &headers).await?;
    require_employee_access(&session, &id)?;

    let record = state.store.current(&id).await;
    let employee_submitted = record
        .as_ref()
        .is_some_and(|record| record.has_submission(AuthorRole::Employee));
    let manager_submitted = record
        .as_ref()
        .is_some_and(|record| record.has_submission(AuthorRole::Manager));

    Ok(Json(CurrentCheckin {
        period: state.store.period().to_string(),
        employee_submitted,
        manager_submitted,
        record,
    }))
}

/// Accepts a check-in submission for one employee.
///
/// Manager-side submissions require the manager role. Employee-side
/// submissions require the employee or manager role and must target the
/// caller's own id. The id must exist in the directory.
///
/// A failed snapshot write does not fail the request: the submission
/// stands in memory and the response carries a warning instead.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    let session = require_session(&state, &headers).await?;

    match request.author_role {
        AuthorRole::Manager => require_role(&session, &[Role::Manager])?,
        AuthorRole::Employee => {
            require_role(&session, &[Role::Employee, Role::Manager])?;
            if session.account_id != id {
                return Err(Error::Forbidden {
                    message: "Check-ins can only be submitted for your own id".to_string(),
                });
            }
        }
    }

    if directory::get_employee_by_id(&state.db, &id).await?.is_none() {
        return Err(Error::EmployeeNotFound { id });
    }

    match state.store.submit(&id, request.draft, request.author_role).await {
        Ok(record) => Ok(Json(SubmitResponse {
            record,
            warning: None,
        })),
        Err(Error::Storage { message }) => {
            warn!("Snapshot write failed after accepting submission for '{id}': {message}");
            match state.store.current(&id).await {
                Some(record) => Ok(Json(SubmitResponse {
                    record,
                    warning: Some(PERSIST_WARNING.to_string()),
                })),
                None => Err(Error::Storage { message }),
            }
        }
        Err(e) => Err(e),
    }
}

/// Removes an employee's current-period record. HR only.
///
/// Clearing an id with no record succeeds quietly, and a failed snapshot
/// write downgrades to a warning the same way submission does.
pub async fn clear(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ClearResponse>> {
    let session = require_session(&state, &headers).await?;
    require_role(&session, &[Role::Hr])?;

    match state.store.clear(&id).await {
        Ok(()) => Ok(Json(ClearResponse { warning: None })),
        Err(Error::Storage { message }) => {
            warn!("Snapshot write failed after clearing '{id}': {message}");
            Ok(Json(ClearResponse {
                warning: Some(PERSIST_WARNING.to_string()),
            }))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_employee_submits_own_checkin() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "employee@test.dev").await?;

        let response = submit(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft: employee_draft(),
            }),
        )
        .await?;

        assert!(response.0.warning.is_none());
        assert!(response.0.record.employee.is_some());
        assert!(response.0.record.manager.is_none());
        assert!(state.store.has_submitted("emp1", Some(AuthorRole::Employee)).await);

        Ok(())
    }

    #[tokio::test]
    async fn test_employee_cannot_submit_for_someone_else() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "employee@test.dev").await?;

        let result = submit(
            State(state),
            Path("emp2".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft: employee_draft(),
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_employee_cannot_author_manager_side() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "employee@test.dev").await?;

        let result = submit(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Manager,
                draft: manager_draft(),
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_manager_submits_feedback_for_report() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "manager@test.dev").await?;

        let response = submit(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Manager,
                draft: manager_draft(),
            }),
        )
        .await?;

        let manager_side = response.0.record.manager.unwrap();
        assert_eq!(manager_side.expectation, Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn test_hr_cannot_submit_checkins() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "hr@test.dev").await?;

        let result = submit(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft: employee_draft(),
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_employee() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "manager@test.dev").await?;

        let result = submit(
            State(state),
            Path("empx".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Manager,
                draft: manager_draft(),
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_cross_side_draft() -> Result<()> {
        let state = setup_test_state().await?;
        let session = login_as(&state, "employee@test.dev").await?;

        // An employee draft carrying a manager-only expectation rating.
        let mut draft = employee_draft();
        draft.expectation = Some(3);

        let result = submit(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&session.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft,
            }),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_current_reports_both_side_flags() -> Result<()> {
        let state = setup_test_state().await?;
        let employee = login_as(&state, "employee@test.dev").await?;
        let manager = login_as(&state, "manager@test.dev").await?;

        let before = current(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&employee.token),
        )
        .await?;
        assert!(!before.0.employee_submitted);
        assert!(!before.0.manager_submitted);
        assert!(before.0.record.is_none());
        assert_eq!(before.0.period, "September 2024");

        let _ = submit(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&employee.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft: employee_draft(),
            }),
        )
        .await?;
        let _ = submit(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&manager.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Manager,
                draft: manager_draft(),
            }),
        )
        .await?;

        let after = current(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&employee.token),
        )
        .await?;
        assert!(after.0.employee_submitted);
        assert!(after.0.manager_submitted);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_requires_hr() -> Result<()> {
        let state = setup_test_state().await?;
        let manager = login_as(&state, "manager@test.dev").await?;

        let result = clear(
            State(state),
            Path("emp1".to_string()),
            bearer_headers(&manager.token),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_hr_clears_a_checkin() -> Result<()> {
        let state = setup_test_state().await?;
        let employee = login_as(&state, "employee@test.dev").await?;
        let hr = login_as(&state, "hr@test.dev").await?;

        let _ = submit(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&employee.token),
            Json(SubmitRequest {
                author_role: AuthorRole::Employee,
                draft: employee_draft(),
            }),
        )
        .await?;

        let response = clear(
            State(state.clone()),
            Path("emp1".to_string()),
            bearer_headers(&hr.token),
        )
        .await?;
        assert!(response.0.warning.is_none());
        assert!(state.store.current("emp1").await.is_none());

        Ok(())
    }
}
