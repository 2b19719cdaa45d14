//! Roster, directory search, and goal endpoints.

use super::{AppState, require_session};
use crate::{
    core::{
        directory, report,
        session::{Role, require_employee_access, require_role},
    },
    entities::employee,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

/// One employee as returned by roster and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    /// Employee id
    pub id: String,
    /// Full display name
    pub name: String,
    /// Avatar initials
    pub avatar: String,
    /// Work email
    pub email: String,
    /// Display name of the employee's manager
    pub manager: String,
    /// Overall goal progress percentage
    pub progress: i32,
    /// Team the employee belongs to
    pub team: String,
}

impl From<employee::Model> for EmployeeView {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            avatar: model.avatar,
            email: model.email,
            manager: model.manager_name,
            progress: model.progress,
            team: model.team,
        }
    }
}

/// One team with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    /// Team display name
    pub name: String,
    /// Members in roster order
    pub employees: Vec<EmployeeView>,
}

/// Query parameters for directory search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Name or email fragment; blank matches everyone
    #[serde(default)]
    pub search: String,
}

/// One goal as returned by the goal endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    /// Goal id
    pub id: String,
    /// Goal title
    pub title: String,
    /// Current status string (`on-track`, `needs-attention`, `off-track`)
    pub status: String,
    /// Completion percentage
    pub progress: i32,
}

/// Goals for one employee plus their rounded overall progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsResponse {
    /// Goals in roster order
    pub goals: Vec<GoalView>,
    /// Rounded mean of goal completion percentages
    pub overall_progress: i32,
}

/// Returns every team with its members. Managers and HR only.
pub async fn teams(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TeamView>>> {
    let session = require_session(&state, &headers).await?;
    require_role(&session, &[Role::Manager, Role::Hr])?;

    let rosters = directory::get_team_rosters(&state.db).await?;
    let teams = rosters
        .into_iter()
        .map(|roster| TeamView {
            name: roster.name,
            employees: roster.employees.into_iter().map(Into::into).collect(),
        })
        .collect();

    Ok(Json(teams))
}

/// Searches the directory by name or email. HR only.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<EmployeeView>>> {
    let session = require_session(&state, &headers).await?;
    require_role(&session, &[Role::Hr])?;

    let employees = directory::search_employees(&state.db, &params.search).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// Returns one employee's goals with their overall progress.
///
/// Unknown ids yield an empty list rather than an error, matching the
/// other read endpoints.
pub async fn goals(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<GoalsResponse>> {
    let session = require_session(&state, &headers).await?;
    require_employee_access(&session, &id)?;

    let goals = directory::get_goals_for_employee(&state.db, &id).await?;
    let overall_progress = report::overall_goal_progress(&goals);

    let goals = goals
        .into_iter()
        .map(|goal| GoalView {
            id: goal.id,
            title: goal.title,
            status: goal.status,
            progress: goal.progress,
        })
        .collect();

    Ok(Json(GoalsResponse {
        goals,
        overall_progress,
    }))
}
