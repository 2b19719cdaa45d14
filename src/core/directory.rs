//! Directory read model - Lookups over the seeded roster.
//!
//! Provides query functions for employees, teams, goals, archived feedback,
//! and AI summaries. All data here comes from the seed directory file and is
//! read-only at runtime; check-in submissions never mutate these tables.
//! Lookup misses resolve to empty or placeholder results rather than errors
//! so display paths degrade gracefully.

use crate::{
    entities::{
        AiSummary, ArchivedFeedback, Employee, Goal, archived_feedback, employee, goal,
    },
    errors::Result,
};
use sea_orm::{Condition, QueryOrder, prelude::*};
use serde::Serialize;

/// Placeholder returned when an employee has no stored AI summary.
pub const SUMMARY_PLACEHOLDER: &str = "No feedback summary available yet.";

/// One team with its members in seed order.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    /// Team display name
    pub name: String,
    /// Members in the order the directory file listed them
    pub employees: Vec<employee::Model>,
}

/// AI summary pair for one employee. Falls back to [`SUMMARY_PLACEHOLDER`]
/// on both sides when no summary row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummaryView {
    /// Summary of manager-authored feedback
    pub manager_summary: String,
    /// Summary of employee-authored feedback
    pub employee_summary: String,
}

/// Finds an employee by id, returning None for ids not in the directory.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every employee in the directory in seed order.
pub async fn get_all_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .order_by_asc(employee::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Searches employees by name or email, case-insensitively.
///
/// A blank term matches everyone, mirroring how the directory search box
/// behaves before anything is typed.
pub async fn search_employees(
    db: &DatabaseConnection,
    term: &str,
) -> Result<Vec<employee::Model>> {
    let pattern = term.trim();

    Employee::find()
        .filter(
            Condition::any()
                .add(employee::Column::Name.contains(pattern))
                .add(employee::Column::Email.contains(pattern)),
        )
        .order_by_asc(employee::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Groups the directory into teams, both teams and members in seed order.
pub async fn get_team_rosters(db: &DatabaseConnection) -> Result<Vec<TeamRoster>> {
    let employees = get_all_employees(db).await?;

    let mut rosters: Vec<TeamRoster> = Vec::new();
    for member in employees {
        match rosters.iter_mut().find(|roster| roster.name == member.team) {
            Some(roster) => roster.employees.push(member),
            None => rosters.push(TeamRoster {
                name: member.team.clone(),
                employees: vec![member],
            }),
        }
    }

    Ok(rosters)
}

/// Retrieves an employee's goals in seed order. Unknown employees get an
/// empty list.
pub async fn get_goals_for_employee(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Vec<goal::Model>> {
    Goal::find()
        .filter(goal::Column::EmployeeId.eq(employee_id))
        .order_by_asc(goal::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an employee's archived feedback rows, newest period first.
/// Unknown employees get an empty list.
pub async fn get_archived_feedback_for_employee(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Vec<archived_feedback::Model>> {
    ArchivedFeedback::find()
        .filter(archived_feedback::Column::EmployeeId.eq(employee_id))
        .order_by_asc(archived_feedback::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the AI summary pair for an employee, substituting the
/// placeholder sentence on both sides when none is stored.
pub async fn get_summary_for_employee(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<AiSummaryView> {
    let summary = AiSummary::find_by_id(employee_id).one(db).await?;

    Ok(summary.map_or_else(
        || AiSummaryView {
            manager_summary: SUMMARY_PLACEHOLDER.to_string(),
            employee_summary: SUMMARY_PLACEHOLDER.to_string(),
        },
        |row| AiSummaryView {
            manager_summary: row.manager_summary,
            employee_summary: row.employee_summary,
        },
    ))
}
