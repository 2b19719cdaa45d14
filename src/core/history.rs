//! Feedback history assembly.
//!
//! Builds the month-by-month feedback view for one employee: the live
//! current-period record first (when anything has been submitted), then the
//! archived months newest first. Goal references inside envelopes are joined
//! against the goal directory; ids that no longer resolve are dropped, and a
//! malformed archived side is skipped with a warning while the rest of the
//! month still renders.

use crate::{
    core::{
        checkin::{FeedbackEnvelope, GoalEntry, GoalStatus, HealthCheck},
        directory,
        store::CheckinStore,
    },
    entities::goal,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// One author's feedback as stored for a closed period.
///
/// Unlike current-period envelopes these carry their author name and display
/// date verbatim, since the roster that produced them may have changed since
/// the period closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedEnvelope {
    /// Display name of whoever wrote the feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Display date the feedback was given (e.g., `"2024-08-30"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Free-text summary of the feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Meeting-expectations rating, manager-side records only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation: Option<u8>,
    /// Per-goal entries keyed by goal id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub goals: BTreeMap<String, GoalEntry>,
    /// Wellbeing answers, employee-side records only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
}

/// One goal line in a history entry, joined against the goal directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatusLine {
    /// Id of the referenced goal
    pub goal_id: String,
    /// Goal title from the directory
    pub title: String,
    /// Status the author reported, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    /// Per-goal feedback text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// One author's feedback prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFeedback {
    /// Display name of the author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Display date of the submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Free-text summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Meeting-expectations rating, manager side only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expectation: Option<u8>,
    /// Goal lines that resolved against the directory
    pub goal_statuses: Vec<GoalStatusLine>,
    /// Wellbeing answers, employee side only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
}

/// One month of feedback for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Display label of the month (e.g., `"August 2024"`)
    pub month: String,
    /// Whether this is the live current-period record
    pub is_current: bool,
    /// Manager-side feedback, if submitted that month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_feedback: Option<HistoryFeedback>,
    /// Employee-side feedback, if submitted that month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_feedback: Option<HistoryFeedback>,
}

/// Assembles the complete feedback history for one employee.
///
/// The current-period record leads the list when the employee or their
/// manager has submitted this period, followed by archived months newest
/// first. Employees unknown to the directory simply produce whatever the
/// store and archive hold for the id, which is typically nothing.
pub async fn assemble_history(
    db: &DatabaseConnection,
    store: &CheckinStore,
    employee_id: &str,
) -> Result<Vec<HistoryEntry>> {
    let goals = directory::get_goals_for_employee(db, employee_id).await?;
    let employee = directory::get_employee_by_id(db, employee_id).await?;

    let mut entries = Vec::new();

    if let Some(record) = store.current(employee_id).await {
        if record.has_any_submission() {
            let manager_author = employee.as_ref().map(|e| e.manager_name.clone());
            let employee_author = employee.as_ref().map(|e| e.name.clone());

            entries.push(HistoryEntry {
                month: record.month.clone(),
                is_current: true,
                manager_feedback: record
                    .manager
                    .as_ref()
                    .map(|envelope| from_current(envelope, manager_author, &goals)),
                employee_feedback: record
                    .employee
                    .as_ref()
                    .map(|envelope| from_current(envelope, employee_author, &goals)),
            });
        }
    }

    for row in directory::get_archived_feedback_for_employee(db, employee_id).await? {
        let manager_feedback = parse_archived_side(row.manager_json.as_deref(), &row.month, employee_id)
            .map(|envelope| from_archived(envelope, &goals));
        let employee_feedback =
            parse_archived_side(row.employee_json.as_deref(), &row.month, employee_id)
                .map(|envelope| from_archived(envelope, &goals));

        entries.push(HistoryEntry {
            month: row.month,
            is_current: false,
            manager_feedback,
            employee_feedback,
        });
    }

    Ok(entries)
}

/// Converts a live envelope into display form, deriving the author from the
/// roster and the date from the submission timestamp.
fn from_current(
    envelope: &FeedbackEnvelope,
    author: Option<String>,
    goals: &[goal::Model],
) -> HistoryFeedback {
    HistoryFeedback {
        author,
        date: Some(envelope.submitted_at.format("%Y-%m-%d").to_string()),
        content: envelope.content.clone(),
        expectation: envelope.expectation,
        goal_statuses: join_goal_statuses(&envelope.goals, goals),
        health_check: envelope.health_check.clone(),
    }
}

/// Converts an archived envelope into display form, keeping its stored
/// author and date.
fn from_archived(envelope: ArchivedEnvelope, goals: &[goal::Model]) -> HistoryFeedback {
    HistoryFeedback {
        author: envelope.author,
        date: envelope.date,
        content: envelope.content,
        expectation: envelope.expectation,
        goal_statuses: join_goal_statuses(&envelope.goals, goals),
        health_check: envelope.health_check,
    }
}

/// Parses one archived JSON side, skipping it with a warning if malformed.
fn parse_archived_side(
    payload: Option<&str>,
    month: &str,
    employee_id: &str,
) -> Option<ArchivedEnvelope> {
    let payload = payload?;
    match serde_json::from_str(payload) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            warn!("Skipping malformed archived feedback for '{employee_id}' in {month}: {e}");
            None
        }
    }
}

/// Joins envelope goal entries against the goal directory, in directory
/// order. Entries whose goal id no longer resolves are dropped.
fn join_goal_statuses(
    entries: &BTreeMap<String, GoalEntry>,
    goals: &[goal::Model],
) -> Vec<GoalStatusLine> {
    goals
        .iter()
        .filter_map(|goal| {
            entries.get(&goal.id).map(|entry| GoalStatusLine {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                status: entry.status,
                feedback: entry.feedback.clone(),
            })
        })
        .collect()
}
