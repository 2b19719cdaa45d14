//! Check-in domain types and the submission merge rule.
//!
//! Defines the envelope that one author (employee or manager) submits for one
//! period, the per-employee record that pairs both sides, and the pure merge
//! function the store applies on every submission. Serialized field names are
//! camelCase so snapshots stay readable by anything that consumed the previous
//! browser build's `localStorage` payload.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who authored a feedback envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// Self check-in written by the employee
    Employee,
    /// Check-in written by the employee's manager
    Manager,
}

impl AuthorRole {
    /// Returns the lowercase wire name of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

/// Status of a goal as reported in a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// Goal is progressing as planned
    OnTrack,
    /// Goal needs attention to stay on schedule
    NeedsAttention,
    /// Goal has fallen behind
    OffTrack,
}

impl GoalStatus {
    /// Returns the kebab-case wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::NeedsAttention => "needs-attention",
            Self::OffTrack => "off-track",
        }
    }
}

/// Submission state of an envelope. Only submitted envelopes are ever stored;
/// the variant exists so the serialized payload carries an explicit
/// `"status": "submitted"` marker that readers check before counting a side
/// as complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// The envelope was submitted and is complete
    Submitted,
}

/// Per-goal entry inside an envelope: an optional status update and optional
/// free-text feedback keyed by goal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    /// Updated status for the goal, if the author set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    /// Free-text feedback about the goal, if the author wrote any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Employee wellbeing answers attached to self check-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// Work enjoyment rating on a 1-5 scale
    pub enjoy_work: u8,
    /// Whether the employee feels supported by their manager
    pub manager_support: bool,
    /// Free-text description of current blockers, may be empty
    pub blockers: String,
}

/// One author's complete submission for one period.
///
/// Employee envelopes carry goal entries and a health check; manager envelopes
/// carry an expectation rating. Both carry free-text content. The structure is
/// permissive on read so envelopes written by older builds (which embedded
/// extra display fields) still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEnvelope {
    /// Free-text summary of the check-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Per-goal entries keyed by goal id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub goals: BTreeMap<String, GoalEntry>,
    /// Wellbeing answers, employee-authored envelopes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    /// Meeting-expectations rating (1-5), manager-authored envelopes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation: Option<u8>,
    /// When the envelope was submitted
    pub submitted_at: DateTime<Utc>,
    /// Always `Submitted` for stored envelopes
    pub status: SubmissionStatus,
}

/// Current-period record for one employee: the period label plus up to one
/// envelope per author side. The employee id is the store key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Display label of the period this record belongs to (e.g., `"September 2024"`)
    pub month: String,
    /// Employee-authored envelope, if submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<FeedbackEnvelope>,
    /// Manager-authored envelope, if submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<FeedbackEnvelope>,
}

impl PeriodRecord {
    /// Returns the envelope for the given author side, if present.
    #[must_use]
    pub const fn envelope_for(&self, author: AuthorRole) -> Option<&FeedbackEnvelope> {
        match author {
            AuthorRole::Employee => self.employee.as_ref(),
            AuthorRole::Manager => self.manager.as_ref(),
        }
    }

    /// Whether the given author side has a submitted envelope.
    #[must_use]
    pub fn has_submission(&self, author: AuthorRole) -> bool {
        self.envelope_for(author)
            .is_some_and(|envelope| envelope.status == SubmissionStatus::Submitted)
    }

    /// Whether either author side has a submitted envelope.
    #[must_use]
    pub fn has_any_submission(&self) -> bool {
        self.has_submission(AuthorRole::Employee) || self.has_submission(AuthorRole::Manager)
    }
}

/// Caller-supplied envelope content before the store stamps it.
///
/// Drafts carry everything an author fills in; the store adds the submission
/// timestamp and status when accepting one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDraft {
    /// Free-text summary of the check-in
    #[serde(default)]
    pub content: Option<String>,
    /// Per-goal entries keyed by goal id
    #[serde(default)]
    pub goals: BTreeMap<String, GoalEntry>,
    /// Wellbeing answers, employee-authored drafts only
    #[serde(default)]
    pub health_check: Option<HealthCheck>,
    /// Meeting-expectations rating (1-5), manager-authored drafts only
    #[serde(default)]
    pub expectation: Option<u8>,
}

impl EnvelopeDraft {
    /// Checks that this draft is well formed for the given author side.
    ///
    /// Health checks belong to employee submissions and expectation ratings to
    /// manager submissions; both ratings must be within the 1-5 scale.
    pub fn validate(&self, author: AuthorRole) -> Result<()> {
        match author {
            AuthorRole::Employee => {
                if self.expectation.is_some() {
                    return Err(Error::Validation {
                        message: "employee submissions cannot carry an expectation rating"
                            .to_string(),
                    });
                }
            }
            AuthorRole::Manager => {
                if self.health_check.is_some() {
                    return Err(Error::Validation {
                        message: "manager submissions cannot carry a health check".to_string(),
                    });
                }
            }
        }

        if let Some(health_check) = &self.health_check {
            if !(1..=5).contains(&health_check.enjoy_work) {
                return Err(Error::Validation {
                    message: format!(
                        "enjoyWork rating must be between 1 and 5, got {}",
                        health_check.enjoy_work
                    ),
                });
            }
        }

        if let Some(expectation) = self.expectation {
            if !(1..=5).contains(&expectation) {
                return Err(Error::Validation {
                    message: format!("expectation rating must be between 1 and 5, got {expectation}"),
                });
            }
        }

        Ok(())
    }

    /// Stamps this draft into a submitted envelope.
    #[must_use]
    pub fn into_envelope(self, submitted_at: DateTime<Utc>) -> FeedbackEnvelope {
        FeedbackEnvelope {
            content: self.content,
            goals: self.goals,
            health_check: self.health_check,
            expectation: self.expectation,
            submitted_at,
            status: SubmissionStatus::Submitted,
        }
    }
}

/// Merges a stamped envelope into an employee's current-period record.
///
/// The envelope replaces the author's own side completely while the other
/// side is carried over untouched, so an employee and their manager can
/// submit in either order without clobbering each other. The month label is
/// always reset to the active period. Resubmitting is an upsert: applying the
/// same envelope twice yields the same record.
#[must_use]
pub fn merge_submission(
    existing: Option<PeriodRecord>,
    month: &str,
    envelope: FeedbackEnvelope,
    author: AuthorRole,
) -> PeriodRecord {
    let mut record = existing.unwrap_or_else(|| PeriodRecord {
        month: month.to_string(),
        employee: None,
        manager: None,
    });

    record.month = month.to_string();
    match author {
        AuthorRole::Employee => record.employee = Some(envelope),
        AuthorRole::Manager => record.manager = Some(envelope),
    }

    record
}
