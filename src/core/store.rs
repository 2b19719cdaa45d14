//! Current-period check-in store.
//!
//! Holds every employee's current-period record in memory behind a
//! [`tokio::sync::RwLock`] and mirrors the whole map to a single fixed-key row
//! in the `store_snapshots` table after each mutation. The snapshot is the
//! same JSON object the previous browser build kept in `localStorage`, under
//! the same key, so existing payloads restore cleanly.
//!
//! Reads never touch the database. Writes hold the lock across merge and
//! persist so concurrent submissions serialize and every snapshot reflects a
//! consistent store. A failed snapshot write surfaces as [`Error::Storage`]
//! but the in-memory merge stands; memory stays authoritative for the rest of
//! the process lifetime.

use crate::{
    core::checkin::{AuthorRole, EnvelopeDraft, PeriodRecord, merge_submission},
    entities::{Snapshot, snapshot},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Fixed snapshot key, kept identical to the browser build's storage key.
pub const SNAPSHOT_KEY: &str = "current_feedback";

/// In-memory store of current-period check-in records keyed by employee id,
/// with write-through JSON snapshots.
pub struct CheckinStore {
    db: DatabaseConnection,
    period: String,
    records: RwLock<BTreeMap<String, PeriodRecord>>,
}

impl CheckinStore {
    /// Builds a store for the given period, restoring records from the
    /// durable snapshot when one exists.
    ///
    /// Never fails: an absent, unreadable, or malformed snapshot yields an
    /// empty store so the service always starts. Malformed payloads are
    /// logged and left in place until the next successful write replaces them.
    pub async fn load(db: DatabaseConnection, period: impl Into<String>) -> Self {
        let period = period.into();

        let records = match read_snapshot(&db).await {
            Ok(Some(row)) => match serde_json::from_str::<BTreeMap<String, PeriodRecord>>(
                &row.value,
            ) {
                Ok(records) => {
                    info!(
                        "Restored {} check-in record(s) from snapshot for period '{}'",
                        records.len(),
                        period
                    );
                    records
                }
                Err(e) => {
                    warn!("Check-in snapshot is malformed, starting with an empty store: {e}");
                    BTreeMap::new()
                }
            },
            Ok(None) => {
                debug!("No check-in snapshot found, starting with an empty store");
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Failed to read check-in snapshot, starting with an empty store: {e}");
                BTreeMap::new()
            }
        };

        Self {
            db,
            period,
            records: RwLock::new(records),
        }
    }

    /// Display label of the period this store collects check-ins for.
    #[must_use]
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Accepts a submission for one employee and persists the updated store.
    ///
    /// The draft is stamped with the current time, merged into the employee's
    /// record (replacing the author's own side, preserving the other), and the
    /// whole store is written to the snapshot row. Returns the merged record.
    ///
    /// # Errors
    /// * [`Error::Validation`] if the employee id is empty or the draft is
    ///   malformed for the author side
    /// * [`Error::Storage`] if the snapshot write fails; the in-memory merge
    ///   is not rolled back and readers continue to see the submission
    pub async fn submit(
        &self,
        employee_id: &str,
        draft: EnvelopeDraft,
        author: AuthorRole,
    ) -> Result<PeriodRecord> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(Error::Validation {
                message: "Employee id cannot be empty".to_string(),
            });
        }
        draft.validate(author)?;

        let envelope = draft.into_envelope(Utc::now());

        // Write lock held across merge and persist so snapshot writes are
        // serialized and each one sees a consistent store.
        let mut records = self.records.write().await;
        let existing = records.remove(employee_id);
        let record = merge_submission(existing, &self.period, envelope, author);
        records.insert(employee_id.to_string(), record.clone());

        info!(
            "Recorded {} submission for '{}' in period '{}'",
            author.as_str(),
            employee_id,
            self.period
        );

        let payload = serialize_records(&records)?;
        write_snapshot(&self.db, payload).await?;

        Ok(record)
    }

    /// Returns the current-period record for one employee, or None if nothing
    /// has been submitted for them.
    pub async fn current(&self, employee_id: &str) -> Option<PeriodRecord> {
        self.records.read().await.get(employee_id).cloned()
    }

    /// Whether the employee has a submitted envelope this period.
    ///
    /// With an author given, checks that side only; with None, either side
    /// counts.
    pub async fn has_submitted(&self, employee_id: &str, author: Option<AuthorRole>) -> bool {
        let records = self.records.read().await;
        records.get(employee_id).is_some_and(|record| {
            author.map_or_else(
                || record.has_any_submission(),
                |author| record.has_submission(author),
            )
        })
    }

    /// Removes an employee's current-period record and persists the updated
    /// store. Clearing an id with no record is a no-op, not an error.
    ///
    /// # Errors
    /// * [`Error::Storage`] if the snapshot write fails; the in-memory
    ///   removal is not rolled back
    pub async fn clear(&self, employee_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if records.remove(employee_id).is_none() {
            debug!("No current check-in to clear for '{}'", employee_id);
            return Ok(());
        }

        info!("Cleared current check-in for '{}'", employee_id);

        let payload = serialize_records(&records)?;
        write_snapshot(&self.db, payload).await
    }

    /// Returns a copy of every current-period record keyed by employee id.
    pub async fn all_current(&self) -> BTreeMap<String, PeriodRecord> {
        self.records.read().await.clone()
    }
}

fn serialize_records(records: &BTreeMap<String, PeriodRecord>) -> Result<String> {
    serde_json::to_string(records).map_err(|e| Error::Storage {
        message: format!("Failed to serialize store snapshot: {e}"),
    })
}

/// Reads the snapshot row for [`SNAPSHOT_KEY`], if one exists.
async fn read_snapshot(db: &DatabaseConnection) -> Result<Option<snapshot::Model>> {
    Snapshot::find()
        .filter(snapshot::Column::Key.eq(SNAPSHOT_KEY))
        .one(db)
        .await
        .map_err(|e| Error::Storage {
            message: format!("Failed to read store snapshot: {e}"),
        })
}

/// Writes the serialized store under [`SNAPSHOT_KEY`], updating the existing
/// row when present so only one row per key ever exists.
async fn write_snapshot(db: &DatabaseConnection, payload: String) -> Result<()> {
    let now = Utc::now().naive_utc();

    let existing = Snapshot::find()
        .filter(snapshot::Column::Key.eq(SNAPSHOT_KEY))
        .one(db)
        .await
        .map_err(|e| Error::Storage {
            message: format!("Failed to read store snapshot: {e}"),
        })?;

    if let Some(row) = existing {
        let mut active_model: snapshot::ActiveModel = row.into();
        active_model.value = Set(payload);
        active_model.updated_at = Set(now);
        active_model.update(db).await.map_err(|e| Error::Storage {
            message: format!("Failed to update store snapshot: {e}"),
        })?;
    } else {
        let new_row = snapshot::ActiveModel {
            key: Set(SNAPSHOT_KEY.to_string()),
            value: Set(payload),
            updated_at: Set(now),
            ..Default::default()
        };
        new_row.insert(db).await.map_err(|e| Error::Storage {
            message: format!("Failed to write store snapshot: {e}"),
        })?;
    }

    Ok(())
}
