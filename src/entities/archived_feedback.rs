//! Archived feedback entity - Stores closed-period feedback records.
//!
//! Each row holds one past month for one employee. The manager and employee
//! sides are stored as JSON text columns because archived envelopes are only
//! ever read back whole; the history assembler parses them on demand and
//! tolerates malformed payloads by skipping the affected side.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Archived feedback database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "archived_feedback")]
pub struct Model {
    /// Unique identifier for the archived record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the employee this record belongs to
    pub employee_id: String,
    /// Display label of the archived period (e.g., `"August 2024"`)
    pub month: String,
    /// Ordering index, newest period first
    pub position: i32,
    /// Manager-side envelope serialized as JSON, None if never submitted
    pub manager_json: Option<String>,
    /// Employee-side envelope serialized as JSON, None if never submitted
    pub employee_json: Option<String>,
}

/// Defines relationships between archived feedback and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each archived record belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
