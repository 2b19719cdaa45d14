//! Goal entity - Represents one performance goal assigned to an employee.
//!
//! Goals carry a baseline status and progress percentage from the seed
//! directory. Check-in submissions reference goals by id and layer per-period
//! status updates on top without mutating these rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Goal database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    /// Unique identifier for the goal (e.g., `"goal1"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// ID of the employee this goal belongs to
    pub employee_id: String,
    /// Human-readable goal title
    pub title: String,
    /// Baseline status: `"on-track"`, `"needs-attention"`, or `"off-track"`
    pub status: String,
    /// Completion percentage (0-100)
    pub progress: i32,
    /// Seed-file ordering index within the employee's goal list
    pub position: i32,
}

/// Defines relationships between Goal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each goal belongs to one employee
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
