//! Employee entity - Represents one member of the seeded directory roster.
//!
//! Employees are grouped into teams and carry a precomputed overall progress
//! percentage. The `position` column preserves the order the directory file
//! listed them in, which drives roster and team display ordering.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee (e.g., `"emp1"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Full display name
    pub name: String,
    /// Short avatar initials (e.g., `"AB"`)
    pub avatar: String,
    /// Work email address
    pub email: String,
    /// Display name of this employee's manager
    pub manager_name: String,
    /// Overall goal progress percentage (0-100)
    pub progress: i32,
    /// Team this employee belongs to (e.g., `"Research"`)
    pub team: String,
    /// Seed-file ordering index, used to keep roster listings stable
    pub position: i32,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many goals
    #[sea_orm(has_many = "super::goal::Entity")]
    Goals,
    /// One employee has many archived feedback records
    #[sea_orm(has_many = "super::archived_feedback::Entity")]
    ArchivedFeedback,
}

impl Related<super::goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl Related<super::archived_feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArchivedFeedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
