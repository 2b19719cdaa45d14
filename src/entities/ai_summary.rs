//! AI summary entity - Stores precomputed feedback summaries per employee.
//!
//! One row per employee with separate manager-side and employee-side summary
//! text. Employees without a row fall back to a placeholder sentence at read
//! time rather than producing an error.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AI summary database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_summaries")]
pub struct Model {
    /// ID of the employee these summaries describe
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_id: String,
    /// Summary of manager-authored feedback across periods
    pub manager_summary: String,
    /// Summary of employee-authored feedback across periods
    pub employee_summary: String,
}

/// AI summaries have no enforced relationships; lookups are by employee id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
