//! Account entity - Represents a login account for the check-in system.
//!
//! Each account carries the credentials and role used to gate access to the
//! API. Accounts whose id matches an employee id in the directory can submit
//! their own check-ins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account (e.g., `"hr1"`, `"emp1"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Login email, unique across accounts
    pub email: String,
    /// Plaintext demo password, compared verbatim at login
    pub password: String,
    /// Role string: `"hr"`, `"manager"`, or `"employee"`
    pub role: String,
    /// Display name shown in the session
    pub name: String,
    /// Short avatar initials (e.g., `"SW"`)
    pub avatar: String,
}

/// Accounts have no foreign-key relationships; the link to employees is by
/// shared id convention only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
