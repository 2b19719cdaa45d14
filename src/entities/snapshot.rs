//! Snapshot entity - Stores durable copies of the in-memory check-in store.
//!
//! The whole current-period store is serialized to JSON and written under a
//! single fixed key, mirroring how the previous browser build kept the store
//! in one `localStorage` entry. Only one row per key ever exists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Store snapshot database model - stores serialized store state by key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_snapshots")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Snapshot key (e.g., `"current_feedback"`)
    pub key: String,
    /// Serialized store state as a JSON string
    pub value: String,
    /// When this snapshot was last written
    pub updated_at: DateTime,
}

/// Snapshots have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
