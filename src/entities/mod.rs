//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod ai_summary;
pub mod archived_feedback;
pub mod employee;
pub mod goal;
pub mod snapshot;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use ai_summary::{Column as AiSummaryColumn, Entity as AiSummary, Model as AiSummaryModel};
pub use archived_feedback::{
    Column as ArchivedFeedbackColumn, Entity as ArchivedFeedback, Model as ArchivedFeedbackModel,
};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use goal::{Column as GoalColumn, Entity as Goal, Model as GoalModel};
pub use snapshot::{Column as SnapshotColumn, Entity as Snapshot, Model as SnapshotModel};
