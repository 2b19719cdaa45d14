/// Check-in domain types and the submission merge rule
pub mod checkin;

/// Directory read model over the seeded roster
pub mod directory;

/// Feedback history assembly across live and archived periods
pub mod history;

/// Organization overview reporting
pub mod report;

/// Login sessions and role gating
pub mod session;

/// Current-period check-in store with durable snapshots
pub mod store;
