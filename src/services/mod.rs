//! External service clients
//!
//! Currently holds the AI rewrite gateway used to reframe draft feedback
//! text before submission.

pub mod rewrite;

pub use rewrite::{RewriteClient, RewriteConfig, RewriteOutcome};
