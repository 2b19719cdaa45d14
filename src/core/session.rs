//! Login sessions and role gating.
//!
//! Authenticates accounts against the seeded directory and hands out bearer
//! tokens kept in an in-process map. Sessions are deliberately ephemeral; a
//! restart logs everyone out, which is acceptable for a demo-credential
//! deployment where passwords are stored and compared in plaintext.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organization-wide read access plus check-in administration
    Hr,
    /// Team visibility and manager-side submissions
    Manager,
    /// Own records and self check-ins only
    Employee,
}

impl Role {
    /// Returns the lowercase wire name of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Parses the role column of an account row.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for unknown role strings, since those can
    /// only come from a bad seed directory.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "hr" => Ok(Self::Hr),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            other => Err(Error::Config {
                message: format!("Unknown account role '{other}'"),
            }),
        }
    }
}

/// An authenticated session resolved from a bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token identifying this session
    pub token: String,
    /// Id of the account that logged in
    pub account_id: String,
    /// Role the account holds
    pub role: Role,
    /// Display name of the account
    pub name: String,
    /// Login email of the account
    pub email: String,
    /// Avatar initials of the account
    pub avatar: String,
}

/// Verifies login credentials against the accounts table.
///
/// # Errors
/// Returns [`Error::InvalidCredentials`] for unknown emails and wrong
/// passwords alike, so the response never reveals which accounts exist.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<account::Model> {
    let account = Account::find()
        .filter(account::Column::Email.eq(email))
        .one(db)
        .await?;

    match account {
        Some(account) if account.password == password => Ok(account),
        _ => Err(Error::InvalidCredentials),
    }
}

/// In-process registry of open sessions keyed by bearer token.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    /// Creates an empty session registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for an authenticated account under a fresh token.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the account row carries an unknown role.
    pub async fn open(&self, account: &account::Model) -> Result<Session> {
        let role = Role::parse(&account.role)?;
        let session = Session {
            token: Uuid::new_v4().to_string(),
            account_id: account.id.clone(),
            role,
            name: account.name.clone(),
            email: account.email.clone(),
            avatar: account.avatar.clone(),
        };

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        info!(
            "Opened {} session for account '{}'",
            role.as_str(),
            account.id
        );

        Ok(session)
    }

    /// Resolves a bearer token to its session, if still open.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Closes a session, returning whether one was open under the token.
    /// Closing an unknown token is a quiet no-op.
    pub async fn close(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// Checks that the session holds one of the allowed roles.
pub fn require_role(session: &Session, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&session.role) {
        return Ok(());
    }

    let roles: Vec<&str> = allowed.iter().map(|role| role.as_str()).collect();
    Err(Error::Forbidden {
        message: format!("This operation requires the {} role", roles.join(" or ")),
    })
}

/// Checks that the session may access records belonging to the given
/// employee. HR and managers can reach anyone; employees only themselves.
pub fn require_employee_access(session: &Session, employee_id: &str) -> Result<()> {
    match session.role {
        Role::Hr | Role::Manager => Ok(()),
        Role::Employee if session.account_id == employee_id => Ok(()),
        Role::Employee => Err(Error::Forbidden {
            message: "Employees can only access their own records".to_string(),
        }),
    }
}
