//! Shared test utilities for `CheckinBuddy`.
//!
//! This module provides common helper functions for setting up test databases,
//! seeding a small directory fixture, and building API state with logged-in
//! sessions.

use crate::{
    api::AppState,
    config::directory::{DirectoryFile, seed_directory},
    core::{
        checkin::{EnvelopeDraft, GoalEntry, GoalStatus, HealthCheck},
        session::{self, Session, SessionManager},
        store::CheckinStore,
    },
    errors::{Error, Result},
    services::{RewriteClient, rewrite::RewriteConfig},
};
use axum::http::{HeaderMap, header};
use sea_orm::DatabaseConnection;
use std::{collections::BTreeMap, sync::Arc};

/// Period label used by every store-backed test.
pub const TEST_PERIOD: &str = "September 2024";

/// Small directory fixture: three accounts, two teams, goals and history
/// for `emp1` only. The derived numbers several tests assert: Research
/// averages 70, Design 90, the organization 77, and emp1's goals 68.
pub const TEST_DIRECTORY_TOML: &str = r#"
    [[accounts]]
    id = "hr1"
    email = "hr@test.dev"
    password = "pw"
    role = "hr"
    name = "Iris Kane"
    avatar = "IK"

    [[accounts]]
    id = "mgr1"
    email = "manager@test.dev"
    password = "pw"
    role = "manager"
    name = "Meredith Chase"
    avatar = "MC"

    [[accounts]]
    id = "emp1"
    email = "employee@test.dev"
    password = "pw"
    role = "employee"
    name = "Ana Field"
    avatar = "AF"

    [[teams]]
    name = "Research"

    [[teams.employees]]
    id = "emp1"
    name = "Ana Field"
    avatar = "AF"
    email = "ana@test.dev"
    manager = "Meredith Chase"
    progress = 80

    [[teams.employees]]
    id = "emp2"
    name = "Ben Ortiz"
    avatar = "BO"
    email = "ben@test.dev"
    manager = "Meredith Chase"
    progress = 60

    [[teams]]
    name = "Design"

    [[teams.employees]]
    id = "emp3"
    name = "Cara Wu"
    avatar = "CW"
    email = "cara@test.dev"
    manager = "Priya Nair"
    progress = 90

    [[goals.emp1]]
    id = "goal1"
    title = "Ship Q3 analysis"
    status = "on-track"
    progress = 80

    [[goals.emp1]]
    id = "goal2"
    title = "Draft roadmap"
    status = "needs-attention"
    progress = 55

    [[history.emp1]]
    month = "August 2024"

    [history.emp1.manager]
    author = "Meredith Chase"
    date = "2024-08-30"
    content = "Strong analytical delivery across the quarter."
    expectation = 4

    [history.emp1.manager.goals.goal1]
    status = "on-track"
    feedback = "Analysis milestones all landed."

    [history.emp1.manager.goals.goal2]
    status = "needs-attention"
    feedback = "Roadmap draft needs another pass."

    [history.emp1.employee]
    author = "Ana Field"
    date = "2024-08-28"
    content = "Good month, the analysis work is nearly done."

    [history.emp1.employee.goals.goal1]
    status = "on-track"
    feedback = "Almost finished the dataset review."

    [history.emp1.employee.healthCheck]
    enjoyWork = 4
    managerSupport = true
    blockers = ""

    [[history.emp1]]
    month = "July 2024"

    [history.emp1.manager]
    author = "Meredith Chase"
    date = "2024-07-31"
    content = "Solid ramp-up on the research pipeline."

    [summaries.emp1]
    managerSummary = "Feedback highlights consistent, analytical delivery."
    employeeSummary = "Self reviews show steady confidence and engagement."
"#;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Seeds the directory fixture into a database.
pub async fn seed_test_directory(db: &DatabaseConnection) -> Result<()> {
    let directory: DirectoryFile =
        toml::from_str(TEST_DIRECTORY_TOML).map_err(|e| Error::Config {
            message: format!("Test directory fixture is invalid: {e}"),
        })?;
    seed_directory(db, &directory).await
}

/// Creates an in-memory database with the directory fixture seeded.
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_test_directory(&db).await?;
    Ok(db)
}

/// Creates a seeded database plus an empty check-in store for
/// [`TEST_PERIOD`]. Returns (db, store) for store-backed tests.
pub async fn setup_seeded_store() -> Result<(DatabaseConnection, CheckinStore)> {
    let db = setup_seeded_db().await?;
    let store = CheckinStore::load(db.clone(), TEST_PERIOD).await;
    Ok((db, store))
}

/// Builds complete API state over a seeded database.
///
/// The rewrite client points at an unreachable local port so tests never
/// touch the network; rewrite calls come back as failed outcomes.
pub async fn setup_test_state() -> Result<AppState> {
    let (db, store) = setup_seeded_store().await?;

    Ok(AppState {
        db,
        store: Arc::new(store),
        sessions: Arc::new(SessionManager::new()),
        rewriter: Arc::new(RewriteClient::new(RewriteConfig {
            endpoint: "http://127.0.0.1:9/".to_string(),
        })),
    })
}

/// Logs a fixture account in by email and returns its open session.
/// Every fixture account uses the password `"pw"`.
pub async fn login_as(state: &AppState, email: &str) -> Result<Session> {
    let account = session::authenticate(&state.db, email, "pw").await?;
    state.sessions.open(&account).await
}

/// Builds an Authorization header map carrying a bearer token.
#[allow(clippy::expect_used)] // Uuid tokens are always valid header values
pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Bearer {token}")
        .parse()
        .expect("token is a valid header value");
    headers.insert(header::AUTHORIZATION, value);
    headers
}

/// A well-formed employee-side draft touching `goal1` with a filled-in
/// health check.
pub fn employee_draft() -> EnvelopeDraft {
    let mut goals = BTreeMap::new();
    goals.insert(
        "goal1".to_string(),
        GoalEntry {
            status: Some(GoalStatus::OnTrack),
            feedback: Some("Making good progress.".to_string()),
        },
    );

    EnvelopeDraft {
        content: Some("Monthly self check-in.".to_string()),
        goals,
        health_check: Some(HealthCheck {
            enjoy_work: 4,
            manager_support: true,
            blockers: String::new(),
        }),
        expectation: None,
    }
}

/// A well-formed manager-side draft with an expectation rating.
pub fn manager_draft() -> EnvelopeDraft {
    EnvelopeDraft {
        content: Some("Solid month overall.".to_string()),
        goals: BTreeMap::new(),
        health_check: None,
        expectation: Some(4),
    }
}
