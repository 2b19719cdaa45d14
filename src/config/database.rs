//! Database configuration module for `CheckinBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Account, AiSummary, ArchivedFeedback, Employee, Goal, Snapshot};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database behind the given URL.
///
/// The URL comes from [`crate::config::settings::AppConfig`], which defaults
/// to a local `SQLite` file that is created on first run.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
/// It creates tables for accounts, employees, goals, archived feedback, AI summaries, and
/// store snapshots. Creation is skipped for tables that already exist, so calling this on
/// every startup is safe.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let account_table = schema.create_table_from_entity(Account).if_not_exists().to_owned();
    let employee_table = schema.create_table_from_entity(Employee).if_not_exists().to_owned();
    let goal_table = schema.create_table_from_entity(Goal).if_not_exists().to_owned();
    let archived_table = schema
        .create_table_from_entity(ArchivedFeedback)
        .if_not_exists()
        .to_owned();
    let summary_table = schema.create_table_from_entity(AiSummary).if_not_exists().to_owned();
    let snapshot_table = schema.create_table_from_entity(Snapshot).if_not_exists().to_owned();

    db.execute_raw(builder.build(&account_table)).await?;
    db.execute_raw(builder.build(&employee_table)).await?;
    db.execute_raw(builder.build(&goal_table)).await?;
    db.execute_raw(builder.build(&archived_table)).await?;
    db.execute_raw(builder.build(&summary_table)).await?;
    db.execute_raw(builder.build(&snapshot_table)).await?;

    Ok(())
}
