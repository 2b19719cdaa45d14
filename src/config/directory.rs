//! Directory configuration loading from directory.toml
//!
//! This module loads the seed directory file describing accounts, teams,
//! goals, archived feedback, and AI summaries, and inserts it into the
//! database on first run. Seeding is skipped entirely once any account
//! exists, so restarting the service never duplicates or overwrites rows.

use crate::{
    core::{checkin::GoalStatus, history::ArchivedEnvelope, session::Role},
    entities::{
        Account, account, ai_summary, archived_feedback, employee, goal,
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The entire directory.toml file.
#[derive(Debug, Deserialize)]
pub struct DirectoryFile {
    /// Login accounts to seed
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
    /// Teams with their members, in display order
    #[serde(default)]
    pub teams: Vec<TeamSeed>,
    /// Goals keyed by employee id, in display order
    #[serde(default)]
    pub goals: BTreeMap<String, Vec<GoalSeed>>,
    /// Archived feedback keyed by employee id, newest month first
    #[serde(default)]
    pub history: BTreeMap<String, Vec<ArchivedRecordSeed>>,
    /// AI summaries keyed by employee id
    #[serde(default)]
    pub summaries: BTreeMap<String, SummarySeed>,
}

/// One login account in the directory file.
#[derive(Debug, Deserialize, Clone)]
pub struct AccountSeed {
    /// Account id (e.g., `"hr1"`)
    pub id: String,
    /// Login email
    pub email: String,
    /// Plaintext demo password
    pub password: String,
    /// Access role; unknown roles fail the parse
    pub role: Role,
    /// Display name
    pub name: String,
    /// Avatar initials
    pub avatar: String,
}

/// One team and its members.
#[derive(Debug, Deserialize, Clone)]
pub struct TeamSeed {
    /// Team display name
    pub name: String,
    /// Members in display order
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
}

/// One employee inside a team block.
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeSeed {
    /// Employee id (e.g., `"emp1"`)
    pub id: String,
    /// Full display name
    pub name: String,
    /// Avatar initials
    pub avatar: String,
    /// Work email
    pub email: String,
    /// Display name of the employee's manager
    pub manager: String,
    /// Overall goal progress percentage
    pub progress: i32,
}

/// One goal in an employee's goal list.
#[derive(Debug, Deserialize, Clone)]
pub struct GoalSeed {
    /// Goal id (e.g., `"goal1"`)
    pub id: String,
    /// Goal title
    pub title: String,
    /// Baseline status; unknown statuses fail the parse
    pub status: GoalStatus,
    /// Completion percentage
    pub progress: i32,
}

/// One archived month for an employee.
#[derive(Debug, Deserialize, Clone)]
pub struct ArchivedRecordSeed {
    /// Display label of the month (e.g., `"August 2024"`)
    pub month: String,
    /// Manager-side feedback, if any was given that month
    pub manager: Option<ArchivedEnvelope>,
    /// Employee-side feedback, if any was given that month
    pub employee: Option<ArchivedEnvelope>,
}

/// AI summary pair for one employee.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummarySeed {
    /// Summary of manager-authored feedback
    pub manager_summary: String,
    /// Summary of employee-authored feedback
    pub employee_summary: String,
}

/// Loads the directory file from a TOML path.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, the TOML syntax is
/// invalid, or any role or goal status is unknown.
pub fn load_directory<P: AsRef<Path>>(path: P) -> Result<DirectoryFile> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read directory file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse directory file: {e}"),
    })
}

/// Seeds the directory tables from a parsed file, unless already seeded.
///
/// Goals, history, and summaries that reference an employee id missing from
/// the team blocks are skipped with a warning instead of failing the boot;
/// the referencing tables carry foreign keys to employees.
pub async fn seed_directory(db: &DatabaseConnection, directory: &DirectoryFile) -> Result<()> {
    let existing = Account::find().count(db).await?;
    if existing > 0 {
        tracing::debug!("Directory already seeded ({existing} accounts), skipping");
        return Ok(());
    }

    let accounts: Vec<account::ActiveModel> = directory
        .accounts
        .iter()
        .map(|seed| account::ActiveModel {
            id: Set(seed.id.clone()),
            email: Set(seed.email.clone()),
            password: Set(seed.password.clone()),
            role: Set(seed.role.as_str().to_string()),
            name: Set(seed.name.clone()),
            avatar: Set(seed.avatar.clone()),
        })
        .collect();

    let mut employees = Vec::new();
    let mut known_ids = Vec::new();
    let mut position = 0_i32;
    for team in &directory.teams {
        for seed in &team.employees {
            known_ids.push(seed.id.clone());
            employees.push(employee::ActiveModel {
                id: Set(seed.id.clone()),
                name: Set(seed.name.clone()),
                avatar: Set(seed.avatar.clone()),
                email: Set(seed.email.clone()),
                manager_name: Set(seed.manager.clone()),
                progress: Set(seed.progress),
                team: Set(team.name.clone()),
                position: Set(position),
            });
            position += 1;
        }
    }

    let mut goals = Vec::new();
    for (employee_id, seeds) in &directory.goals {
        if !known_ids.contains(employee_id) {
            tracing::warn!("Directory lists goals for unknown employee '{employee_id}', skipping");
            continue;
        }
        let mut position = 0_i32;
        for seed in seeds {
            goals.push(goal::ActiveModel {
                id: Set(seed.id.clone()),
                employee_id: Set(employee_id.clone()),
                title: Set(seed.title.clone()),
                status: Set(seed.status.as_str().to_string()),
                progress: Set(seed.progress),
                position: Set(position),
            });
            position += 1;
        }
    }

    let mut archived = Vec::new();
    for (employee_id, records) in &directory.history {
        if !known_ids.contains(employee_id) {
            tracing::warn!(
                "Directory lists history for unknown employee '{employee_id}', skipping"
            );
            continue;
        }
        let mut position = 0_i32;
        for record in records {
            archived.push(archived_feedback::ActiveModel {
                employee_id: Set(employee_id.clone()),
                month: Set(record.month.clone()),
                position: Set(position),
                manager_json: Set(serialize_side(record.manager.as_ref(), employee_id)?),
                employee_json: Set(serialize_side(record.employee.as_ref(), employee_id)?),
                ..Default::default()
            });
            position += 1;
        }
    }

    let mut summaries = Vec::new();
    for (employee_id, seed) in &directory.summaries {
        if !known_ids.contains(employee_id) {
            tracing::warn!(
                "Directory lists a summary for unknown employee '{employee_id}', skipping"
            );
            continue;
        }
        summaries.push(ai_summary::ActiveModel {
            employee_id: Set(employee_id.clone()),
            manager_summary: Set(seed.manager_summary.clone()),
            employee_summary: Set(seed.employee_summary.clone()),
        });
    }

    tracing::info!(
        "Seeding directory: {} accounts, {} employees, {} goals, {} archived records, {} summaries",
        accounts.len(),
        employees.len(),
        goals.len(),
        archived.len(),
        summaries.len()
    );

    if !accounts.is_empty() {
        Account::insert_many(accounts).exec(db).await?;
    }
    if !employees.is_empty() {
        crate::entities::Employee::insert_many(employees).exec(db).await?;
    }
    if !goals.is_empty() {
        crate::entities::Goal::insert_many(goals).exec(db).await?;
    }
    if !archived.is_empty() {
        crate::entities::ArchivedFeedback::insert_many(archived)
            .exec(db)
            .await?;
    }
    if !summaries.is_empty() {
        crate::entities::AiSummary::insert_many(summaries).exec(db).await?;
    }

    Ok(())
}

fn serialize_side(
    envelope: Option<&ArchivedEnvelope>,
    employee_id: &str,
) -> Result<Option<String>> {
    envelope
        .map(|envelope| {
            serde_json::to_string(envelope).map_err(|e| Error::Config {
                message: format!("Failed to serialize archived feedback for '{employee_id}': {e}"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    const SAMPLE: &str = r#"
        [[accounts]]
        id = "hr1"
        email = "hr@sample.dev"
        password = "pw"
        role = "hr"
        name = "Harper Quinn"
        avatar = "HQ"

        [[teams]]
        name = "Platform"

        [[teams.employees]]
        id = "emp1"
        name = "Noor Haddad"
        avatar = "NH"
        email = "noor@sample.dev"
        manager = "Sam Park"
        progress = 72

        [[teams.employees]]
        id = "emp2"
        name = "Theo Brandt"
        avatar = "TB"
        email = "theo@sample.dev"
        manager = "Sam Park"
        progress = 58

        [[goals.emp1]]
        id = "goal1"
        title = "Stabilize deploy pipeline"
        status = "on-track"
        progress = 70

        [[history.emp1]]
        month = "August 2024"

        [history.emp1.manager]
        author = "Sam Park"
        date = "2024-08-30"
        content = "Good operational month."

        [history.emp1.manager.goals.goal1]
        status = "on-track"
        feedback = "Rollouts went smoothly."

        [history.emp1.employee]
        author = "Noor Haddad"
        date = "2024-08-28"
        content = "Felt productive."

        [history.emp1.employee.healthCheck]
        enjoyWork = 4
        managerSupport = true
        blockers = ""

        [summaries.emp1]
        managerSummary = "Consistent operational excellence."
        employeeSummary = "High engagement with the platform work."
    "#;

    #[test]
    fn test_parse_directory_file() {
        let directory: DirectoryFile = toml::from_str(SAMPLE).unwrap();

        assert_eq!(directory.accounts.len(), 1);
        assert_eq!(directory.accounts[0].role, Role::Hr);
        assert_eq!(directory.teams.len(), 1);
        assert_eq!(directory.teams[0].employees.len(), 2);
        assert_eq!(directory.goals["emp1"].len(), 1);
        assert_eq!(directory.goals["emp1"][0].status, GoalStatus::OnTrack);

        let august = &directory.history["emp1"][0];
        assert_eq!(august.month, "August 2024");
        let manager = august.manager.as_ref().unwrap();
        assert_eq!(manager.author.as_deref(), Some("Sam Park"));
        assert_eq!(manager.goals["goal1"].status, Some(GoalStatus::OnTrack));
        let employee = august.employee.as_ref().unwrap();
        assert_eq!(employee.health_check.as_ref().unwrap().enjoy_work, 4);

        assert!(directory.summaries.contains_key("emp1"));
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        let toml_str = r#"
            [[accounts]]
            id = "x1"
            email = "x@sample.dev"
            password = "pw"
            role = "root"
            name = "X"
            avatar = "X"
        "#;

        assert!(toml::from_str::<DirectoryFile>(toml_str).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_goal_status() {
        let toml_str = r#"
            [[goals.emp1]]
            id = "goal1"
            title = "T"
            status = "sideways"
            progress = 10
        "#;

        assert!(toml::from_str::<DirectoryFile>(toml_str).is_err());
    }

    #[tokio::test]
    async fn test_seed_inserts_all_tables() -> Result<()> {
        let db = setup_test_db().await?;
        let directory: DirectoryFile = toml::from_str(SAMPLE).unwrap();

        seed_directory(&db, &directory).await?;

        assert_eq!(Account::find().count(&db).await?, 1);
        assert_eq!(crate::entities::Employee::find().count(&db).await?, 2);
        assert_eq!(crate::entities::Goal::find().count(&db).await?, 1);
        assert_eq!(crate::entities::ArchivedFeedback::find().count(&db).await?, 1);
        assert_eq!(crate::entities::AiSummary::find().count(&db).await?, 1);

        let noor = crate::entities::Employee::find_by_id("emp1")
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(noor.team, "Platform");
        assert_eq!(noor.position, 0);
        assert_eq!(noor.manager_name, "Sam Park");

        // Archived sides round-trip through their JSON columns.
        let row = crate::entities::ArchivedFeedback::find().one(&db).await?.unwrap();
        let manager: ArchivedEnvelope =
            serde_json::from_str(row.manager_json.as_deref().unwrap()).unwrap();
        assert_eq!(manager.content.as_deref(), Some("Good operational month."));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_when_accounts_exist() -> Result<()> {
        let db = setup_test_db().await?;
        let directory: DirectoryFile = toml::from_str(SAMPLE).unwrap();

        seed_directory(&db, &directory).await?;
        seed_directory(&db, &directory).await?;

        assert_eq!(Account::find().count(&db).await?, 1);
        assert_eq!(crate::entities::Employee::find().count(&db).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_references_to_unknown_employees() -> Result<()> {
        let db = setup_test_db().await?;

        let toml_str = format!(
            "{SAMPLE}\n\
            [[goals.ghost]]\n\
            id = \"goalx\"\n\
            title = \"Orphan\"\n\
            status = \"on-track\"\n\
            progress = 5\n\
            \n\
            [summaries.ghost]\n\
            managerSummary = \"none\"\n\
            employeeSummary = \"none\"\n"
        );
        let directory: DirectoryFile = toml::from_str(&toml_str).unwrap();

        seed_directory(&db, &directory).await?;

        // The orphaned rows are dropped; everything else still lands.
        assert_eq!(crate::entities::Goal::find().count(&db).await?, 1);
        assert_eq!(crate::entities::AiSummary::find().count(&db).await?, 1);

        Ok(())
    }
}
