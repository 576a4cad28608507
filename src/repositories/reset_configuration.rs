//! # Reset Configuration Repository
//!
//! This module contains the repository implementation for per-dealership
//! reset configurations: one row per dealership, created on first write with
//! a fixed sentinel `last_reset` so the due-date arithmetic always has a
//! concrete date to work from.

use std::sync::LazyLock;

use crate::error::RepositoryError;
use crate::models::reset_configuration::{
    ActiveModel as ResetConfigurationActiveModel, Entity as ResetConfiguration,
    Model as ResetConfigurationModel,
};
use crate::reset::SENTINEL_LAST_RESET;
use crate::reset::cadence::{Cadence, VALID_CADENCES};
use chrono::Utc;
use regex::Regex;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

/// Accepted wall-clock input, hours 0-23 with an optional leading zero.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time pattern")
});

/// Repository for ResetConfiguration database operations
pub struct ResetConfigurationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResetConfigurationRepository<'a> {
    /// Create a new ResetConfigurationRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get the configuration for a dealership
    pub async fn get_configuration(
        &self,
        dealership_id: Uuid,
    ) -> Result<Option<ResetConfigurationModel>, RepositoryError> {
        let configuration = ResetConfiguration::find_by_id(dealership_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(configuration)
    }

    /// Create or update the configuration for a dealership.
    ///
    /// A new row starts from the sentinel `last_reset` date; an update never
    /// touches `last_reset`, which only the executor advances.
    pub async fn upsert_configuration(
        &self,
        dealership_id: Uuid,
        cadence: &str,
        reset_time: &str,
    ) -> Result<ResetConfigurationModel, RepositoryError> {
        let cadence = validate_cadence(cadence)?;
        let reset_time = normalize_reset_time(reset_time)?;
        let now = Utc::now();

        let existing = self.get_configuration(dealership_id).await?;
        let result = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.cadence = Set(cadence.as_str().to_string());
                active.reset_time = Set(reset_time);
                active.updated_at = Set(now.into());
                active
                    .update(self.db)
                    .await
                    .map_err(RepositoryError::database_error)?
            }
            None => {
                let active = ResetConfigurationActiveModel {
                    dealership_id: Set(dealership_id),
                    cadence: Set(cadence.as_str().to_string()),
                    reset_time: Set(reset_time),
                    last_reset: Set(SENTINEL_LAST_RESET),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                active
                    .insert(self.db)
                    .await
                    .map_err(RepositoryError::database_error)?
            }
        };

        Ok(result)
    }
}

fn validate_cadence(cadence: &str) -> Result<Cadence, RepositoryError> {
    cadence.parse().map_err(|_| {
        RepositoryError::validation_error(format!(
            "Invalid cadence '{cadence}'; expected one of {}",
            VALID_CADENCES.join(", ")
        ))
    })
}

/// Validate an HH:MM wall-clock string and normalize it to HH:MM:SS storage
/// form with a zero-padded hour.
fn normalize_reset_time(reset_time: &str) -> Result<String, RepositoryError> {
    if !TIME_PATTERN.is_match(reset_time) {
        return Err(RepositoryError::validation_error(format!(
            "Invalid reset time '{reset_time}'; expected HH:MM in 24-hour form"
        )));
    }

    let (hours, minutes) = reset_time
        .split_once(':')
        .ok_or_else(|| RepositoryError::validation_error("Invalid reset time"))?;
    let hours: u8 = hours
        .parse()
        .map_err(|_| RepositoryError::validation_error("Invalid reset time hour"))?;

    Ok(format!("{hours:02}:{minutes}:00"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectionTrait, Database, Statement};

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("create in-memory db");
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA foreign_keys = OFF",
        ))
        .await
        .expect("disable foreign keys");
        Migrator::up(&db, None).await.expect("apply migrations");
        db
    }

    #[test]
    fn test_normalize_reset_time() {
        assert_eq!(normalize_reset_time("9:30").unwrap(), "09:30:00");
        assert_eq!(normalize_reset_time("09:30").unwrap(), "09:30:00");
        assert_eq!(normalize_reset_time("23:59").unwrap(), "23:59:00");
        assert_eq!(normalize_reset_time("0:00").unwrap(), "00:00:00");

        assert!(normalize_reset_time("24:00").is_err());
        assert!(normalize_reset_time("12:60").is_err());
        assert!(normalize_reset_time("12:5").is_err());
        assert!(normalize_reset_time("noon").is_err());
        assert!(normalize_reset_time("12:30:00").is_err());
    }

    #[tokio::test]
    async fn test_upsert_seeds_sentinel_then_preserves_last_reset() {
        let db = setup_test_db().await;
        let repo = ResetConfigurationRepository::new(&db);
        let dealership_id = Uuid::new_v4();

        let created = repo
            .upsert_configuration(dealership_id, "weekly", "9:30")
            .await
            .unwrap();
        assert_eq!(created.cadence, "weekly");
        assert_eq!(created.reset_time, "09:30:00");
        assert_eq!(created.last_reset, SENTINEL_LAST_RESET);

        let updated = repo
            .upsert_configuration(dealership_id, "monthly", "18:00")
            .await
            .unwrap();
        assert_eq!(updated.cadence, "monthly");
        assert_eq!(updated.reset_time, "18:00:00");
        // Updating the schedule never rewinds or advances the reset stamp.
        assert_eq!(updated.last_reset, SENTINEL_LAST_RESET);
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_input() {
        let db = setup_test_db().await;
        let repo = ResetConfigurationRepository::new(&db);
        let dealership_id = Uuid::new_v4();

        let result = repo
            .upsert_configuration(dealership_id, "fortnightly", "12:00")
            .await;
        assert!(result.is_err());

        let result = repo.upsert_configuration(dealership_id, "daily", "25:00").await;
        assert!(result.is_err());

        // Nothing was written by the rejected attempts.
        let stored = repo.get_configuration(dealership_id).await.unwrap();
        assert!(stored.is_none());
    }
}
