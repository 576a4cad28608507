//! # Dealership Repository
//!
//! This module contains the repository implementation for Dealership
//! entities, the tenant boundary for all report data.

use crate::error::RepositoryError;
use crate::models::dealership::{
    ActiveModel as DealershipActiveModel, Entity as Dealership, Model as DealershipModel,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Repository for Dealership database operations
pub struct DealershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DealershipRepository<'a> {
    /// Create a new DealershipRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new dealership
    pub async fn create_dealership(
        &self,
        name: Option<String>,
    ) -> Result<DealershipModel, RepositoryError> {
        if let Some(ref name) = name {
            if name.trim().is_empty() {
                return Err(RepositoryError::validation_error(
                    "Dealership name cannot be empty",
                ));
            }
            if name.len() > 255 {
                return Err(RepositoryError::validation_error(
                    "Dealership name cannot exceed 255 characters",
                ));
            }
        }

        let dealership = DealershipActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(Utc::now().into()),
        };

        let result = dealership
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get dealership by ID
    pub async fn get_dealership_by_id(
        &self,
        dealership_id: Uuid,
    ) -> Result<Option<DealershipModel>, RepositoryError> {
        let dealership = Dealership::find_by_id(dealership_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(dealership)
    }

    /// Check if a dealership exists
    pub async fn dealership_exists(&self, dealership_id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.get_dealership_by_id(dealership_id).await?.is_some())
    }
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

    #[tokio::test]
    async fn test_create_and_fetch_dealership() {
        let db = setup_test_db().await;
        let repo = DealershipRepository::new(&db);

        let created = repo
            .create_dealership(Some("Sunrise Motors".to_string()))
            .await
            .unwrap();
        assert_eq!(created.name.as_deref(), Some("Sunrise Motors"));

        let found = repo.get_dealership_by_id(created.id).await.unwrap();
        assert_eq!(found.unwrap().id, created.id);

        assert!(repo.dealership_exists(created.id).await.unwrap());
        assert!(!repo.dealership_exists(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_dealership_validation() {
        let db = setup_test_db().await;
        let repo = DealershipRepository::new(&db);

        let result = repo.create_dealership(Some("   ".to_string())).await;
        assert!(result.is_err());

        let result = repo.create_dealership(Some("a".repeat(256))).await;
        assert!(result.is_err());

        // Anonymous dealerships are allowed.
        let result = repo.create_dealership(None).await;
        assert!(result.is_ok());
    }
}
