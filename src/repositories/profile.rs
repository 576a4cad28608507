//! # Profile Repository
//!
//! This module contains the repository implementation for Profile entities,
//! the dealership-scoped users whose role gates reset privileges.

use crate::error::RepositoryError;
use crate::models::profile::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as Profile,
    Model as ProfileModel,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Request data for creating a new profile
#[derive(Debug, Clone)]
pub struct CreateProfileRequest {
    pub dealership_id: Uuid,
    pub full_name: Option<String>,
    /// Role within the dealership (associate|manager)
    pub role: String,
}

/// Repository for Profile database operations
pub struct ProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new ProfileRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new profile
    pub async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<ProfileModel, RepositoryError> {
        if !matches!(request.role.as_str(), "associate" | "manager") {
            return Err(RepositoryError::validation_error(
                "Profile role must be 'associate' or 'manager'",
            ));
        }

        let profile = ProfileActiveModel {
            id: Set(Uuid::new_v4()),
            dealership_id: Set(request.dealership_id),
            full_name: Set(request.full_name),
            role: Set(request.role),
            created_at: Set(Utc::now().into()),
        };

        let result = profile
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get profile by ID
    pub async fn get_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<ProfileModel>, RepositoryError> {
        let profile = Profile::find_by_id(profile_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(profile)
    }

    /// List all profiles belonging to a dealership
    pub async fn list_profiles_for_dealership(
        &self,
        dealership_id: Uuid,
    ) -> Result<Vec<ProfileModel>, RepositoryError> {
        let profiles = Profile::find()
            .filter(ProfileColumn::DealershipId.eq(dealership_id))
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(profiles)
    }
}
