//! # Submission Repository
//!
//! This module contains the repository implementation for Submission
//! entities, the individual objection reports logged by associates.

use crate::error::RepositoryError;
use crate::models::submission::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submission,
    Model as SubmissionModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use uuid::Uuid;

/// Request data for logging a new submission
#[derive(Debug, Clone)]
pub struct CreateSubmissionRequest {
    pub dealership_id: Uuid,
    pub user_id: Uuid,
    /// Objection choices selected on the form
    pub choices: Vec<String>,
    pub comment: Option<String>,
}

/// Repository for Submission database operations
pub struct SubmissionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new SubmissionRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Log a new submission
    pub async fn create_submission(
        &self,
        request: CreateSubmissionRequest,
    ) -> Result<SubmissionModel, RepositoryError> {
        if request.choices.is_empty() {
            return Err(RepositoryError::validation_error(
                "Submission must include at least one choice",
            ));
        }
        if request.choices.iter().any(|choice| choice.trim().is_empty()) {
            return Err(RepositoryError::validation_error(
                "Submission choices cannot be empty",
            ));
        }

        let submission = SubmissionActiveModel {
            id: Set(Uuid::new_v4()),
            dealership_id: Set(request.dealership_id),
            user_id: Set(request.user_id),
            choices: Set(Value::from(request.choices)),
            comment: Set(request.comment),
            created_at: Set(Utc::now().into()),
        };

        let result = submission
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// List all submissions for a dealership, newest first
    pub async fn list_submissions_for_dealership(
        &self,
        dealership_id: Uuid,
    ) -> Result<Vec<SubmissionModel>, RepositoryError> {
        let submissions = Submission::find()
            .filter(SubmissionColumn::DealershipId.eq(dealership_id))
            .order_by_desc(SubmissionColumn::CreatedAt)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(submissions)
    }
}
