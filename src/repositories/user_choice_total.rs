//! # User Choice Total Repository
//!
//! This module contains the repository implementation for the derived
//! per-user aggregate statistics, one running counter per (user, choice).

use crate::error::RepositoryError;
use crate::models::user_choice_total::{
    ActiveModel as UserChoiceTotalActiveModel, Column as UserChoiceTotalColumn,
    Entity as UserChoiceTotal, Model as UserChoiceTotalModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Repository for UserChoiceTotal database operations
pub struct UserChoiceTotalRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserChoiceTotalRepository<'a> {
    /// Create a new UserChoiceTotalRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Increment the running counter for a (user, choice) pair, creating the
    /// row on first use.
    pub async fn increment_total(
        &self,
        user_id: Uuid,
        choice: &str,
    ) -> Result<UserChoiceTotalModel, RepositoryError> {
        let now = Utc::now();
        let existing = UserChoiceTotal::find()
            .filter(UserChoiceTotalColumn::UserId.eq(user_id))
            .filter(UserChoiceTotalColumn::Choice.eq(choice))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let result = match existing {
            Some(model) => {
                let total = model.total.saturating_add(1);
                let mut active = model.into_active_model();
                active.total = Set(total);
                active.updated_at = Set(now.into());
                active
                    .update(self.db)
                    .await
                    .map_err(RepositoryError::database_error)?
            }
            None => {
                let active = UserChoiceTotalActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    choice: Set(choice.to_string()),
                    total: Set(1),
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

    /// List all totals for a user, highest first
    pub async fn list_totals_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserChoiceTotalModel>, RepositoryError> {
        let totals = UserChoiceTotal::find()
            .filter(UserChoiceTotalColumn::UserId.eq(user_id))
            .order_by_desc(UserChoiceTotalColumn::Total)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(totals)
    }
}
