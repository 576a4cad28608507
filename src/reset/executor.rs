//! Reset executor
//!
//! Clears a single dealership's accumulated report data: submissions first,
//! then the dependent per-user aggregate totals, and finally stamps the
//! configuration with the reset date. The steps run sequentially; deletions
//! are idempotent bulk operations keyed by tenant or user-set, so a retry
//! after a partial failure simply deletes an already-empty set.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::models::profile::{Column as ProfileColumn, Entity as Profile};
use crate::models::reset_configuration::{
    Column as ResetConfigurationColumn, Entity as ResetConfiguration,
};
use crate::models::submission::{Column as SubmissionColumn, Entity as Submission};
use crate::models::user_choice_total::{Column as UserChoiceTotalColumn, Entity as UserChoiceTotal};

/// Outcome of a reset execution.
///
/// The stamp update is deliberately a tagged variant rather than a boolean:
/// a stamp failure after successful deletion is an accepted soft failure (the
/// dealership may be re-evaluated as due prematurely), and callers need to
/// tell it apart from total failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// All data cleared and `last_reset` advanced.
    Completed { reset_date: NaiveDate },
    /// All data cleared but the `last_reset` stamp update failed.
    CompletedStampFailed { reset_date: NaiveDate },
}

impl ResetOutcome {
    /// The date the reset ran on.
    pub fn reset_date(&self) -> NaiveDate {
        match self {
            ResetOutcome::Completed { reset_date }
            | ResetOutcome::CompletedStampFailed { reset_date } => *reset_date,
        }
    }

    /// Whether the `last_reset` stamp was advanced.
    pub fn stamp_updated(&self) -> bool {
        matches!(self, ResetOutcome::Completed { .. })
    }
}

/// Step-identifying failure of a reset execution.
///
/// Any of these leaves `last_reset` untouched, so a later sweep tick will
/// consider the reset still not done and retry the whole operation.
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("failed to clear submission data")]
    ClearSubmissions(#[source] DbErr),
    #[error("failed to identify dealership users")]
    ListUsers(#[source] DbErr),
    #[error("failed to clear user statistics")]
    ClearStatistics(#[source] DbErr),
}

/// Executes resets against the backing store.
pub struct ResetExecutor<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResetExecutor<'a> {
    /// Create an executor over the given database connection.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Clear all report data for a dealership and stamp `today` as the reset
    /// date.
    ///
    /// `today` is an explicit parameter so callers control the clock. A stamp
    /// failure after successful deletion is reported as
    /// [`ResetOutcome::CompletedStampFailed`], not as an error.
    #[instrument(skip(self), fields(dealership_id = %dealership_id))]
    pub async fn execute(
        &self,
        dealership_id: Uuid,
        today: NaiveDate,
    ) -> Result<ResetOutcome, ResetError> {
        // 1. Delete all submissions for this dealership.
        let deleted_submissions = Submission::delete_many()
            .filter(SubmissionColumn::DealershipId.eq(dealership_id))
            .exec(self.db)
            .await
            .map_err(ResetError::ClearSubmissions)?;

        // 2. Enumerate all user ids belonging to the dealership.
        let user_ids: Vec<Uuid> = Profile::find()
            .filter(ProfileColumn::DealershipId.eq(dealership_id))
            .select_only()
            .column(ProfileColumn::Id)
            .into_tuple()
            .all(self.db)
            .await
            .map_err(ResetError::ListUsers)?;

        // 3. Delete all choice totals for those users; a dealership with no
        //    users skips the call entirely.
        let deleted_totals = if user_ids.is_empty() {
            0
        } else {
            UserChoiceTotal::delete_many()
                .filter(UserChoiceTotalColumn::UserId.is_in(user_ids))
                .exec(self.db)
                .await
                .map_err(ResetError::ClearStatistics)?
                .rows_affected
        };

        debug!(
            submissions = deleted_submissions.rows_affected,
            choice_totals = deleted_totals,
            "Cleared dealership report data"
        );

        // 4. Advance last_reset. The data is already cleared at this point, so
        //    a failure here downgrades to a soft failure: the dealership may
        //    be evaluated as due again prematurely, which only re-deletes an
        //    empty set.
        let stamp_result = ResetConfiguration::update_many()
            .col_expr(ResetConfigurationColumn::LastReset, Expr::value(today))
            .col_expr(
                ResetConfigurationColumn::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(ResetConfigurationColumn::DealershipId.eq(dealership_id))
            .exec(self.db)
            .await;

        match stamp_result {
            Ok(_) => {
                info!(reset_date = %today, "Reset completed");
                Ok(ResetOutcome::Completed { reset_date: today })
            }
            Err(err) => {
                warn!(
                    error = ?err,
                    reset_date = %today,
                    "Reset cleared data but failed to advance last_reset stamp"
                );
                Ok(ResetOutcome::CompletedStampFailed { reset_date: today })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reports_reset_date_and_stamp_state() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let completed = ResetOutcome::Completed { reset_date: date };
        assert_eq!(completed.reset_date(), date);
        assert!(completed.stamp_updated());

        let soft = ResetOutcome::CompletedStampFailed { reset_date: date };
        assert_eq!(soft.reset_date(), date);
        assert!(!soft.stamp_updated());
    }

    #[test]
    fn reset_errors_do_not_leak_store_internals() {
        let err = ResetError::ClearSubmissions(DbErr::Custom("connection refused".to_string()));
        assert_eq!(err.to_string(), "failed to clear submission data");

        let err = ResetError::ClearStatistics(DbErr::Custom("timeout".to_string()));
        assert_eq!(err.to_string(), "failed to clear user statistics");
    }
}
