//! # Reset Sweep
//!
//! Single pass over every stored reset configuration: each one is evaluated
//! against the provided clock and, when due, cleared by the executor. The
//! sweep is driven externally (an operator endpoint or cron hitting the
//! service); there is no in-process timer loop, so at-least-once delivery is
//! the trigger's responsibility and the evaluator's date arithmetic keeps
//! duplicate triggers harmless.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use metrics::{counter, histogram};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::reset_configuration::{
    Column as ResetConfigurationColumn, Entity as ResetConfiguration,
    Model as ResetConfigurationModel,
};
use crate::reset::cadence::Cadence;
use crate::reset::evaluator::is_due;
use crate::reset::executor::ResetExecutor;

/// Per-dealership outcome of one sweep run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DealershipResetResult {
    pub dealership_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated report for one sweep run.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SweepReport {
    /// Configurations that were due and attempted.
    pub processed: u64,
    pub successful: u64,
    pub failed: u64,
    pub details: Vec<DealershipResetResult>,
}

/// Evaluates all reset configurations and executes the due ones.
pub struct ResetSweep {
    config: Arc<AppConfig>,
    db: Arc<DatabaseConnection>,
}

impl ResetSweep {
    /// Create a new sweep over the given database connection.
    pub fn new(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Self {
        Self { config, db }
    }

    /// Run one sweep pass at the given instant.
    ///
    /// `now` is an explicit parameter so triggers and tests control the
    /// clock. Failures of individual dealerships are recorded in the report
    /// and never abort the pass.
    #[instrument(skip_all, fields(now = %now))]
    pub async fn run(&self, now: NaiveDateTime) -> Result<SweepReport, ApiError> {
        let started = Instant::now();
        let mut report = SweepReport::default();
        let mut evaluated: u64 = 0;
        let mut cursor: Option<Uuid> = None;

        // Keyset pagination over the primary key so every configuration is
        // evaluated in a single run, regardless of table size; the batch size
        // only bounds how many rows one query pulls.
        loop {
            let batch = self.load_batch(cursor).await?;
            let batch_len = batch.len() as u64;
            evaluated += batch_len;
            cursor = batch.last().map(|configuration| configuration.dealership_id);

            for configuration in batch {
                let Some((cadence, reset_time)) = parse_schedule(&configuration) else {
                    continue;
                };

                if !is_due(cadence, reset_time, configuration.last_reset, now) {
                    continue;
                }

                report.processed += 1;
                let executor = ResetExecutor::new(self.db.as_ref());
                match executor.execute(configuration.dealership_id, now.date()).await {
                    Ok(outcome) => {
                        report.successful += 1;
                        counter!("reset_sweep_resets_total", "outcome" => "success").increment(1);
                        if !outcome.stamp_updated() {
                            counter!("reset_sweep_stamp_failures_total").increment(1);
                        }
                        report.details.push(DealershipResetResult {
                            dealership_id: configuration.dealership_id,
                            success: true,
                            error: None,
                        });
                    }
                    Err(err) => {
                        report.failed += 1;
                        counter!("reset_sweep_resets_total", "outcome" => "failure").increment(1);
                        error!(
                            error = ?err,
                            dealership_id = %configuration.dealership_id,
                            "Reset failed during sweep"
                        );
                        report.details.push(DealershipResetResult {
                            dealership_id: configuration.dealership_id,
                            success: false,
                            error: Some(err.to_string()),
                        });
                    }
                }
            }

            if batch_len < self.config.sweep.batch_size {
                break;
            }
        }

        let elapsed = started.elapsed();
        histogram!("reset_sweep_duration_ms").record(elapsed.as_secs_f64() * 1_000.0);

        info!(
            evaluated = evaluated,
            processed = report.processed,
            successful = report.successful,
            failed = report.failed,
            "Reset sweep completed"
        );

        Ok(report)
    }

    /// Load one batch of configurations after the given cursor, ordered by
    /// dealership id so successive batches never skip or repeat a row.
    async fn load_batch(
        &self,
        cursor: Option<Uuid>,
    ) -> Result<Vec<ResetConfigurationModel>, ApiError> {
        let mut query = ResetConfiguration::find()
            .order_by_asc(ResetConfigurationColumn::DealershipId)
            .limit(self.config.sweep.batch_size);
        if let Some(after) = cursor {
            query = query.filter(ResetConfigurationColumn::DealershipId.gt(after));
        }
        query.all(self.db.as_ref()).await.map_err(|err| {
            error!(error = ?err, "Failed to load reset configurations for sweep");
            ApiError::from(err)
        })
    }
}

/// Parse the stored cadence and reset time of a configuration.
///
/// Rows with an unrecognized cadence or malformed time are logged and treated
/// as not due; one bad row must never stall the rest of the sweep.
fn parse_schedule(
    configuration: &ResetConfigurationModel,
) -> Option<(Cadence, chrono::NaiveTime)> {
    let cadence = match Cadence::from_str(&configuration.cadence) {
        Ok(cadence) => cadence,
        Err(err) => {
            warn!(
                dealership_id = %configuration.dealership_id,
                cadence = %configuration.cadence,
                error = %err,
                "Skipping configuration with unknown cadence"
            );
            return None;
        }
    };

    let Some(reset_time) = configuration.reset_time_of_day() else {
        warn!(
            dealership_id = %configuration.dealership_id,
            reset_time = %configuration.reset_time,
            "Skipping configuration with malformed reset time"
        );
        return None;
    };

    debug!(
        dealership_id = %configuration.dealership_id,
        cadence = %cadence,
        "Evaluating reset configuration"
    );

    Some((cadence, reset_time))
}
