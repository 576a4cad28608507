//! # Resets API Handlers
//!
//! This module contains the manual reset endpoint and the sweep trigger hit
//! by the external scheduler.

use std::sync::Arc;

use crate::auth::{ActorExtension, DealershipExtension, OperatorAuth, require_operator};
use crate::error::ApiError;
use crate::handlers::reset_config::require_manager;
use crate::reset::{ResetExecutor, ResetSweep, SweepReport};
use crate::server::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response payload for a manual reset
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ManualResetResponseDto {
    pub success: bool,
    /// Human-readable outcome description
    #[schema(example = "Dealership data reset completed")]
    pub message: String,
    /// Date the reset ran on (ISO 8601 date)
    #[schema(example = "2024-06-10")]
    pub reset_date: String,
}

/// Reset the requesting dealership's report data immediately
///
/// Manager-only: the acting profile must be a manager of exactly the
/// requesting dealership, so a manager can never clear another dealership's
/// data. Runs the same executor as the scheduled sweep.
#[utoipa::path(
    post,
    path = "/api/v1/resets",
    security(("bearer_auth" = [])),
    params(crate::auth::DealershipHeader),
    responses(
        (status = 200, description = "Reset completed", body = ManualResetResponseDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Acting profile is not a manager of this dealership", body = ApiError),
        (status = 500, description = "Reset failed", body = ApiError)
    ),
    tag = "resets"
)]
pub async fn trigger_manual_reset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    DealershipExtension(dealership): DealershipExtension,
    ActorExtension(actor): ActorExtension,
) -> Result<Json<ManualResetResponseDto>, ApiError> {
    require_manager(&state, actor.0, dealership.0).await?;

    let today = Utc::now().date_naive();
    let executor = ResetExecutor::new(&state.db);
    let outcome = executor.execute(dealership.0, today).await.map_err(|err| {
        tracing::error!(error = ?err, dealership_id = %dealership.0, "Manual reset failed");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "RESET_FAILED",
            &err.to_string(),
        )
    })?;

    tracing::info!(
        dealership_id = %dealership.0,
        actor_id = %actor.0,
        stamp_updated = outcome.stamp_updated(),
        "Manual reset completed"
    );

    let message = if outcome.stamp_updated() {
        "Dealership data reset completed".to_string()
    } else {
        "Dealership data reset completed; schedule stamp update failed".to_string()
    };

    Ok(Json(ManualResetResponseDto {
        success: true,
        message,
        reset_date: outcome.reset_date().to_string(),
    }))
}

/// Run one reset sweep over all dealerships
///
/// Trigger endpoint for an external timer (cron or platform scheduler). The
/// sweep evaluates every stored configuration against the current time and
/// resets the due ones, reporting per-dealership outcomes.
#[utoipa::path(
    post,
    path = "/internal/resets/run",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sweep completed", body = SweepReport),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Sweep aborted", body = ApiError)
    ),
    tag = "resets"
)]
pub async fn run_reset_sweep(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SweepReport>, ApiError> {
    require_operator(&state.config, &headers)?;

    let sweep = ResetSweep::new(Arc::clone(&state.config), Arc::new(state.db.clone()));
    let report = sweep.run(Utc::now().naive_utc()).await?;

    Ok(Json(report))
}
