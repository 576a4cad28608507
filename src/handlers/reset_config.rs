//! # Reset Configuration API Handlers
//!
//! This module contains handlers for reading and writing the per-dealership
//! reset schedule.

use crate::auth::{ActorExtension, DealershipExtension, OperatorAuth};
use crate::error::{ApiError, forbidden};
use crate::repositories::{ProfileRepository, ResetConfigurationRepository};
use crate::reset::SENTINEL_LAST_RESET;
use crate::server::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Reset configuration as exposed over the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetConfigurationDto {
    /// Dealership the configuration belongs to
    pub dealership_id: Uuid,
    /// Reset cadence (daily|weekly|monthly|yearly)
    #[schema(example = "weekly")]
    pub cadence: String,
    /// Time-of-day for the reset as HH:MM:SS
    #[schema(example = "09:30:00")]
    pub reset_time: String,
    /// Calendar date of the most recent reset (ISO 8601 date)
    #[schema(example = "2024-06-10")]
    pub last_reset: String,
}

/// Request payload for updating the reset schedule
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateResetConfigurationDto {
    /// Reset cadence (daily|weekly|monthly|yearly)
    #[schema(example = "weekly")]
    pub cadence: String,
    /// Time-of-day for the reset as HH:MM in 24-hour form
    #[schema(example = "9:30")]
    pub reset_time: String,
}

/// Get the reset configuration for the requesting dealership
///
/// A dealership that has never saved a schedule gets the defaults back.
#[utoipa::path(
    get,
    path = "/api/v1/reset-configuration",
    security(("bearer_auth" = [])),
    params(crate::auth::DealershipHeader),
    responses(
        (status = 200, description = "Reset configuration", body = ResetConfigurationDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reset-configuration"
)]
pub async fn get_reset_configuration(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    DealershipExtension(dealership): DealershipExtension,
) -> Result<Json<ResetConfigurationDto>, ApiError> {
    let repo = ResetConfigurationRepository::new(&state.db);
    let configuration = repo.get_configuration(dealership.0).await?;

    let dto = match configuration {
        Some(model) => ResetConfigurationDto {
            dealership_id: model.dealership_id,
            cadence: model.cadence,
            reset_time: model.reset_time,
            last_reset: model.last_reset.to_string(),
        },
        None => ResetConfigurationDto {
            dealership_id: dealership.0,
            cadence: "daily".to_string(),
            reset_time: "12:00:00".to_string(),
            last_reset: SENTINEL_LAST_RESET.to_string(),
        },
    };

    Ok(Json(dto))
}

/// Update the reset schedule for the requesting dealership
///
/// Manager-only: the acting profile named by X-Actor-Id must be a manager of
/// the requesting dealership. The reset stamp is never changed by this
/// endpoint.
#[utoipa::path(
    put,
    path = "/api/v1/reset-configuration",
    security(("bearer_auth" = [])),
    params(crate::auth::DealershipHeader),
    request_body = UpdateResetConfigurationDto,
    responses(
        (status = 200, description = "Configuration saved", body = ResetConfigurationDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 403, description = "Acting profile is not a manager of this dealership", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reset-configuration"
)]
pub async fn put_reset_configuration(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    DealershipExtension(dealership): DealershipExtension,
    ActorExtension(actor): ActorExtension,
    Json(request): Json<UpdateResetConfigurationDto>,
) -> Result<Json<ResetConfigurationDto>, ApiError> {
    require_manager(&state, actor.0, dealership.0).await?;

    let repo = ResetConfigurationRepository::new(&state.db);
    let model = repo
        .upsert_configuration(dealership.0, &request.cadence, &request.reset_time)
        .await?;

    tracing::info!(
        dealership_id = %dealership.0,
        cadence = %model.cadence,
        reset_time = %model.reset_time,
        "Reset configuration updated"
    );

    Ok(Json(ResetConfigurationDto {
        dealership_id: model.dealership_id,
        cadence: model.cadence,
        reset_time: model.reset_time,
        last_reset: model.last_reset.to_string(),
    }))
}

/// Verify that `actor_id` is a manager profile belonging to `dealership_id`.
pub(crate) async fn require_manager(
    state: &AppState,
    actor_id: Uuid,
    dealership_id: Uuid,
) -> Result<(), ApiError> {
    let repo = ProfileRepository::new(&state.db);
    let profile = repo
        .get_profile_by_id(actor_id)
        .await?
        .ok_or_else(|| forbidden(Some("Acting profile not found")))?;

    if profile.dealership_id != dealership_id {
        return Err(forbidden(Some(
            "Acting profile does not belong to this dealership",
        )));
    }
    if !profile.is_manager() {
        return Err(forbidden(Some("Manager role required")));
    }

    Ok(())
}
