//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the resets API.

pub mod reset_config;
pub mod resets;
pub mod submissions;

use crate::db;
use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness and database health probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy"),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "root"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::error!(error = ?err, "Health check failed");
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database unreachable",
        )
    })?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
