//! # Submissions API Handlers
//!
//! This module contains handlers for logging and listing objection reports.
//! Logging a submission also bumps the per-user running totals that a reset
//! later clears.

use crate::auth::{ActorExtension, DealershipExtension, OperatorAuth};
use crate::error::ApiError;
use crate::repositories::{
    CreateSubmissionRequest, SubmissionRepository, UserChoiceTotalRepository,
};
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request payload for logging a submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSubmissionDto {
    /// Objection choices selected on the form (at least one)
    #[schema(example = json!(["price", "trade-in value"]))]
    pub choices: Vec<String>,
    /// Free-form comment (optional)
    pub comment: Option<String>,
}

/// Submission as exposed over the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDto {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub user_id: Uuid,
    pub choices: serde_json::Value,
    pub comment: Option<String>,
    /// Timestamp when the submission was logged (ISO 8601)
    pub created_at: String,
}

/// Log a new objection submission
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    security(("bearer_auth" = [])),
    params(crate::auth::DealershipHeader),
    request_body = CreateSubmissionDto,
    responses(
        (status = 201, description = "Submission logged", body = SubmissionDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    DealershipExtension(dealership): DealershipExtension,
    ActorExtension(actor): ActorExtension,
    Json(request): Json<CreateSubmissionDto>,
) -> Result<(StatusCode, Json<SubmissionDto>), ApiError> {
    let repo = SubmissionRepository::new(&state.db);
    let submission = repo
        .create_submission(CreateSubmissionRequest {
            dealership_id: dealership.0,
            user_id: actor.0,
            choices: request.choices.clone(),
            comment: request.comment,
        })
        .await?;

    // Bump the running totals after the submission lands. A failed bump
    // leaves the totals slightly behind the submissions; both are cleared
    // together by the next reset.
    let totals = UserChoiceTotalRepository::new(&state.db);
    for choice in &request.choices {
        if let Err(err) = totals.increment_total(actor.0, choice).await {
            tracing::warn!(
                error = ?err,
                user_id = %actor.0,
                choice = %choice,
                "Failed to bump choice total"
            );
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmissionDto {
            id: submission.id,
            dealership_id: submission.dealership_id,
            user_id: submission.user_id,
            choices: submission.choices,
            comment: submission.comment,
            created_at: submission.created_at.to_rfc3339(),
        }),
    ))
}

/// List the requesting dealership's submissions, newest first
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    security(("bearer_auth" = [])),
    params(crate::auth::DealershipHeader),
    responses(
        (status = 200, description = "Submissions", body = [SubmissionDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    DealershipExtension(dealership): DealershipExtension,
) -> Result<Json<Vec<SubmissionDto>>, ApiError> {
    let repo = SubmissionRepository::new(&state.db);
    let submissions = repo.list_submissions_for_dealership(dealership.0).await?;

    Ok(Json(
        submissions
            .into_iter()
            .map(|model| SubmissionDto {
                id: model.id,
                dealership_id: model.dealership_id,
                user_id: model.user_id,
                choices: model.choices,
                comment: model.comment,
                created_at: model.created_at.to_rfc3339(),
            })
            .collect(),
    ))
}
