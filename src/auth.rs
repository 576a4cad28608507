//! # Authentication and Authorization
//!
//! This module provides operator bearer authentication and dealership header
//! validation for protected API endpoints. Role checks (manager-only
//! operations) happen in the handlers, against the acting profile named by
//! the X-Actor-Id header.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized, validation_error};
use crate::server::AppState;

/// Dealership ID wrapper for type safety
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealershipId(pub Uuid);

/// Profile acting on behalf of the request, taken from X-Actor-Id
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorId(pub Uuid);

/// Marker type for authenticated operator requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorAuth;

/// Extractor for dealership ID from request extensions
#[derive(Debug, Clone)]
pub struct DealershipExtension(pub DealershipId);

/// Extractor for the acting profile from request extensions
#[derive(Debug, Clone)]
pub struct ActorExtension(pub ActorId);

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware that validates bearer tokens and dealership headers
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    let token = extract_bearer_token(&headers)?;
    validate_token(&config, token)?;

    let dealership = extract_dealership_id(&headers)?;
    tracing::info!(dealership_id = %dealership.0, "Authenticated operator request");

    let mut request = request;
    request
        .extensions_mut()
        .insert(DealershipExtension(dealership));
    request.extensions_mut().insert(OperatorAuth);

    // The actor header is optional at this layer; handlers that perform
    // privileged operations require it via ActorExtension.
    if let Some(actor) = extract_actor_id(&headers)? {
        request.extensions_mut().insert(ActorExtension(actor));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized(Some("Missing Authorization header")))
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| unauthorized(Some("Invalid Authorization header")))
        })
        .and_then(|header| {
            header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized(Some("Authorization header must use Bearer scheme")))
        })
}

fn validate_token(config: &AppConfig, token: &str) -> Result<(), ApiError> {
    let is_valid = config
        .operator_tokens
        .iter()
        .any(|configured| ConstantTimeEq::ct_eq(token.as_bytes(), configured.as_bytes()).into());

    if is_valid {
        Ok(())
    } else {
        Err(unauthorized(Some("Invalid bearer token")))
    }
}

/// Validate an operator bearer token from raw headers, for routes that are
/// authenticated but not scoped to a dealership.
pub fn require_operator(config: &AppConfig, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = extract_bearer_token(headers)?;
    validate_token(config, token)
}

fn extract_dealership_id(headers: &HeaderMap) -> Result<DealershipId, ApiError> {
    let header_value = headers
        .get("X-Dealership-Id")
        .ok_or_else(|| {
            validation_error(
                "Missing required header",
                serde_json::json!({ "X-Dealership-Id": "Required header is missing" }),
            )
        })?
        .to_str()
        .map_err(|_| {
            validation_error(
                "Invalid dealership header",
                serde_json::json!({ "X-Dealership-Id": "Header must be valid UTF-8" }),
            )
        })?;

    header_value
        .parse::<Uuid>()
        .map(DealershipId)
        .map_err(|_| {
            validation_error(
                "Invalid dealership ID",
                serde_json::json!({ "X-Dealership-Id": "Must be a valid UUID" }),
            )
        })
}

fn extract_actor_id(headers: &HeaderMap) -> Result<Option<ActorId>, ApiError> {
    let Some(header_value) = headers.get("X-Actor-Id") else {
        return Ok(None);
    };

    let header_value = header_value.to_str().map_err(|_| {
        validation_error(
            "Invalid actor header",
            serde_json::json!({ "X-Actor-Id": "Header must be valid UTF-8" }),
        )
    })?;

    header_value
        .parse::<Uuid>()
        .map(|id| Some(ActorId(id)))
        .map_err(|_| {
            validation_error(
                "Invalid actor ID",
                serde_json::json!({ "X-Actor-Id": "Must be a valid UUID" }),
            )
        })
}

/// OpenAPI header parameter for X-Dealership-Id
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct DealershipHeader {
    /// Dealership identifier (UUID) that scopes the request to a single dealership
    #[serde(rename = "X-Dealership-Id")]
    #[param(rename = "X-Dealership-Id", value_type = String)]
    pub dealership_id: String,
}

impl<S> FromRequestParts<S> for DealershipExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DealershipExtension>()
            .cloned()
            .ok_or_else(|| {
                validation_error(
                    "Dealership context missing",
                    serde_json::json!({ "X-Dealership-Id": "Dealership context not present" }),
                )
            })
    }
}

impl<S> FromRequestParts<S> for ActorExtension
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActorExtension>()
            .cloned()
            .ok_or_else(|| {
                validation_error(
                    "Actor context missing",
                    serde_json::json!({ "X-Actor-Id": "Required header is missing" }),
                )
            })
    }
}

impl<S> FromRequestParts<S> for OperatorAuth
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OperatorAuth>()
            .copied()
            .ok_or_else(|| unauthorized(Some("Operator authentication required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    fn create_test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            operator_tokens: vec!["test-token-123".to_string()],
            ..Default::default()
        })
    }

    async fn run_middleware(config: Arc<AppConfig>, request: Request<Body>) -> Response {
        async fn handler() -> &'static str {
            "OK"
        }

        Router::new()
            .route("/test", get(handler))
            .layer(axum::middleware::from_fn_with_state(
                Arc::clone(&config),
                auth_middleware,
            ))
            .with_state(AppState {
                config,
                db: sea_orm::DatabaseConnection::default(),
            })
            .oneshot(request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_auth_header_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("X-Dealership-Id", Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_auth_scheme_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dGVzdDoxMjM=")
            .header("X-Dealership-Id", Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer wrong-token")
            .header("X-Dealership-Id", Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_dealership_header_returns_400() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_dealership_uuid_returns_400() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header("X-Dealership-Id", "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_actor_uuid_returns_400() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header("X-Dealership-Id", Uuid::new_v4().to_string())
            .header("X-Actor-Id", "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_request_passes_through() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header("X-Dealership-Id", Uuid::new_v4().to_string())
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn multiple_tokens_supported() {
        let config = Arc::new(AppConfig {
            operator_tokens: vec![
                "token-one".to_string(),
                "token-two".to_string(),
                "token-three".to_string(),
            ],
            ..Default::default()
        });

        for candidate in ["token-one", "token-two", "token-three"] {
            let request = Request::builder()
                .uri("/test")
                .header("Authorization", format!("Bearer {}", candidate))
                .header("X-Dealership-Id", Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap();

            let response = run_middleware(Arc::clone(&config), request).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
