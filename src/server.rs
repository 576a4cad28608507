//! # Server Configuration
//!
//! This module contains the server setup and configuration for the resets
//! service: router assembly, shared state, and graceful shutdown.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry::{TraceContext, with_trace_context};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/v1/reset-configuration",
            get(handlers::reset_config::get_reset_configuration)
                .put(handlers::reset_config::put_reset_configuration),
        )
        .route("/api/v1/resets", post(handlers::resets::trigger_manual_reset))
        .route(
            "/api/v1/submissions",
            post(handlers::submissions::create_submission)
                .get(handlers::submissions::list_submissions),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth_middleware,
        ));

    // The sweep trigger authenticates with the same operator tokens but is
    // not scoped to a dealership, so it sits outside the tenant middleware.
    let internal = Router::new().route(
        "/internal/resets/run",
        post(handlers::resets::run_reset_sweep),
    );

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected)
        .merge(internal)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Assign each request a trace ID, exposed both as a request extension and as
/// task-local context so error responses carry a real correlation ID.
async fn trace_context_middleware(mut request: Request, next: Next) -> Response {
    let context = TraceContext {
        trace_id: uuid::Uuid::new_v4().to_string(),
    };
    request.extensions_mut().insert(context.clone());
    with_trace_context(context, next.run(request)).await
}

/// Build the application state used by handler tests.
pub fn create_test_app_state(config: AppConfig, db: DatabaseConnection) -> AppState {
    AppState {
        config: Arc::new(config),
        db,
    }
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
    shutdown: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr()?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, %profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::reset_config::get_reset_configuration,
        crate::handlers::reset_config::put_reset_configuration,
        crate::handlers::resets::trigger_manual_reset,
        crate::handlers::resets::run_reset_sweep,
        crate::handlers::submissions::create_submission,
        crate::handlers::submissions::list_submissions,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::reset::cadence::Cadence,
            crate::reset::sweep::SweepReport,
            crate::reset::sweep::DealershipResetResult,
            crate::handlers::reset_config::ResetConfigurationDto,
            crate::handlers::reset_config::UpdateResetConfigurationDto,
            crate::handlers::resets::ManualResetResponseDto,
            crate::handlers::submissions::CreateSubmissionDto,
            crate::handlers::submissions::SubmissionDto,
            crate::error::ApiError,
        )
    ),
    info(
        title = "Sales Assist Resets API",
        description = "API for dealership report data and scheduled resets",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
