//! HTTP API Layer
//!
//! This crate provides the REST API for the claims intake pipeline using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One per pipeline stage, plus health and reference data
//! - **Middleware**: Request ids, tracing, audit logging, CORS, body limit
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(store, agent, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use domain_claims::{ClaimRecordPort, ClaimsAgent};

use crate::config::ApiConfig;
use crate::handlers::{claims, health, shops};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClaimRecordPort>,
    pub agent: Arc<dyn ClaimsAgent>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ClaimRecordPort>,
        agent: Arc<dyn ClaimsAgent>,
        config: ApiConfig,
    ) -> Self {
        Self { store, agent, config }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Claim store, agent and API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims pipeline routes
    let api_routes = Router::new()
        .route("/analyze-damage", post(claims::analyze_damage))
        .route("/generate-estimate", post(claims::generate_estimate))
        .route("/review-estimate", post(claims::review_estimate))
        .route("/deny-claim", post(claims::deny_claim))
        .route("/approved-repair-shops", get(shops::approved_repair_shops));

    let cors = cors_layer(&state.config);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(body_limit)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
        .with_state(state)
}

/// Builds the CORS layer for the configured origins
///
/// Credentials are allowed, so methods and headers mirror the request
/// instead of using wildcards.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
