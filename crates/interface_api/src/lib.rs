//! HTTP API Layer
//!
//! This crate provides the REST API for the cattery service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One module per resource, each a thin adapter over a
//!   `domain_cattery` service
//! - **Extractors**: JSON bodies are deserialized and validated before a
//!   handler runs
//! - **Middleware**: Request ids, tracing, request logging, CORS
//! - **Error Handling**: Domain errors map to `{"error", "detail"}` bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::header::HeaderName,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_cattery::{BreedRepository, BreedService, KittenRepository, KittenService};
use infra_db::repositories::{PostgresBreedRepository, PostgresKittenRepository};

use crate::handlers::{breed, health, kitten};
use crate::middleware::request_log_middleware;

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub kittens: KittenService,
    pub breeds: BreedService,
}

impl AppState {
    /// Builds the state over arbitrary repository implementations
    pub fn new(
        kitten_repository: Arc<dyn KittenRepository>,
        breed_repository: Arc<dyn BreedRepository>,
    ) -> Self {
        Self {
            kittens: KittenService::new(kitten_repository),
            breeds: BreedService::new(breed_repository),
        }
    }

    /// Builds the state over the PostgreSQL repositories
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresKittenRepository::new(pool.clone())),
            Arc::new(PostgresBreedRepository::new(pool)),
        )
    }
}

/// Creates the main API router
///
/// Collection routes answer both with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/breeds", get(breed::list_breeds))
        .route("/breeds/", get(breed::list_breeds))
        .route(
            "/kittens",
            get(kitten::list_kittens).post(kitten::create_kitten),
        )
        .route(
            "/kittens/",
            get(kitten::list_kittens).post(kitten::create_kitten),
        )
        .route(
            "/kittens/:id",
            get(kitten::get_kitten)
                .put(kitten::update_kitten)
                .patch(kitten::patch_kitten)
                .delete(kitten::delete_kitten),
        )
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
