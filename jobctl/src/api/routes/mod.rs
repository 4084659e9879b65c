//! API route modules.
//!
//! Organizes routes by resource type.

pub mod health;
pub mod logging;
pub mod queues;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::api::server::AppState;

/// Create the main API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/queues", queues::router())
        .nest("/api/logging", logging::router())
        .nest("/health", health::router())
        .with_state(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
