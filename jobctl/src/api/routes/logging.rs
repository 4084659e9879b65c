//! Runtime logging control routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{LogFilterResponse, LogFilterUpdateRequest};
use crate::api::server::AppState;

/// Create the logging router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_filter).put(set_filter))
}

/// Current log filter directive.
#[utoipa::path(
    get,
    path = "/api/logging",
    tag = "Logging",
    responses(
        (status = 200, description = "Current filter", body = LogFilterResponse),
        (status = 503, description = "Runtime logging control is not available")
    )
)]
pub(crate) async fn get_filter(State(state): State<AppState>) -> ApiResult<Json<LogFilterResponse>> {
    let config = state
        .logging_config
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Runtime logging control is not available"))?;

    Ok(Json(LogFilterResponse {
        filter: config.get_filter(),
    }))
}

/// Replace the log filter directive at runtime.
#[utoipa::path(
    put,
    path = "/api/logging",
    tag = "Logging",
    request_body = LogFilterUpdateRequest,
    responses(
        (status = 200, description = "Filter applied", body = LogFilterResponse),
        (status = 400, description = "Invalid filter directive"),
        (status = 503, description = "Runtime logging control is not available")
    )
)]
pub(crate) async fn set_filter(
    State(state): State<AppState>,
    Json(request): Json<LogFilterUpdateRequest>,
) -> ApiResult<Json<LogFilterResponse>> {
    let config = state
        .logging_config
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Runtime logging control is not available"))?;

    config.set_filter(&request.filter).map_err(ApiError::from)?;

    Ok(Json(LogFilterResponse {
        filter: config.get_filter(),
    }))
}
