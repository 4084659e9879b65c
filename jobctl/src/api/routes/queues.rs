//! Queue administration routes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/queues` | List all queues with status |
//! | GET | `/api/queues/{slug}` | Get a single queue by slug |
//! | PUT | `/api/queues/{slug}` | Update the queue's pause state |
//! | POST | `/api/queues/{slug}/command` | Run an operator command |
//! | GET | `/api/queues/{slug}/jobs` | Search jobs by status |
//! | DELETE | `/api/queues/{slug}/jobs` | Purge queued or failed jobs |
//!
//! Queues are addressed by their external slug form (e.g. `smart-search`);
//! an unknown slug renders a 404, never a crash.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use engine_api::QueueName;

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{
    JobResponse, JobSearchParams, MessageResponse, QueueCommandRequest, QueueDeleteRequest,
    QueueResponse, QueueUpdateRequest,
};
use crate::api::server::AppState;

/// Create the queues router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_queues))
        .route("/{slug}", get(get_queue).put(update_queue))
        .route("/{slug}/command", axum::routing::post(run_command))
        .route("/{slug}/jobs", get(search_jobs).delete(empty_queue))
}

fn resolve(state: &AppState, slug: &str) -> ApiResult<QueueName> {
    state.queues.resolve_slug(slug).map_err(ApiError::from)
}

/// List all queues with their pause state and statistics.
#[utoipa::path(
    get,
    path = "/api/queues",
    tag = "Queues",
    responses(
        (status = 200, description = "All queues", body = Vec<QueueResponse>)
    )
)]
pub(crate) async fn list_queues(State(state): State<AppState>) -> Json<Vec<QueueResponse>> {
    let descriptions = state.queues.describe_all().await;
    Json(descriptions.into_iter().map(QueueResponse::from).collect())
}

/// Get a single queue.
#[utoipa::path(
    get,
    path = "/api/queues/{slug}",
    tag = "Queues",
    params(("slug" = String, Path, description = "Queue slug, e.g. `smart-search`")),
    responses(
        (status = 200, description = "Queue status", body = QueueResponse),
        (status = 404, description = "Unknown queue")
    )
)]
pub(crate) async fn get_queue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<QueueResponse>> {
    let name = resolve(&state, &slug)?;
    Ok(Json(state.queues.describe(name).await.into()))
}

/// Update the queue's pause state.
#[utoipa::path(
    put,
    path = "/api/queues/{slug}",
    tag = "Queues",
    params(("slug" = String, Path, description = "Queue slug")),
    request_body = QueueUpdateRequest,
    responses(
        (status = 200, description = "Post-update queue status", body = QueueResponse),
        (status = 400, description = "Queue is not under operator control"),
        (status = 404, description = "Unknown queue")
    )
)]
pub(crate) async fn update_queue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<QueueUpdateRequest>,
) -> ApiResult<Json<QueueResponse>> {
    let name = resolve(&state, &slug)?;
    let description = state.queues.update(name, request.is_paused).await?;
    Ok(Json(description.into()))
}

/// Run an operator command against the queue.
#[utoipa::path(
    post,
    path = "/api/queues/{slug}/command",
    tag = "Queues",
    params(("slug" = String, Path, description = "Queue slug")),
    request_body = QueueCommandRequest,
    responses(
        (status = 200, description = "Command dispatched", body = MessageResponse),
        (status = 400, description = "Command not supported by this queue"),
        (status = 404, description = "Unknown queue"),
        (status = 503, description = "Execution engine unavailable")
    )
)]
pub(crate) async fn run_command(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<QueueCommandRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let name = resolve(&state, &slug)?;
    state
        .queues
        .run_command(name, request.command, request.force)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "command '{}' dispatched to queue '{}'",
        request.command, name
    ))))
}

/// Search jobs in the queue, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/queues/{slug}/jobs",
    tag = "Queues",
    params(
        ("slug" = String, Path, description = "Queue slug"),
        JobSearchParams
    ),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<JobResponse>),
        (status = 404, description = "Unknown queue"),
        (status = 503, description = "Execution engine unavailable")
    )
)]
pub(crate) async fn search_jobs(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<JobSearchParams>,
) -> ApiResult<Json<Vec<JobResponse>>> {
    let name = resolve(&state, &slug)?;
    let statuses = params.statuses().map_err(ApiError::bad_request)?;
    let jobs = state.queues.search_jobs(name, &statuses).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// Purge queued jobs, or failed jobs only when `failed` is set.
#[utoipa::path(
    delete,
    path = "/api/queues/{slug}/jobs",
    tag = "Queues",
    params(("slug" = String, Path, description = "Queue slug")),
    request_body = QueueDeleteRequest,
    responses(
        (status = 200, description = "Purge dispatched", body = MessageResponse),
        (status = 400, description = "Command not supported by this queue"),
        (status = 404, description = "Unknown queue"),
        (status = 503, description = "Execution engine unavailable")
    )
)]
pub(crate) async fn empty_queue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<QueueDeleteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let name = resolve(&state, &slug)?;
    let failed = request.failed.unwrap_or(false);
    state.queues.empty(name, failed).await?;
    let what = if failed { "failed jobs" } else { "queued jobs" };
    Ok(Json(MessageResponse::new(format!(
        "cleared {} from queue '{}'",
        what, name
    ))))
}
