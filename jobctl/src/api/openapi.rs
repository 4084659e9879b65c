//! OpenAPI documentation.

use utoipa::OpenApi;

use engine_api::{JobName, JobStatus, QueueName, QueueStatistics};

use crate::api::error::ApiErrorResponse;
use crate::api::models::{
    HealthResponse, JobResponse, LogFilterResponse, LogFilterUpdateRequest, MessageResponse,
    QueueCommandRequest, QueueDeleteRequest, QueueResponse, QueueUpdateRequest,
};
use crate::api::routes;
use crate::queue::QueueCommand;

/// OpenAPI document for the queue control-plane API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "jobctl API",
        description = "Administrative control plane for background-processing queues",
        version = env!("CARGO_PKG_VERSION"),
    ),
    paths(
        routes::queues::list_queues,
        routes::queues::get_queue,
        routes::queues::update_queue,
        routes::queues::run_command,
        routes::queues::search_jobs,
        routes::queues::empty_queue,
        routes::logging::get_filter,
        routes::logging::set_filter,
        routes::health::health,
        routes::health::liveness,
    ),
    components(schemas(
        QueueResponse,
        QueueUpdateRequest,
        QueueCommandRequest,
        QueueDeleteRequest,
        JobResponse,
        MessageResponse,
        HealthResponse,
        LogFilterResponse,
        LogFilterUpdateRequest,
        ApiErrorResponse,
        QueueName,
        JobName,
        JobStatus,
        QueueStatistics,
        QueueCommand,
    )),
    tags(
        (name = "Queues", description = "Queue administration"),
        (name = "Logging", description = "Runtime logging control"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
