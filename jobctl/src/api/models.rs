//! API request and response models.

use engine_api::{JobName, JobRecord, JobStatus, QueueName, QueueStatistics};
use serde::{Deserialize, Serialize};

use crate::queue::{QueueCommand, QueueDescription};

/// A queue's composed status.
///
/// # Example Response
///
/// ```json
/// {
///     "name": "videoConversion",
///     "isPaused": false,
///     "statistics": {
///         "active": 1,
///         "completed": 120,
///         "failed": 2,
///         "delayed": 0,
///         "waiting": 14,
///         "paused": 0
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub name: QueueName,
    pub is_paused: bool,
    /// `null` when the engine's statistics could not be read; never a
    /// fabricated zero snapshot.
    pub statistics: Option<QueueStatistics>,
}

impl From<QueueDescription> for QueueResponse {
    fn from(description: QueueDescription) -> Self {
        Self {
            name: description.name,
            is_paused: description.is_paused,
            statistics: description.statistics,
        }
    }
}

/// Request body for updating a queue's control state.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueUpdateRequest {
    /// Desired pause state. Absent means "leave unchanged".
    pub is_paused: Option<bool>,
}

/// Request body for running an operator command.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueCommandRequest {
    pub command: QueueCommand,
    /// For `start`: `true` reprocesses all assets, `false` only assets
    /// missing this queue's output, absent defers to the engine default.
    pub force: Option<bool>,
}

/// Request body for emptying a queue.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct QueueDeleteRequest {
    /// If true, removes failed jobs instead of queued ones.
    #[serde(default)]
    pub failed: Option<bool>,
}

/// Query parameters for job search.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct JobSearchParams {
    /// Comma-separated job statuses (e.g. `waiting,failed`). Absent means
    /// all statuses.
    pub status: Option<String>,
}

impl JobSearchParams {
    /// Parse the status filter, rejecting unknown values.
    pub fn statuses(&self) -> Result<Vec<JobStatus>, String> {
        let Some(raw) = self.status.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<JobStatus>()
                    .map_err(|_| format!("unknown job status: '{}'", part))
            })
            .collect()
    }
}

/// A job observed through the engine's browse interface.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct JobResponse {
    pub id: Option<String>,
    pub name: JobName,
    pub data: serde_json::Value,
}

impl From<JobRecord> for JobResponse {
    fn from(record: JobRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            data: record.data,
        }
    }
}

/// Generic acknowledgment for dispatch-style operations.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Status or result message
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Current log filter directive.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LogFilterResponse {
    pub filter: String,
}

/// Request body for replacing the log filter directive.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct LogFilterUpdateRequest {
    /// Directive in `EnvFilter` syntax, e.g. `jobctl=debug,sqlx=warn`.
    pub filter: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_response_serializes_camel_case() {
        let response = QueueResponse {
            name: QueueName::SmartSearch,
            is_paused: true,
            statistics: Some(QueueStatistics::default()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "smartSearch");
        assert_eq!(json["isPaused"], true);
        assert_eq!(json["statistics"]["waiting"], 0);
    }

    #[test]
    fn test_unknown_statistics_serialize_as_null() {
        let response = QueueResponse {
            name: QueueName::Ocr,
            is_paused: false,
            statistics: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["statistics"].is_null());
    }

    #[test]
    fn test_command_request_accepts_wire_names() {
        let request: QueueCommandRequest =
            serde_json::from_str(r#"{"command": "clear-failed"}"#).unwrap();
        assert_eq!(request.command, QueueCommand::ClearFailed);
        assert_eq!(request.force, None);

        let request: QueueCommandRequest =
            serde_json::from_str(r#"{"command": "start", "force": false}"#).unwrap();
        assert_eq!(request.command, QueueCommand::Start);
        assert_eq!(request.force, Some(false));
    }

    #[test]
    fn test_job_search_params_parse() {
        let params = JobSearchParams {
            status: Some("waiting, failed".to_string()),
        };
        assert_eq!(
            params.statuses().unwrap(),
            vec![JobStatus::Waiting, JobStatus::Failed]
        );

        let params = JobSearchParams { status: None };
        assert!(params.statuses().unwrap().is_empty());

        let params = JobSearchParams {
            status: Some("bogus".to_string()),
        };
        assert!(params.statuses().is_err());
    }
}
