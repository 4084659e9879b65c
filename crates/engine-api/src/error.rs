//! Engine-side error types.

use thiserror::Error;

use crate::types::QueueName;

/// Errors surfaced by an execution engine.
///
/// The control plane propagates these to its callers with command context;
/// retry policy belongs to the caller, never to the control plane.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("execution engine unavailable for queue '{queue}': {reason}")]
    Unavailable { queue: QueueName, reason: String },

    #[error("execution engine timed out for queue '{queue}' after {timeout_ms}ms")]
    Timeout { queue: QueueName, timeout_ms: u64 },
}

impl EngineError {
    pub fn unavailable(queue: QueueName, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            queue,
            reason: reason.into(),
        }
    }

    /// The queue the failed call targeted.
    pub fn queue(&self) -> QueueName {
        match self {
            Self::Unavailable { queue, .. } => *queue,
            Self::Timeout { queue, .. } => *queue,
        }
    }
}
