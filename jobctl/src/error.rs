//! Application-wide error types.

use engine_api::{EngineError, QueueName};
use thiserror::Error;

use crate::queue::command::QueueCommand;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
///
/// The first two variants are local validation failures and are always raised
/// before any state mutation or engine call. Engine failures pass through with
/// enough context (queue, operation) for the caller to decide on retry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown queue: '{0}'")]
    UnknownQueue(String),

    #[error("queue '{queue}' does not support the '{command}' command: {reason}")]
    CommandNotSupported {
        queue: QueueName,
        command: QueueCommand,
        reason: &'static str,
    },

    #[error("engine dispatch failed for queue '{queue}' during {operation}: {source}")]
    EngineUnavailable {
        queue: QueueName,
        operation: &'static str,
        source: EngineError,
    },

    #[error("statistics unavailable for queue '{queue}': {source}")]
    StatisticsUnavailable {
        queue: QueueName,
        source: EngineError,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unknown_queue(slug: impl Into<String>) -> Self {
        Self::UnknownQueue(slug.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
