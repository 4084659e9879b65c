//! The execution-engine contract.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::types::{JobRecord, JobStatus, QueueName, QueueStatistics, StartMode};

/// Interface the control plane consumes from the job-execution engine.
///
/// All calls may suspend pending the engine's response. Dispatch calls return
/// once the engine acknowledges the request, not once the work completes.
/// Dispatch is at-least-once under caller timeouts; the engine is required to
/// dedupe re-issued bulk starts so control-plane retries stay safe.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Dispatch a bulk processing run for `queue`.
    ///
    /// `StartMode::Unspecified` leaves the all-vs-missing-only decision to the
    /// engine's default.
    async fn start(&self, queue: QueueName, mode: StartMode) -> Result<(), EngineError>;

    /// Purge jobs from `queue`: failed jobs only when `failed_only`, otherwise
    /// all non-active jobs. The two modes are mutually exclusive by
    /// construction.
    async fn clear(&self, queue: QueueName, failed_only: bool) -> Result<(), EngineError>;

    /// Read the queue's current job counts.
    async fn statistics(&self, queue: QueueName) -> Result<QueueStatistics, EngineError>;

    /// List jobs in `queue`, restricted to `status_filter` when non-empty.
    ///
    /// Re-querying re-executes the filter against current engine state; no
    /// cursor is retained across calls.
    async fn list_jobs(
        &self,
        queue: QueueName,
        status_filter: &[JobStatus],
    ) -> Result<Vec<JobRecord>, EngineError>;
}
