//! Execution-engine interface for the jobctl control plane.
//!
//! The control plane never runs jobs itself; it dispatches bulk commands to an
//! execution engine and reads job statistics back from it. This crate defines
//! that boundary: the shared queue/job vocabulary, the [`ExecutionEngine`]
//! trait, and an in-memory reference engine used for standalone operation and
//! tests.

pub mod engine;
pub mod error;
pub mod memory;
pub mod types;

pub use engine::ExecutionEngine;
pub use error::EngineError;
pub use memory::InMemoryEngine;
pub use types::{JobName, JobRecord, JobStatus, QueueName, QueueStatistics, StartMode};
