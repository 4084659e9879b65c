//! Queue control plane.
//!
//! The registry defines which commands each queue accepts, the state store
//! owns per-queue pause state under serialized transitions, the command
//! processor validates and dispatches operator commands, and the service
//! composes the read path.

pub mod command;
pub mod events;
pub mod registry;
pub mod service;
pub mod state;

pub use command::{CommandProcessor, QueueCommand};
pub use events::{QueueEvent, QueueEventBroadcaster};
pub use registry::QueueCapabilities;
pub use service::{QueueDescription, QueueService};
pub use state::{QueueState, QueueStateStore};
