//! Repository layer for database access.

pub mod queue_state;

pub use queue_state::*;
