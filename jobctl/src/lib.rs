//! jobctl library crate.
//!
//! Administrative control plane over named background-processing queues:
//! per-queue pause state, operator commands, and a status read path over a
//! pluggable execution engine.

pub mod api;
pub mod database;
pub mod error;
pub mod logging;
pub mod queue;

pub use error::{Error, Result};
