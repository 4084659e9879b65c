//! REST API server module.
//!
//! HTTP binding over the transport-agnostic queue service: queue status,
//! pause-state updates, operator commands and job search.

pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;

pub use server::{ApiServer, AppState};
