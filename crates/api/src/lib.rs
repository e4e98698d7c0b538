//! HTTP API layer for formflow.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: Builder-facing form/block/interaction management and
//!   respondent-facing sessions
//! - **Extractors**: Authentication
//! - **Middleware**: Token auth, application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
