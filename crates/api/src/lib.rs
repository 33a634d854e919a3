//! Wiki REST service library.
//!
//! Exposes config, state, error handling, auth, fixtures and routes so the
//! binary, the integration tests and the conformance harness all build the
//! same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
