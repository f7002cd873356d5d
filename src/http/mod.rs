//! HTTP API server for the interview web client
//!
//! This module provides the REST API the browser/practice client consumes:
//! - GET /questions-categories - Category reference data
//! - GET /questions-interview?categories=a,b - Sampled interview question set
//! - POST /feedback - Grade one recorded answer (multipart upload)
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
