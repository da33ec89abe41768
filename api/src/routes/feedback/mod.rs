//! AI feedback generation.
//!
//! This route group carries its own fixed wire contract
//! (`{ "feedback": ... }` on success, `{ "error": ... }` on failure) instead
//! of the standard `ApiResponse` envelope, and performs its authentication
//! and authorization checks inline so every failure maps onto that contract.

use axum::{Router, routing::post};

use crate::state::AppState;

pub mod post;

pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/", post(post::generate_feedback))
}
