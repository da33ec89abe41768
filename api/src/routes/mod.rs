//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via appropriate access
//! control middleware:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration and login (public)
//! - `/courses` → Course and assignment management, submission hand-in
//! - `/submissions` → Submission review endpoints (lecturers)
//! - `/me` → User-specific endpoints (own submissions and feedback)
//! - `/feedback` → AI feedback generation (lecturers, staged checks inline)

use axum::Router;
use axum::http::HeaderName;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub mod auth;
pub mod common;
pub mod courses;
pub mod feedback;
pub mod health;
pub mod me;
pub mod submissions;

/// Builds the complete application router for all HTTP endpoints.
///
/// The CORS layer answers `OPTIONS` preflight requests directly with
/// permissive headers, so preflights never reach authentication.
pub fn routes(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest("/courses", courses::courses_routes(app_state.clone()))
        .nest(
            "/submissions",
            submissions::submissions_routes(app_state.clone()),
        )
        .nest("/me", me::me_routes())
        .nest("/feedback", feedback::feedback_routes())
        .layer(cors)
        .with_state(app_state)
}
