//! Submission hand-in and listing, nested under
//! `/courses/{course_id}/assignments/{assignment_id}/submissions`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::auth::guards::{allow_lecturer, allow_student};
use crate::state::AppState;

pub mod common;
pub mod get;
pub mod post;

/// Builds the submission route group.
///
/// Routes:
/// - `POST /` → hand in work (students only)
/// - `GET  /` → list an assignment's submissions (owning lecturer only)
pub fn submission_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(post::submit_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_student)),
        )
        .route(
            "/",
            get(get::list_submissions)
                .route_layer(from_fn_with_state(app_state, allow_lecturer)),
        )
}
