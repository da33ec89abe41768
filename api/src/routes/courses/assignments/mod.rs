//! Assignment routes nested under `/courses/{course_id}/assignments`.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::auth::guards::{allow_authenticated, allow_lecturer};
use crate::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod submissions;

/// Builds the assignment route group.
///
/// Routes:
/// - `GET  /` → list a course's assignments (any authenticated user)
/// - `POST /` → create an assignment (owning lecturer only)
/// - Nested submission routes under `/{assignment_id}/submissions`
pub fn assignment_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::list_assignments).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/",
            post(post::create_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_lecturer)),
        )
        .nest(
            "/{assignment_id}/submissions",
            submissions::submission_routes(app_state),
        )
}
