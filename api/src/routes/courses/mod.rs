//! Course routes: listing and creation, plus nested assignment routes.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::auth::guards::{allow_authenticated, allow_lecturer};
use crate::state::AppState;

pub mod assignments;
pub mod common;
pub mod get;
pub mod post;

/// Builds and returns the `/courses` route group.
///
/// Routes:
/// - `GET  /courses` → list courses (any authenticated user)
/// - `POST /courses` → create a course (lecturers only)
/// - Nested assignment routes under `/courses/{course_id}/assignments`
pub fn courses_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::list_courses).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/",
            post(post::create_course)
                .route_layer(from_fn_with_state(app_state.clone(), allow_lecturer)),
        )
        .nest(
            "/{course_id}/assignments",
            assignments::assignment_routes(app_state),
        )
}
