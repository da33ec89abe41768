//! Submission review routes, addressed by submission id alone (the lecturer
//! review page). Ownership is resolved through the submission's course chain.

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::auth::guards::allow_lecturer;
use crate::state::AppState;

pub mod common;
pub mod get;
pub mod patch;

pub fn submissions_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/{submission_id}",
            get(get::get_submission).patch(patch::review_submission),
        )
        .route_layer(from_fn_with_state(app_state, allow_lecturer))
}
