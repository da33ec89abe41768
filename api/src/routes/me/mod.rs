//! User-specific routes under `/me`.

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod submissions;

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/submissions", get(submissions::my_submissions))
}
