use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::Model as Submission;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::MAX_FEEDBACK_CHARS;
use crate::routes::submissions::common::check_submission_owner;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Grade in [0, 100].
    pub grade: f64,
    /// Written feedback, at most 5000 characters.
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ReviewResponse {
    pub id: i64,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub updated_at: String,
}

/// PATCH /api/submissions/{submission_id}
///
/// Record a grade and written feedback on a submission. Only the lecturer
/// who owns the course chain may review it.
///
/// ### Request Body
/// ```json
/// {
///   "grade": 72.5,
///   "feedback": "Solid work; expand the analysis in section 2."
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated grade and feedback
/// - `400 Bad Request` when the grade is out of range or the feedback too long
/// - `403 Forbidden` when the course chain belongs to another lecturer
/// - `404 Not Found` when the submission does not exist
/// - `500 Internal Server Error` on database errors
pub async fn review_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ReviewRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = check_submission_owner(db, submission_id, claims.sub).await {
        return e.into_response();
    }

    if !req.grade.is_finite() || !(0.0..=100.0).contains(&req.grade) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ReviewResponse>::error(
                "Grade must be a finite number between 0 and 100",
            )),
        )
            .into_response();
    }

    if let Some(feedback) = req.feedback.as_deref() {
        if feedback.chars().count() > MAX_FEEDBACK_CHARS {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ReviewResponse>::error(
                    "Feedback must be at most 5000 characters",
                )),
            )
                .into_response();
        }
    }

    match Submission::set_review(db, submission_id, req.grade, req.feedback.as_deref()).await {
        Ok(Some(updated)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ReviewResponse {
                    id: updated.id,
                    grade: updated.grade,
                    feedback: updated.feedback,
                    updated_at: updated.updated_at.to_rfc3339(),
                },
                "Review submitted successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ReviewResponse>::error(format!(
                "Submission {} not found.",
                submission_id
            ))),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ReviewResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        )
            .into_response(),
    }
}
