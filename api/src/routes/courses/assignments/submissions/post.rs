use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::Model as Submission;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::MAX_CONTENT_CHARS;
use crate::routes::courses::assignments::submissions::common::{
    SubmitRequest, check_assignment_hierarchy,
};
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct SubmittedResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub content: String,
    pub file_name: Option<String>,
    pub submitted_at: String,
}

/// POST /api/courses/{course_id}/assignments/{assignment_id}/submissions
///
/// Hand in work for an assignment. Student role required. Resubmission is
/// allowed; each call creates a new submission row.
///
/// ### Request Body
/// ```json
/// {
///   "content": "My essay text...",
///   "file_name": "essay.pdf"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored submission
/// - `400 Bad Request` when the content is empty or exceeds 50,000 characters
/// - `403 Forbidden` when the caller is not a student
/// - `404 Not Found` when the assignment does not exist under the course
/// - `500 Internal Server Error` on database errors
pub async fn submit_assignment(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = check_assignment_hierarchy(course_id, assignment_id, db).await {
        return e.into_response();
    }

    let content = req.content.trim();
    if content.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmittedResponse>::error(
                "No submission content provided",
            )),
        )
            .into_response();
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmittedResponse>::error(
                "Content too large. Maximum 50,000 characters allowed.",
            )),
        )
            .into_response();
    }

    match Submission::create(
        db,
        assignment_id,
        claims.sub,
        content,
        req.file_name.as_deref(),
    )
    .await
    {
        Ok(submission) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SubmittedResponse {
                    id: submission.id,
                    assignment_id: submission.assignment_id,
                    content: submission.content,
                    file_name: submission.file_name,
                    submitted_at: submission.submitted_at.to_rfc3339(),
                },
                "Submission received successfully",
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmittedResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        )
            .into_response(),
    }
}
