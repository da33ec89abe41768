use axum::{Json, http::StatusCode};
use db::models::submission::Model as Submission;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::StudentInfo;

#[derive(Debug, Serialize, Default)]
pub struct AssignmentInfo {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseInfo {
    pub id: i64,
    pub code: String,
    pub title: String,
}

/// Full submission view for the review page.
#[derive(Debug, Serialize, Default)]
pub struct SubmissionDetail {
    pub id: i64,
    pub content: String,
    pub file_name: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: String,
    pub assignment: AssignmentInfo,
    pub course: CourseInfo,
    pub student: StudentInfo,
}

/// Resolves the submission's owning lecturer and enforces that it is the
/// caller, producing the 404/403 responses of the ownership contract.
pub async fn check_submission_owner(
    db: &DatabaseConnection,
    submission_id: i64,
    caller_id: i64,
) -> Result<(), (StatusCode, Json<ApiResponse<Empty>>)> {
    let owner = Submission::owning_lecturer(db, submission_id)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Database error while checking submission",
                )),
            )
        })?;

    match owner {
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Submission {} not found.",
                submission_id
            ))),
        )),
        Some(owner_id) if owner_id != caller_id => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "You may only act on submissions in your own courses.",
            )),
        )),
        Some(_) => Ok(()),
    }
}
