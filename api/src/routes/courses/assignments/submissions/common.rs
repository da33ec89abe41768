use axum::{Json, http::StatusCode};
use db::models::assignment::{Column as AssignmentColumn, Entity as AssignmentEntity};
use db::models::submission::Model as Submission;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::StudentInfo;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub content: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct SubmissionListItem {
    pub id: i64,
    pub assignment_id: i64,
    pub student: StudentInfo,
    pub content: String,
    pub file_name: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: String,
}

impl SubmissionListItem {
    pub fn from_row(submission: Submission, student: Option<db::models::user::Model>) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student: student.map(StudentInfo::from).unwrap_or_default(),
            content: submission.content,
            file_name: submission.file_name,
            grade: submission.grade,
            feedback: submission.feedback,
            submitted_at: submission.submitted_at.to_rfc3339(),
        }
    }
}

/// Verifies that the assignment exists under the given course.
pub async fn check_assignment_hierarchy(
    course_id: i64,
    assignment_id: i64,
    db: &DatabaseConnection,
) -> Result<db::models::assignment::Model, (StatusCode, Json<ApiResponse<Empty>>)> {
    let found = AssignmentEntity::find()
        .filter(AssignmentColumn::Id.eq(assignment_id))
        .filter(AssignmentColumn::CourseId.eq(course_id))
        .one(db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "Database error while checking assignment",
                )),
            )
        })?;

    found.ok_or((
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!(
            "Assignment {} in Course {} not found.",
            assignment_id, course_id
        ))),
    ))
}
