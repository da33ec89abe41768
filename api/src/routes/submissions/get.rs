use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    assignment::Entity as AssignmentEntity, course::Entity as CourseEntity,
    submission::Entity as SubmissionEntity, user::Entity as UserEntity,
};
use sea_orm::EntityTrait;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::StudentInfo;
use crate::routes::submissions::common::{
    AssignmentInfo, CourseInfo, SubmissionDetail, check_submission_owner,
};
use crate::state::AppState;

/// GET /api/submissions/{submission_id}
///
/// Full submission view for the lecturer review page: content, current
/// grade/feedback, and the assignment, course and student it belongs to.
/// Only the lecturer who owns the course chain may fetch it.
pub async fn get_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = check_submission_owner(db, submission_id, claims.sub).await {
        return e.into_response();
    }

    let loaded = async {
        let submission = SubmissionEntity::find_by_id(submission_id).one(db).await?;
        let Some(submission) = submission else {
            return Ok(None);
        };

        let assignment = AssignmentEntity::find_by_id(submission.assignment_id)
            .one(db)
            .await?;
        let course = match &assignment {
            Some(a) => CourseEntity::find_by_id(a.course_id).one(db).await?,
            None => None,
        };
        let student = UserEntity::find_by_id(submission.student_id).one(db).await?;

        Ok::<_, sea_orm::DbErr>(Some((submission, assignment, course, student)))
    }
    .await;

    match loaded {
        Ok(Some((submission, assignment, course, student))) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionDetail {
                    id: submission.id,
                    content: submission.content,
                    file_name: submission.file_name,
                    grade: submission.grade,
                    feedback: submission.feedback,
                    submitted_at: submission.submitted_at.to_rfc3339(),
                    assignment: assignment
                        .map(|a| AssignmentInfo {
                            id: a.id,
                            title: a.title,
                        })
                        .unwrap_or_default(),
                    course: course
                        .map(|c| CourseInfo {
                            id: c.id,
                            code: c.code,
                            title: c.title,
                        })
                        .unwrap_or_default(),
                    student: student.map(StudentInfo::from).unwrap_or_default(),
                },
                "Submission retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SubmissionDetail>::error(format!(
                "Submission {} not found.",
                submission_id
            ))),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionDetail>::error(format!(
                "Database error: {}",
                e
            ))),
        )
            .into_response(),
    }
}
