use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course::Entity as CourseEntity;
use db::models::submission::Model as Submission;
use sea_orm::EntityTrait;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::assignments::submissions::common::{
    SubmissionListItem, check_assignment_hierarchy,
};
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments/{assignment_id}/submissions
///
/// Lists the submissions handed in for an assignment, newest first, with the
/// submitting students. Only the lecturer who owns the course may list them.
pub async fn list_submissions(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = check_assignment_hierarchy(course_id, assignment_id, db).await {
        return e.into_response();
    }

    let course = match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<SubmissionListItem>>::error(format!(
                    "Course {} not found.",
                    course_id
                ))),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SubmissionListItem>>::error(
                    "Database error while checking course",
                )),
            )
                .into_response();
        }
    };

    if course.lecturer_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Vec<SubmissionListItem>>::error(
                "You may only act on your own courses.",
            )),
        )
            .into_response();
    }

    match Submission::list_for_assignment_with_students(db, assignment_id).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter()
                    .map(|(submission, student)| SubmissionListItem::from_row(submission, student))
                    .collect::<Vec<_>>(),
                "Submissions retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SubmissionListItem>>::error(format!(
                "Database error: {}",
                e
            ))),
        )
            .into_response(),
    }
}
