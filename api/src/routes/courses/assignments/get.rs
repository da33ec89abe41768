use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::assignment::Model as Assignment;
use db::models::course::Entity as CourseEntity;
use sea_orm::EntityTrait;

use crate::response::ApiResponse;
use crate::routes::courses::assignments::common::AssignmentResponse;
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments
///
/// Lists the assignments of a course, newest first.
pub async fn list_assignments(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<AssignmentResponse>>::error(format!(
                    "Course {} not found.",
                    course_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AssignmentResponse>>::error(
                    "Database error while checking course",
                )),
            );
        }
    }

    match Assignment::list_for_course(db, course_id).await {
        Ok(assignments) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                assignments
                    .into_iter()
                    .map(AssignmentResponse::from)
                    .collect(),
                "Assignments retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<AssignmentResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
