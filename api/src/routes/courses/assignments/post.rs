use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::assignment::Model as Assignment;
use db::models::course::Entity as CourseEntity;
use sea_orm::EntityTrait;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::assignments::common::{AssignmentRequest, AssignmentResponse};
use crate::state::AppState;

/// POST /api/courses/{course_id}/assignments
///
/// Create a new assignment under a course. Only the lecturer who owns the
/// course may create assignments in it.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Research Paper: AI in Education",
///   "description": "Provide assignment details...",
///   "due_date": "2026-11-10T23:59:00Z"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new assignment
/// - `400 Bad Request` on validation failure or a malformed due date
/// - `403 Forbidden` when the course belongs to another lecturer
/// - `404 Not Found` when the course does not exist
/// - `500 Internal Server Error` on database errors
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(req): Json<AssignmentRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AssignmentResponse>::error(error_message)),
        );
    }

    let due_date = match DateTime::parse_from_rfc3339(&req.due_date) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "due_date must be a valid RFC 3339 timestamp",
                )),
            );
        }
    };

    let course = match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error(format!(
                    "Course {} not found.",
                    course_id
                ))),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Database error while checking course",
                )),
            );
        }
    };

    if course.lecturer_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AssignmentResponse>::error(
                "You may only act on your own courses.",
            )),
        );
    }

    match Assignment::create(
        db,
        course_id,
        &req.title,
        req.description.as_deref(),
        due_date,
    )
    .await
    {
        Ok(assignment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment created successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AssignmentResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
