use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::course::Model as Course;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{CourseRequest, CourseResponse};
use crate::state::AppState;

/// POST /api/courses
///
/// Create a new course owned by the calling lecturer.
///
/// ### Request Body
/// ```json
/// {
///   "code": "CS101",
///   "title": "Introduction to Computer Science",
///   "description": "Brief description of the course..."
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new course
/// - `400 Bad Request` on validation failure
/// - `403 Forbidden` when the caller is not a lecturer
/// - `409 Conflict` when a course with this code already exists
/// - `500 Internal Server Error` on database errors
pub async fn create_course(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CourseRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CourseResponse>::error(error_message)),
        );
    }

    match Course::find_by_code(db, &req.code).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<CourseResponse>::error(
                    "A course with this code already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match Course::create(
        db,
        claims.sub,
        &req.code,
        &req.title,
        req.description.as_deref(),
    )
    .await
    {
        Ok(course) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CourseResponse::from(course),
                "Course created successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CourseResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
