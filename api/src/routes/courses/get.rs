use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::course::Model as Course;
use db::models::user_role::{Model as UserRole, Role};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::CourseResponse;
use crate::state::AppState;

/// GET /api/courses
///
/// Lists courses, newest first. Lecturers see the courses they own; everyone
/// else sees the full catalogue (the student dashboard view).
pub async fn list_courses(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let role = match UserRole::find_for_user(db, claims.sub).await {
        Ok(role) => role,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<CourseResponse>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let courses = match role {
        Some(Role::Lecturer) => Course::list_for_lecturer(db, claims.sub).await,
        _ => Course::list_all(db).await,
    };

    match courses {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                courses.into_iter().map(CourseResponse::from).collect(),
                "Courses retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<CourseResponse>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
