use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::course::Entity as CourseEntity;
use db::models::submission::Model as Submission;
use sea_orm::EntityTrait;
use serde::Serialize;
use std::collections::HashMap;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct MySubmissionItem {
    pub id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub course_code: String,
    pub course_title: String,
    pub content: String,
    pub file_name: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: String,
}

/// GET /api/me/submissions
///
/// Lists the caller's own submissions with their grades and feedback, newest
/// first (the student feedback view).
pub async fn my_submissions(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let rows = match Submission::list_for_student_with_assignments(db, claims.sub).await {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<MySubmissionItem>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    // One course lookup per distinct course, not per submission.
    let mut courses: HashMap<i64, (String, String)> = HashMap::new();
    let mut items = Vec::with_capacity(rows.len());

    for (submission, assignment) in rows {
        let (assignment_id, assignment_title, course_id) = match assignment {
            Some(a) => (a.id, a.title, Some(a.course_id)),
            None => (submission.assignment_id, String::new(), None),
        };

        let (course_code, course_title) = match course_id {
            Some(course_id) => {
                if !courses.contains_key(&course_id) {
                    match CourseEntity::find_by_id(course_id).one(db).await {
                        Ok(Some(course)) => {
                            courses.insert(course_id, (course.code, course.title));
                        }
                        Ok(None) => {
                            courses.insert(course_id, Default::default());
                        }
                        Err(e) => {
                            return (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(ApiResponse::<Vec<MySubmissionItem>>::error(format!(
                                    "Database error: {}",
                                    e
                                ))),
                            );
                        }
                    }
                }
                courses.get(&course_id).cloned().unwrap_or_default()
            }
            None => Default::default(),
        };

        items.push(MySubmissionItem {
            id: submission.id,
            assignment_id,
            assignment_title,
            course_code,
            course_title,
            content: submission.content,
            file_name: submission.file_name,
            grade: submission.grade,
            feedback: submission.feedback,
            submitted_at: submission.submitted_at.to_rfc3339(),
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            items,
            "Submissions retrieved successfully",
        )),
    )
}
