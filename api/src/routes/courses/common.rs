use db::models::course::Model as Course;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CourseRequest {
    #[validate(length(min = 2, max = 20, message = "Code must be between 2 and 20 characters"))]
    pub code: String,

    #[validate(length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseResponse {
    pub id: i64,
    pub lecturer_id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            lecturer_id: course.lecturer_id,
            code: course.code,
            title: course.title,
            description: course.description,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        }
    }
}
