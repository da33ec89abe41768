use db::models::assignment::Model as Assignment;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AssignmentRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// RFC 3339 due timestamp.
    pub due_date: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AssignmentResponse {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date.to_rfc3339(),
            created_at: assignment.created_at.to_rfc3339(),
            updated_at: assignment.updated_at.to_rfc3339(),
        }
    }
}
