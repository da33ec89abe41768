//! Shared constants and payload types used by more than one route group.

use serde::Serialize;

/// Maximum accepted submission content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Maximum accepted assignment title length, in characters.
pub const MAX_TITLE_CHARS: usize = 500;

/// Maximum accepted lecturer feedback length, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 5_000;

/// Student identity as shown to lecturers on submissions.
#[derive(Debug, Serialize, Default)]
pub struct StudentInfo {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

impl From<db::models::user::Model> for StudentInfo {
    fn from(user: db::models::user::Model) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}
