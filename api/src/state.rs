//! Application state container shared across Axum route handlers.

use ai::FeedbackClient;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The completion-gateway client used to generate submission feedback.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ai: FeedbackClient,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and
    /// feedback client.
    pub fn new(db: DatabaseConnection, ai: FeedbackClient) -> Self {
        Self { db, ai }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the feedback client.
    pub fn ai(&self) -> &FeedbackClient {
        &self.ai
    }

    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
