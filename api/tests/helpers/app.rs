use ai::FeedbackClient;
use api::routes::routes;
use api::state::AppState;
use axum::Router;
use ctor::ctor;
use db::test_utils::setup_test_db;

#[ctor]
fn setup_tests() {
    // Populate the env-backed config before anything touches it. Runs before
    // main, so mutating the environment is still single-threaded here.
    unsafe {
        std::env::set_var("DATABASE_PATH", "sqlite::memory:");
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("JWT_DURATION_MINUTES", "60");
        std::env::set_var("AI_GATEWAY_KEY", "test-key");
    }
}

/// Builds the app over a fresh in-memory database, with the completion
/// gateway pointed at an unreachable address. Tests that exercise the
/// gateway use [`make_test_app_with_ai`] with a mock gateway client instead.
pub async fn make_test_app() -> (Router, AppState) {
    make_test_app_with_ai(FeedbackClient::new(
        "http://127.0.0.1:9/v1/chat/completions",
        "test-key",
        "test-model",
    ))
    .await
}

pub async fn make_test_app_with_ai(ai: FeedbackClient) -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db, ai);

    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}
