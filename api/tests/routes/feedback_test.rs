use crate::helpers::{completion_body, make_test_app, make_test_app_with_ai, spawn_gateway};
use ai::FeedbackClient;
use api::auth::generate_jwt;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use db::models::{
    assignment::Model as AssignmentModel,
    course::Model as CourseModel,
    submission::Model as SubmissionModel,
    user::Model as UserModel,
    user_role::{Model as UserRole, Role},
};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestData {
    lecturer: UserModel,
    other_lecturer: UserModel,
    student: UserModel,
    unroled: UserModel,
    submission: SubmissionModel,
}

async fn setup_test_data(db: &sea_orm::DatabaseConnection) -> TestData {
    let lecturer = UserModel::create(db, "lecturer@example.com", "Dr. Owens", "password1")
        .await
        .unwrap();
    let other_lecturer = UserModel::create(db, "other@example.com", "Dr. Vane", "password2")
        .await
        .unwrap();
    let student = UserModel::create(db, "student@example.com", "Sam Field", "password3")
        .await
        .unwrap();
    let unroled = UserModel::create(db, "nobody@example.com", "No Role", "password4")
        .await
        .unwrap();

    UserRole::assign(db, lecturer.id, Role::Lecturer).await.unwrap();
    UserRole::assign(db, other_lecturer.id, Role::Lecturer)
        .await
        .unwrap();
    UserRole::assign(db, student.id, Role::Student).await.unwrap();

    let course = CourseModel::create(db, lecturer.id, "CS101", "Intro to CS", None)
        .await
        .unwrap();
    let assignment = AssignmentModel::create(
        db,
        course.id,
        "Research Paper: AI in Education",
        None,
        Utc::now() + Duration::days(7),
    )
    .await
    .unwrap();
    let submission = SubmissionModel::create(
        db,
        assignment.id,
        student.id,
        "This essay discusses X.",
        None,
    )
    .await
    .unwrap();

    TestData {
        lecturer,
        other_lecturer,
        student,
        unroled,
        submission,
    }
}

fn feedback_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/feedback")
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn app_with_gateway(status: u16, body: Value) -> (Router, AppState, crate::helpers::gateway::MockGateway) {
    let gateway = spawn_gateway(status, body).await;
    let (app, app_state) =
        make_test_app_with_ai(FeedbackClient::new(&gateway.url, "test-key", "test-model")).await;
    (app, app_state, gateway)
}

#[tokio::test]
async fn missing_auth_header_returns_401() {
    let (app, _state) = make_test_app().await;

    let req = feedback_request(None, json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let (app, _state) = make_test_app().await;

    let req = feedback_request(
        Some("not-a-real-token"),
        json!({ "submissionContent": "An essay." }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn student_role_returns_403_regardless_of_payload() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.student.id);

    // Payload is invalid too; the role check must win.
    let req = feedback_request(Some(&token), json!({ "submissionContent": "" }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Lecturer role required to generate feedback");
}

#[tokio::test]
async fn unroled_identity_returns_403() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.unroled.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn foreign_submission_returns_403_with_ownership_message() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.other_lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({
            "submissionContent": "This essay discusses X.",
            "submissionId": data.submission.id.to_string()
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "You may only act on submissions in your own courses."
    );
}

#[tokio::test]
async fn unknown_submission_returns_404() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({
            "submissionContent": "An essay.",
            "submissionId": (data.submission.id + 999).to_string()
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_submission_id_returns_400() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({ "submissionContent": "An essay.", "submissionId": "not-an-id" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_returns_400() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({}));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No submission content provided");
}

#[tokio::test]
async fn whitespace_content_returns_400() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "   \n\t  " }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No submission content provided");
}

#[tokio::test]
async fn oversized_content_returns_400_without_model_call() {
    let (app, app_state, gateway) = app_with_gateway(200, completion_body("unused")).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({ "submissionContent": "a".repeat(50_001) }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "Content too large. Maximum 50,000 characters allowed."
    );
    assert_eq!(gateway.hits(), 0);
}

#[tokio::test]
async fn oversized_title_returns_400() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({
            "submissionContent": "An essay.",
            "assignmentTitle": "t".repeat(501)
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generates_feedback_for_valid_request() {
    let (app, app_state, gateway) = app_with_gateway(
        200,
        completion_body("Strengths: clear thesis. Areas to improve: depth."),
    )
    .await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({ "submissionContent": "This essay discusses X." }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(
        json["feedback"],
        "Strengths: clear thesis. Areas to improve: depth."
    );
    assert_eq!(gateway.hits(), 1);
}

#[tokio::test]
async fn generates_feedback_for_owned_submission() {
    let (app, app_state, gateway) = app_with_gateway(200, completion_body("Good work.")).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(
        Some(&token),
        json!({
            "submissionContent": "This essay discusses X.",
            "assignmentTitle": "Research Paper: AI in Education",
            "submissionId": data.submission.id.to_string()
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["feedback"], "Good work.");
    assert_eq!(gateway.hits(), 1);
}

#[tokio::test]
async fn upstream_rate_limit_maps_to_429() {
    let (app, app_state, _gateway) =
        app_with_gateway(429, json!({ "error": "slow down" })).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "Rate limit exceeded. Please try again in a moment."
    );
}

#[tokio::test]
async fn upstream_quota_exhaustion_maps_to_402() {
    let (app, app_state, _gateway) =
        app_with_gateway(402, json!({ "error": "no credits" })).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "AI credits exhausted. Please add credits to continue."
    );
}

#[tokio::test]
async fn other_upstream_failure_maps_to_500_with_generic_message() {
    let (app, app_state, _gateway) =
        app_with_gateway(503, json!({ "error": "overloaded" })).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Failed to generate feedback");
}

#[tokio::test]
async fn unreachable_gateway_maps_to_500() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Failed to generate feedback");
}

#[tokio::test]
async fn missing_gateway_credential_maps_to_500() {
    let gateway = spawn_gateway(200, completion_body("unused")).await;
    let (app, app_state) =
        make_test_app_with_ai(FeedbackClient::new(&gateway.url, "", "test-model")).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let req = feedback_request(Some(&token), json!({ "submissionContent": "An essay." }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(gateway.hits(), 0);
}

#[tokio::test]
async fn identical_requests_trigger_independent_model_calls() {
    let (app, app_state, gateway) = app_with_gateway(200, completion_body("Feedback.")).await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    for _ in 0..2 {
        let req = feedback_request(
            Some(&token),
            json!({ "submissionContent": "This essay discusses X." }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(gateway.hits(), 2);
}

#[tokio::test]
async fn options_preflight_bypasses_authentication() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/feedback")
        .header("Origin", "https://app.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header(
            "Access-Control-Request-Headers",
            "authorization, content-type",
        )
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}
