use crate::helpers::make_test_app;
use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use db::models::{
    assignment::Model as AssignmentModel,
    course::Model as CourseModel,
    user::Model as UserModel,
    user_role::{Model as UserRole, Role},
};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestData {
    lecturer: UserModel,
    other_lecturer: UserModel,
    student: UserModel,
    course: CourseModel,
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

    UserRole::assign(db, lecturer.id, Role::Lecturer).await.unwrap();
    UserRole::assign(db, other_lecturer.id, Role::Lecturer)
        .await
        .unwrap();
    UserRole::assign(db, student.id, Role::Student).await.unwrap();

    let course = CourseModel::create(db, lecturer.id, "CS301", "Software Engineering", None)
        .await
        .unwrap();

    TestData {
        lecturer,
        other_lecturer,
        student,
        course,
    }
}

fn assignment_body() -> Value {
    json!({
        "title": "Research Paper: AI in Education",
        "description": "Write a comprehensive research paper.",
        "due_date": (Utc::now() + Duration::days(14)).to_rfc3339()
    })
}

fn create_assignment_request(course_id: i64, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/courses/{}/assignments", course_id))
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_assignment_in_own_course() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let response = app
        .oneshot(create_assignment_request(
            data.course.id,
            &token,
            assignment_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Assignment created successfully");
    assert_eq!(json["data"]["course_id"], data.course.id);
}

#[tokio::test]
async fn create_assignment_in_foreign_course_forbidden() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.other_lecturer.id);

    let response = app
        .oneshot(create_assignment_request(
            data.course.id,
            &token,
            assignment_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["message"], "You may only act on your own courses.");
}

#[tokio::test]
async fn create_assignment_unknown_course_not_found() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let response = app
        .oneshot(create_assignment_request(
            data.course.id + 999,
            &token,
            assignment_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_assignment_rejects_malformed_due_date() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let body = json!({
        "title": "Research Paper",
        "due_date": "next friday"
    });
    let response = app
        .oneshot(create_assignment_request(data.course.id, &token, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["message"], "due_date must be a valid RFC 3339 timestamp");
}

#[tokio::test]
async fn create_assignment_forbidden_for_student() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.student.id);

    let response = app
        .oneshot(create_assignment_request(
            data.course.id,
            &token,
            assignment_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_assignments_for_course() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let db = app_state.db();

    AssignmentModel::create(
        db,
        data.course.id,
        "Essay 1",
        None,
        Utc::now() + Duration::days(7),
    )
    .await
    .unwrap();

    let (token, _) = generate_jwt(data.student.id);
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/courses/{}/assignments", data.course.id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Essay 1");
}
