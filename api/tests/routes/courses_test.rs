use crate::helpers::make_test_app;
use api::auth::generate_jwt;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use db::models::{
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

    TestData {
        lecturer,
        other_lecturer,
        student,
    }
}

fn create_course_request(token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/courses")
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
async fn create_course_success_uppercases_code() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let body = json!({
        "code": "cs101",
        "title": "Introduction to Computer Science",
        "description": "Fundamentals."
    });
    let response = app.oneshot(create_course_request(&token, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Course created successfully");
    assert_eq!(json["data"]["code"], "CS101");
    assert_eq!(json["data"]["lecturer_id"], data.lecturer.id);
}

#[tokio::test]
async fn create_course_forbidden_for_student() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.student.id);

    let body = json!({ "code": "CS102", "title": "Data Structures" });
    let response = app.oneshot(create_course_request(&token, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_course_unauthorized_without_token() {
    let (app, _state) = make_test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/courses")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({ "code": "CS103", "title": "Networks" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_course_rejects_duplicate_code() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    CourseModel::create(app_state.db(), data.lecturer.id, "CS104", "Databases", None)
        .await
        .unwrap();

    let body = json!({ "code": "cs104", "title": "Databases Again" });
    let response = app.oneshot(create_course_request(&token, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = response_json(response).await;
    assert_eq!(json["message"], "A course with this code already exists");
}

#[tokio::test]
async fn create_course_rejects_long_description() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let (token, _) = generate_jwt(data.lecturer.id);

    let body = json!({
        "code": "CS105",
        "title": "Operating Systems",
        "description": "d".repeat(501)
    });
    let response = app.oneshot(create_course_request(&token, body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lecturer_lists_only_their_courses() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let db = app_state.db();

    CourseModel::create(db, data.lecturer.id, "CS110", "Mine", None)
        .await
        .unwrap();
    CourseModel::create(db, data.other_lecturer.id, "CS111", "Theirs", None)
        .await
        .unwrap();

    let (token, _) = generate_jwt(data.lecturer.id);
    let req = Request::builder()
        .method("GET")
        .uri("/api/courses")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["CS110"]);
}

#[tokio::test]
async fn student_lists_all_courses() {
    let (app, app_state) = make_test_app().await;
    let data = setup_test_data(app_state.db()).await;
    let db = app_state.db();

    CourseModel::create(db, data.lecturer.id, "CS110", "Mine", None)
        .await
        .unwrap();
    CourseModel::create(db, data.other_lecturer.id, "CS111", "Theirs", None)
        .await
        .unwrap();

    let (token, _) = generate_jwt(data.student.id);
    let req = Request::builder()
        .method("GET")
        .uri("/api/courses")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}
