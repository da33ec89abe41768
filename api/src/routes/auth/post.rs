use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::Model as User;
use db::models::user_role::{Model as UserRole, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    pub full_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Role,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthUserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/register
///
/// Register a new user and assign their platform role.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "full_name": "Jane Poe",
///   "password": "strongpassword",
///   "role": "student"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user and a JWT
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the email is already registered
/// - `500 Internal Server Error` on database errors
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthUserResponse>::error(error_message)),
        );
    }

    match User::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let user = match User::create(db, &req.email, &req.full_name, &req.password).await {
        Ok(user) => user,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Err(e) = UserRole::assign(db, user.id, req.role).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    let (token, expires_at) = generate_jwt(user.id);
    let response = AuthUserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: req.role.to_string(),
        token,
        expires_at,
    };

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            response,
            "User registered successfully",
        )),
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// Unknown email and wrong password produce the same `401` message so the
/// endpoint does not reveal which accounts exist.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match User::find_by_email(db, &req.email).await {
        Ok(Some(user)) if user.verify_password(&req.password) => user,
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "Invalid email or password",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let role = match UserRole::find_for_user(db, user.id).await {
        Ok(role) => role,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let (token, expires_at) = generate_jwt(user.id);
    let response = AuthUserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: role.map(|r| r.to_string()).unwrap_or_default(),
        token,
        expires_at,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Login successful")),
    )
}
