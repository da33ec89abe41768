use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user_role::{Model as UserRole, Role};
use sea_orm::DatabaseConnection;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate user from request extensions and insert them back into the request
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Helper to check if a user holds the given platform role.
async fn user_has_role(db: &DatabaseConnection, user_id: i64, role: Role) -> bool {
    match UserRole::has_role(db, user_id, role).await {
        Ok(held) => held,
        Err(e) => {
            // Log and deny on DB error (fail-safe)
            tracing::warn!(
                error = %e,
                user_id, %role,
                "DB error while checking role; denying access"
            );
            false
        }
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Base role-based access guard that other guards build upon.
async fn allow_role_base(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
    required_role: Role,
    failure_msg: &str,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let db = app_state.db();

    let (req, user) = extract_and_insert_authuser(req).await?;

    if user_has_role(db, user.0.sub, required_role).await {
        Ok(next.run(req).await)
    } else {
        Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))))
    }
}

/// Guard for lecturer-only endpoints.
///
/// The failure message names the role requirement only, so a denied caller
/// learns nothing about which roles they do hold.
pub async fn allow_lecturer(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_role_base(
        State(app_state),
        req,
        next,
        Role::Lecturer,
        "Lecturer role required for this action",
    )
    .await
}

/// Guard for student-only endpoints.
pub async fn allow_student(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_role_base(
        State(app_state),
        req,
        next,
        Role::Student,
        "Student role required for this action",
    )
    .await
}
