use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use db::models::submission::Model as Submission;
use db::models::user_role::{Model as UserRole, Role};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::auth::Claims;
use crate::routes::common::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFeedbackRequest {
    pub submission_content: Option<String>,
    pub assignment_title: Option<String>,
    pub submission_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackBody {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Terminal outcome of a failed stage, mapped onto the wire contract.
///
/// Diagnostic detail (upstream status, raw errors) is logged where the
/// failure is observed; only the classified message reaches the client.
#[derive(Debug, PartialEq)]
pub enum FeedbackError {
    Unauthenticated(&'static str),
    Forbidden(&'static str),
    NotFound(i64),
    InvalidInput(String),
    RateLimited,
    QuotaExhausted,
    Internal,
}

impl FeedbackError {
    fn status(&self) -> StatusCode {
        match self {
            FeedbackError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            FeedbackError::Forbidden(_) => StatusCode::FORBIDDEN,
            FeedbackError::NotFound(_) => StatusCode::NOT_FOUND,
            FeedbackError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FeedbackError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FeedbackError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            FeedbackError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            FeedbackError::Unauthenticated(msg) | FeedbackError::Forbidden(msg) => {
                (*msg).to_string()
            }
            FeedbackError::NotFound(id) => format!("Submission {} not found.", id),
            FeedbackError::InvalidInput(msg) => msg.clone(),
            FeedbackError::RateLimited => {
                "Rate limit exceeded. Please try again in a moment.".to_string()
            }
            FeedbackError::QuotaExhausted => {
                "AI credits exhausted. Please add credits to continue.".to_string()
            }
            FeedbackError::Internal => "Failed to generate feedback".to_string(),
        }
    }
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

const ROLE_REQUIRED_MSG: &str = "Lecturer role required to generate feedback";
const OWNERSHIP_MSG: &str = "You may only act on submissions in your own courses.";

/// POST /api/feedback
///
/// Generates draft feedback for a submission through the completion gateway.
/// Stages run in a fixed order per request: authenticate, authorize (role,
/// then ownership when `submissionId` is given), validate input, call the
/// gateway once, map the outcome. Authorization always precedes the paid
/// upstream call.
///
/// ### Request Body
/// ```json
/// {
///   "submissionContent": "The essay text...",
///   "assignmentTitle": "Research Paper: AI in Education",
///   "submissionId": "42"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` `{ "feedback": "..." }`
/// - `401` missing or invalid bearer token
/// - `403` caller is not a lecturer, or does not own the submission's course
/// - `404` referenced submission does not exist
/// - `400` missing/oversized content or title, malformed submission id
/// - `429` upstream rate limit
/// - `402` upstream credits exhausted
/// - `500` any other upstream or internal failure
pub async fn generate_feedback(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GenerateFeedbackRequest>,
) -> Result<Json<FeedbackBody>, FeedbackError> {
    let claims = authenticate(&headers)?;
    authorize(&app_state, claims.sub, req.submission_id.as_deref()).await?;
    let (title, content) = validate(&req)?;

    let feedback = app_state
        .ai()
        .generate(title, content)
        .await
        .map_err(|e| match e {
            ai::AiError::RateLimited => FeedbackError::RateLimited,
            ai::AiError::QuotaExhausted => FeedbackError::QuotaExhausted,
            other => {
                tracing::error!(error = %other, "feedback generation failed");
                FeedbackError::Internal
            }
        })?;

    Ok(Json(FeedbackBody { feedback }))
}

/// Stage 1: resolve the caller from the `Authorization: Bearer` header.
/// Verification is per-request; nothing is cached.
fn authenticate(headers: &HeaderMap) -> Result<Claims, FeedbackError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(FeedbackError::Unauthenticated("Authentication required"))?;

    auth::decode_token(token)
        .map_err(|_| FeedbackError::Unauthenticated("Invalid or expired token"))
}

/// Stage 2: role check, then ownership check when a submission is named.
async fn authorize(
    app_state: &AppState,
    user_id: i64,
    submission_id: Option<&str>,
) -> Result<(), FeedbackError> {
    let db = app_state.db();

    match UserRole::has_role(db, user_id, Role::Lecturer).await {
        Ok(true) => {}
        Ok(false) => return Err(FeedbackError::Forbidden(ROLE_REQUIRED_MSG)),
        Err(e) => {
            tracing::warn!(error = %e, user_id, "role lookup failed; denying access");
            return Err(FeedbackError::Forbidden(ROLE_REQUIRED_MSG));
        }
    }

    let Some(raw_id) = submission_id else {
        return Ok(());
    };

    let id: i64 = raw_id.trim().parse().map_err(|_| {
        FeedbackError::InvalidInput(format!("Invalid submission id: '{}'", raw_id))
    })?;

    match Submission::owning_lecturer(db, id).await {
        Ok(None) => Err(FeedbackError::NotFound(id)),
        Ok(Some(owner_id)) if owner_id != user_id => {
            Err(FeedbackError::Forbidden(OWNERSHIP_MSG))
        }
        Ok(Some(_)) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, submission_id = id, "ownership lookup failed");
            Err(FeedbackError::Internal)
        }
    }
}

/// Stage 3: size and shape checks on the untrusted payload. Pure.
fn validate(req: &GenerateFeedbackRequest) -> Result<(Option<&str>, &str), FeedbackError> {
    let content = req
        .submission_content
        .as_deref()
        .map(str::trim)
        .unwrap_or("");

    if content.is_empty() {
        return Err(FeedbackError::InvalidInput(
            "No submission content provided".into(),
        ));
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(FeedbackError::InvalidInput(
            "Content too large. Maximum 50,000 characters allowed.".into(),
        ));
    }

    if let Some(title) = req.assignment_title.as_deref() {
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(FeedbackError::InvalidInput(
                "Assignment title too long. Maximum 500 characters allowed.".into(),
            ));
        }
    }

    Ok((req.assignment_title.as_deref(), content))
}
