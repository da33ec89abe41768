//! Client for the external completion gateway.
//!
//! One awaited POST per feedback request, no retries. Upstream failures are
//! classified into [`AiError`] variants; raw upstream detail is logged here
//! and never returned to the caller.

use serde::{Deserialize, Serialize};

use crate::error::AiError;
use crate::prompt;

/// A single chat message in the gateway request.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for the gateway's chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Response from the gateway.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// A single candidate completion.
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The message payload of a completion choice.
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Stateless client for generating submission feedback through the
/// completion gateway.
#[derive(Clone)]
pub struct FeedbackClient {
    http: reqwest::Client,
    gateway_url: String,
    api_key: String,
    model: String,
}

impl FeedbackClient {
    pub fn new(
        gateway_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            gateway_url: gateway_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Builds a client from the global application configuration.
    pub fn from_config() -> Self {
        Self::new(
            common::config::ai_gateway_url(),
            common::config::ai_gateway_key(),
            common::config::ai_model(),
        )
    }

    /// Whether a gateway credential is configured.
    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Generates feedback text for a submission.
    ///
    /// Sends the fixed lecturer-persona prompt with the given title and
    /// content, and returns the first completion's text.
    pub async fn generate(
        &self,
        assignment_title: Option<&str>,
        submission_content: &str,
    ) -> Result<String, AiError> {
        if !self.has_credential() {
            return Err(AiError::MissingCredential);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: prompt::SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompt::build_user_prompt(assignment_title, submission_content),
                },
            ],
        };

        let response = self
            .http
            .post(&self.gateway_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "completion gateway error");

            return Err(match status.as_u16() {
                429 => AiError::RateLimited,
                402 => AiError::QuotaExhausted,
                code => AiError::Upstream(code),
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AiError::MalformedResponse("empty choices array".into()))
    }
}
