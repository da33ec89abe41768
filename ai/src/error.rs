/// Represents all failure modes of the completion gateway call.
///
/// Each variant corresponds to one classified outcome the caller can map to
/// a client-facing status; diagnostic detail stays in the variant payloads
/// and is only ever logged server-side.
#[derive(Debug)]
pub enum AiError {
    /// Upstream answered 429; the caller should try again later.
    RateLimited,
    /// Upstream answered 402; the account is out of credits.
    QuotaExhausted,
    /// Upstream answered another non-success status.
    Upstream(u16),
    /// The gateway API key is not configured.
    MissingCredential,
    /// The request never completed (DNS, connect, timeout, ...).
    Network(String),
    /// Upstream answered 2xx but the body did not contain a completion.
    MalformedResponse(String),
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::RateLimited => write!(f, "completion gateway rate limit exceeded"),
            AiError::QuotaExhausted => write!(f, "completion gateway credits exhausted"),
            AiError::Upstream(status) => write!(f, "completion gateway error: {}", status),
            AiError::MissingCredential => write!(f, "AI_GATEWAY_KEY is not configured"),
            AiError::Network(msg) => write!(f, "completion gateway unreachable: {}", msg),
            AiError::MalformedResponse(msg) => {
                write!(f, "completion gateway returned no completion: {}", msg)
            }
        }
    }
}

impl std::error::Error for AiError {}
