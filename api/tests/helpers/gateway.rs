//! A canned completion gateway bound to an ephemeral local port, so tests
//! can observe exactly what the feedback pipeline sends upstream (including
//! that it sends nothing at all on early failures).

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[derive(Clone)]
pub struct MockGateway {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl MockGateway {
    /// Number of completion requests the gateway has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawns a gateway that answers every completion request with the given
/// status and JSON body.
pub async fn spawn_gateway(status: u16, body: serde_json::Value) -> MockGateway {
    let hits = Arc::new(AtomicUsize::new(0));
    let status = StatusCode::from_u16(status).unwrap();

    let app = Router::new().route(
        "/v1/chat/completions",
        post({
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, Json(body))
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockGateway {
        url: format!("http://{}/v1/chat/completions", addr),
        hits,
    }
}

/// A well-formed chat-completions success body carrying the given text.
pub fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "content": text } }
        ]
    })
}
