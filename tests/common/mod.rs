#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use scratch_tutor_relay::config::RelayConfig;
use scratch_tutor_relay::services::relay::ChatRelayService;
use scratch_tutor_relay::state::AppState;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the stub saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    calls: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Local stand-in for the completion API, bound to an ephemeral port.
pub struct CompletionStub {
    pub url: String,
    calls: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Vec<RecordedCall>>>,
    join: JoinHandle<()>,
}

impl CompletionStub {
    /// Answer every call with a successful completion carrying `content`.
    pub async fn replying(content: &str) -> Self {
        let body = json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        });
        Self::start(StatusCode::OK, body.to_string()).await
    }

    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body: body.into(),
            calls: calls.clone(),
            recorded: recorded.clone(),
        };

        let router = Router::new()
            .route("/v1/chat/completions", post(completion_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind completion stub");
        let addr = listener.local_addr().expect("completion stub local addr");

        let join = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                eprintln!("Completion stub server error: {err:?}");
            }
        });

        CompletionStub {
            url: format!("http://{}/v1/chat/completions", addr),
            calls,
            recorded,
            join,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn relay(&self, api_key: Option<&str>) -> ChatRelayService {
        ChatRelayService::new(reqwest::Client::new(), self.config(api_key))
    }

    pub fn app_state(&self, api_key: Option<&str>) -> Arc<AppState> {
        Arc::new(AppState::new(reqwest::Client::new(), self.config(api_key)))
    }

    fn config(&self, api_key: Option<&str>) -> RelayConfig {
        RelayConfig {
            api_key: api_key.map(str::to_string),
            ..RelayConfig::default().endpoint(self.url.clone())
        }
    }
}

impl Drop for CompletionStub {
    fn drop(&mut self) {
        self.join.abort();
    }
}

async fn completion_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.recorded.lock().unwrap().push(RecordedCall {
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// An address nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe local addr");
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}
