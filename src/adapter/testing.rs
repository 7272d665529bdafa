//! Test doubles for the adapter boundary
//!
//! `MockAdapter` stands in for the backend at the trait level.
//! `MockBackend` is a real HTTP server for exercising `BackendAdapter`.

use super::{AdapterError, Cancelled, ChatModelAdapter, RunOutcome, RunResult};
use crate::conversation::{Role, Turn, TurnMetadata};
use crate::events::EventRecord;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Mock Adapter
// ============================================================================

/// Adapter that returns queued outcomes
pub struct MockAdapter {
    responses: Mutex<VecDeque<Result<RunOutcome, Cancelled>>>,
    delay: Option<Duration>,
    /// Role and content of every turn list passed to `run`
    pub requests: Mutex<Vec<Vec<(Role, String)>>>,
    /// Notified when a run starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay: None,
            requests: Mutex::new(Vec::new()),
            request_started: Arc::new(Notify::new()),
        }
    }

    /// Hold each run for `delay` unless cancelled first
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_answer(&self, content: &str, events: Vec<EventRecord>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RunOutcome::Success(RunResult {
                content: content.to_string(),
                metadata: TurnMetadata::with_events(events),
            })));
    }

    pub fn queue_soft_failure(&self, error: &AdapterError) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RunOutcome::SoftFailure(RunResult::soft_failure(error))));
    }

    pub fn queue_cancelled(&self) {
        self.responses.lock().unwrap().push_back(Err(Cancelled));
    }

    pub fn recorded_requests(&self) -> Vec<Vec<(Role, String)>> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<RunOutcome, Cancelled> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RunOutcome::SoftFailure(RunResult::soft_failure(
                    &AdapterError::network("No mock response queued"),
                )))
            })
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModelAdapter for MockAdapter {
    async fn run(
        &self,
        turns: &[Turn],
        cancel: CancellationToken,
    ) -> Result<RunOutcome, Cancelled> {
        self.requests.lock().unwrap().push(
            turns
                .iter()
                .map(|t| (t.role, t.content.clone()))
                .collect(),
        );
        self.request_started.notify_one();

        let Some(delay) = self.delay else {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            return self.next_response();
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Cancelled),
            () = tokio::time::sleep(delay) => self.next_response(),
        }
    }
}

// ============================================================================
// Mock Backend
// ============================================================================

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<String>,
    content_type: &'static str,
    delay: Arc<Mutex<Duration>>,
    requests: Arc<Mutex<Vec<Value>>>,
    started: Arc<Notify>,
}

/// HTTP server on a random local port answering `POST /chat`
pub struct MockBackend {
    pub url: String,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn json(status: u16, body: Value) -> Self {
        Self::start(status, body.to_string(), "application/json").await
    }

    pub async fn text(status: u16, body: &str) -> Self {
        Self::start(status, body.to_string(), "text/plain").await
    }

    async fn start(status: u16, body: String, content_type: &'static str) -> Self {
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: Arc::new(body),
            content_type,
            delay: Arc::new(Mutex::new(Duration::ZERO)),
            requests: Arc::new(Mutex::new(Vec::new())),
            started: Arc::new(Notify::new()),
        };

        let app = Router::new()
            .route("/chat", post(handle_chat))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Delay every response by `delay`
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = delay;
        self
    }

    pub fn request_started(&self) -> Arc<Notify> {
        self.state.started.clone()
    }

    pub fn recorded_requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle_chat(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body);
    state.started.notify_one();

    let delay = *state.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, state.content_type)],
        state.body.to_string(),
    )
}
