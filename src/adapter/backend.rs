//! HTTP adapter for the orchestration backend

use super::{AdapterError, Cancelled, ChatModelAdapter, RunOutcome, RunResult};
use crate::config::ChatConfig;
use crate::conversation::{Role, Turn, TurnMetadata};
use crate::events::EventRecord;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Runs turns against `POST {backend_url}/chat`
pub struct BackendAdapter {
    client: Client,
    endpoint: String,
}

impl BackendAdapter {
    pub fn new(config: &ChatConfig) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdapterError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.chat_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, AdapterError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AdapterError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::http(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::network(format!("Failed to read response: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| AdapterError::decode(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl ChatModelAdapter for BackendAdapter {
    async fn run(
        &self,
        turns: &[Turn],
        cancel: CancellationToken,
    ) -> Result<RunOutcome, Cancelled> {
        let request = ChatRequest::from_turns(turns);

        // Dropping the send future aborts the underlying connection
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                tracing::info!(endpoint = %self.endpoint, "Backend request cancelled");
                Err(Cancelled)
            }

            result = self.send(&request) => Ok(match result {
                Ok(response) => RunOutcome::Success(RunResult {
                    metadata: TurnMetadata::with_events(decode_events(response.events)),
                    content: response.answer,
                }),
                Err(e) => {
                    tracing::error!(
                        endpoint = %self.endpoint,
                        kind = ?e.kind,
                        status = ?e.status,
                        error = %e,
                        "Backend adapter error"
                    );
                    RunOutcome::SoftFailure(RunResult::soft_failure(&e))
                }
            }),
        }
    }
}

// Backend wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<WireMessage<'a>>,
}

impl<'a> ChatRequest<'a> {
    /// Role and content only; turn metadata stays local
    fn from_turns(turns: &'a [Turn]) -> Self {
        Self {
            messages: turns
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role,
                    content: &turn.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

/// Events are kept raw here so one bad record cannot fail the answer
#[derive(Debug, Deserialize)]
struct ChatResponse {
    answer: String,
    #[serde(default)]
    events: Option<Value>,
}

/// Convert each trace record on its own, dropping the ones that don't parse
fn decode_events(events: Option<Value>) -> Vec<EventRecord> {
    let records = match events {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(records)) => records,
        Some(other) => {
            tracing::warn!(events = %other, "Ignoring non-array events field");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed event record");
                None
            }
        })
        .collect()
}
