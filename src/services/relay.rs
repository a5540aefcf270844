// src/services/relay.rs
use tracing::{debug, error};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::services::completion::{ChatCompletionRequest, ChatCompletionResponse};

/// Forwards a prompt to the completion API and hands back the reply text.
///
/// One outbound call per `handle`; no retries and no timeout beyond what the
/// shared client is built with.
#[derive(Clone, Debug)]
pub struct ChatRelayService {
    http: reqwest::Client,
    config: RelayConfig,
}

impl ChatRelayService {
    pub fn new(http: reqwest::Client, config: RelayConfig) -> Self {
        Self { http, config }
    }

    pub async fn handle(&self, prompt: &str) -> Result<String, RelayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(RelayError::Configuration)?;

        if prompt.trim().is_empty() {
            return Err(RelayError::Validation);
        }

        let payload = ChatCompletionRequest::new(&self.config, prompt);
        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .inspect_err(|e| error!("Completion API unreachable: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Completion API error: {} - {}", status, body);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(RelayError::Decode)?;
        let reply = completion.first_content().trim().to_string();
        debug!(reply_len = reply.len(), "completion received");

        Ok(reply)
    }
}
