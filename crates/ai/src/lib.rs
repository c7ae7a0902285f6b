//! Chat-completion client for Cloudflare Workers AI.
//!
//! Wraps the `POST /accounts/{account}/ai/run/{model}` endpoint using
//! [`reqwest`]. The API wraps every payload in an envelope
//! (`{result, success, errors}`); [`ChatClient::complete`] unwraps it and
//! returns the generated text.

use serde::{Deserialize, Serialize};

/// Default REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

/// Prepended to every conversation that does not open with its own
/// system message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant for a workplace safety survey \
    dashboard. Help managers interpret survey dimension scores and suggest practical, \
    specific actions to improve weak dimensions. Be concise.";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Credentials and endpoint for the inference API.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub base_url: String,
}

impl ChatConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `CLOUDFLARE_ACCOUNT_ID` and
    /// `CLOUDFLARE_API_TOKEN` are set.
    ///
    /// | Variable                | Default                            |
    /// |-------------------------|------------------------------------|
    /// | `CLOUDFLARE_AI_MODEL`   | `@cf/meta/llama-3.1-8b-instruct`   |
    /// | `CLOUDFLARE_API_BASE`   | `https://api.cloudflare.com/client/v4` |
    pub fn from_env() -> Option<Self> {
        let account_id = std::env::var("CLOUDFLARE_ACCOUNT_ID").ok()?;
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN").ok()?;
        Some(Self {
            account_id,
            api_token,
            model: std::env::var("CLOUDFLARE_AI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("CLOUDFLARE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Full URL of the model run endpoint.
    pub fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url.trim_end_matches('/'),
            self.account_id,
            self.model
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct Envelope {
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the inference API layer.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that did not carry generated text.
    #[error("Malformed AI response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the inference API.
pub struct ChatClient {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ChatConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Run the conversation and return the model's reply.
    ///
    /// [`DEFAULT_SYSTEM_PROMPT`] is prepended unless the first message is
    /// already a system message.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let messages = with_system_prompt(messages);

        let response = self
            .client
            .post(self.config.run_url())
            .bearer_auth(&self.config.api_token)
            .json(&RunRequest {
                messages: &messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChatError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = response.json().await?;
        let reply = unwrap_envelope(envelope)?;
        tracing::debug!(model = %self.config.model, chars = reply.len(), "AI reply received");
        Ok(reply)
    }
}

fn with_system_prompt(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let has_system = messages.first().is_some_and(|m| m.role == "system");
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !has_system {
        out.push(ChatMessage::new("system", DEFAULT_SYSTEM_PROMPT));
    }
    out.extend_from_slice(messages);
    out
}

fn unwrap_envelope(envelope: Envelope) -> Result<String, ChatError> {
    if !envelope.success {
        let detail = envelope
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ChatError::Malformed(if detail.is_empty() {
            "request was not successful".to_string()
        } else {
            detail
        }));
    }
    envelope
        .result
        .and_then(|r| r.response)
        .ok_or_else(|| ChatError::Malformed("missing result.response".to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
