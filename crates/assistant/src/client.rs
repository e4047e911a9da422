//! REST client for the chat-completions endpoint.
//!
//! Wraps the OpenAI-compatible `/chat/completions` API using [`reqwest`].
//! The reply is stored and returned verbatim -- nothing downstream parses
//! or interprets assistant output.

use serde::{Deserialize, Serialize};

/// Configuration for the completion service.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion length cap.
    pub max_tokens: u32,
}

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default completion length cap.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

impl AssistantConfig {
    /// Load assistant configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                        |
    /// |------------------------|----------|--------------------------------|
    /// | `OPENAI_API_KEY`       | **yes**  | --                             |
    /// | `OPENAI_BASE_URL`      | no       | `https://api.openai.com/v1`    |
    /// | `OPENAI_MODEL`         | no       | `gpt-3.5-turbo`                |
    ///
    /// # Panics
    ///
    /// Panics if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Self {
            api_key,
            base_url,
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// One message in a completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Errors from the completion API layer.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but with no usable completion.
    #[error("Completion response contained no choices")]
    EmptyCompletion,
}

/// HTTP client for the completion service.
pub struct AssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    /// Create a new client for the configured completion service.
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: AssistantConfig) -> Self {
        Self { client, config }
    }

    /// Request a completion for the given conversation.
    ///
    /// Sends `POST /chat/completions` and returns the first choice's
    /// message content verbatim.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AssistantError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AssistantError::EmptyCompletion)
    }
}
