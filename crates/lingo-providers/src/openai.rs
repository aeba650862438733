//! OpenAI API assistant implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use lingo_core::chat::{ChatMessage, Role};
use lingo_core::error::ProviderError;
use lingo_core::traits::{definition_prompt, Assistant, Capability, ChunkStream};

use crate::sse;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFINE_TEMPERATURE: f64 = 0.5;
const CHAT_TEMPERATURE: f64 = 0.6;

/// OpenAI-compatible chat completions backend.
pub struct OpenAiAssistant {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiAssistant {
    pub fn new(api_key: &str, model: Option<String>, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// POST a chat completion and map HTTP failures onto `ProviderError`.
    async fn send(&self, body: &OpenAiRequest<'_>) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            });
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: body,
            });
        }

        Ok(response)
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: &message.content,
        }
    }
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Assistant for OpenAiAssistant {
    fn name(&self) -> &str {
        "openai"
    }

    fn capability(&self) -> Capability {
        Capability::Enabled
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn define(&self, term: &str) -> Result<String, ProviderError> {
        let prompt = definition_prompt(term);
        let body = OpenAiRequest {
            model: &self.model,
            temperature: DEFINE_TEMPERATURE,
            messages: vec![OpenAiMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
        };

        let response = self.send(&body).await?;
        let api_response: OpenAiResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "response contained no text".into(),
            ));
        }

        debug!(chars = content.len(), "definition received");
        Ok(content)
    }

    #[instrument(skip(self, history), fields(model = %self.model, turns = history.len()))]
    async fn ask(&self, history: &[ChatMessage]) -> Result<ChunkStream, ProviderError> {
        let body = OpenAiRequest {
            model: &self.model,
            temperature: CHAT_TEMPERATURE,
            messages: history.iter().map(OpenAiMessage::from).collect(),
            stream: true,
        };

        let response = self.send(&body).await?;
        debug!("streaming reply");
        Ok(sse::decode(Box::pin(response.bytes_stream())))
    }
}
