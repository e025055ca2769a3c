// api interaction module - handles openrouter api communication

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::GenerationError;
use crate::utils::truncate_with_ellipsis;

const TEMPERATURE: f32 = 0.1;
const MAX_ERROR_BODY_CHARS: usize = 500;

// openrouter api structures
#[derive(Serialize)]
struct OpenRouterRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenRouterResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// one model call: which model, what instructions, what input
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub max_tokens: u32,
}

/// seam between the generation pipeline and a remote model provider
///
/// implementations return the raw completion text. empty text is not an
/// error at this level; the pipeline decides what an empty answer means.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: ModelRequest<'_>) -> Result<String, GenerationError>;
}

/// openrouter chat-completions client
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GenerationError::Upstream(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.credentials.api_key.clone(),
            timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    async fn complete(&self, request: ModelRequest<'_>) -> Result<String, GenerationError> {
        let body = OpenRouterRequest {
            model: request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: request.system_prompt,
                },
                Message {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: request.max_tokens,
        };

        debug!(
            model = request.model,
            prompt_chars = request.user_prompt.len(),
            "calling openrouter"
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("X-Title", "diffscribe")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(classify_status(status, &error_text));
        }

        let parsed = response
            .json::<OpenRouterResponse>()
            .await
            .map_err(|e| {
                GenerationError::Upstream(format!("failed to parse openrouter api response: {e}"))
            })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

impl OpenRouterClient {
    fn transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Upstream(format!(
                "openrouter api request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            GenerationError::Upstream(format!("failed to connect to openrouter api: {e}"))
        }
    }
}

/// map a non-success http status onto the error taxonomy
pub fn classify_status(status: StatusCode, error_text: &str) -> GenerationError {
    match status {
        StatusCode::UNAUTHORIZED => GenerationError::InvalidCredential,
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
        _ => GenerationError::Upstream(format!(
            "openrouter api error ({}): {}",
            status,
            truncate_with_ellipsis(error_text.trim(), MAX_ERROR_BODY_CHARS)
        )),
    }
}
