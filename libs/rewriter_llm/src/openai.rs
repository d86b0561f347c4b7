use async_openai::types::{CreateCompletionRequestArgs, CreateCompletionResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{Credential, GenerationError, GenerationService, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u16 = 256;

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u16,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<Value>,
}

/// Text completions backend speaking the OpenAI wire format.
///
/// The credential is passed per call and only lives in the outgoing
/// `Authorization` header.
pub struct OpenAIService {
    client: Client,
    config: CompletionConfig,
}

impl OpenAIService {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationService for OpenAIService {
    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        let request = CreateCompletionRequestArgs::default()
            .model(self.config.model.as_str())
            .prompt(prompt)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Service("request to completions endpoint timed out".to_string())
                } else {
                    GenerationError::Service(format!("failed to reach completions endpoint: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let completion: CreateCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Service(format!("malformed completion response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| GenerationError::Service("completion response had no choices".to_string()))
    }
}

/// Maps a non-success response onto the error taxonomy.
fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let code = parsed
        .as_ref()
        .and_then(|envelope| envelope.error.code.as_ref())
        .and_then(Value::as_str)
        .map(str::to_string);

    let message = parsed
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    if status == StatusCode::UNAUTHORIZED || code.as_deref() == Some("invalid_api_key") {
        GenerationError::Authentication(message)
    } else {
        GenerationError::Service(format!("{}: {}", status, message))
    }
}
