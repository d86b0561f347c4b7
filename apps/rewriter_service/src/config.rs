use std::time::Duration;

use clap::Parser;
use rewriter_llm::openai::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use rewriter_llm::{CompletionConfig, GenerationClientConfig, RetryConfig};

/// Headroom on top of the generation budget before the HTTP layer gives up.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Parser)]
#[command(name = "rewriter", about = "Re-write text in a chosen tone and English dialect")]
pub struct ServiceConfig {
    #[arg(long, env = "REWRITER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "REWRITER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// `dev` logs human readable output, anything else logs JSON.
    #[arg(long, env = "APP_ENVIRONMENT", default_value = "dev")]
    pub environment: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u16,

    #[arg(long, env = "GENERATION_TIMEOUT_SECS", default_value_t = 180)]
    pub generation_timeout_secs: u64,

    #[arg(long, env = "GENERATION_MAX_RETRIES", default_value_t = 0)]
    pub max_retries: u32,
}

impl ServiceConfig {
    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            base_url: self.openai_base_url.clone(),
            model: self.model.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: self.max_tokens,
        }
    }

    pub fn generation_client_config(&self) -> GenerationClientConfig {
        GenerationClientConfig {
            timeout: Duration::from_secs(self.generation_timeout_secs),
            retry_config: RetryConfig {
                max_retries: self.max_retries,
                ..RetryConfig::default()
            },
        }
    }

    /// Covers every generation attempt plus backoff headroom.
    pub fn request_timeout(&self) -> Duration {
        let attempts = self.max_retries + 1;
        Duration::from_secs(self.generation_timeout_secs) * attempts
            + REQUEST_TIMEOUT_MARGIN * attempts
    }
}
