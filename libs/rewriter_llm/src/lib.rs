//! Generation client for the rewriter service.
//!
//! A [`GenerationService`] performs one request/response exchange with a
//! remote text-generation backend. [`GenerationClient`] wraps a service with a
//! per-attempt timeout and an optional retry policy for transient failures.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

pub mod openai;

pub use openai::{CompletionConfig, OpenAIService};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("credential rejected by the generation service: {0}")]
    Authentication(String),

    #[error("generation service failure: {0}")]
    Service(String),

    #[error("invalid generation request: {0}")]
    Request(String),
}

impl GenerationError {
    /// Only service-side failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Service(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Authentication(_) => "authentication",
            GenerationError::Service(_) => "service",
            GenerationError::Request(_) => "request",
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Secret used to authorize calls to the generation service.
///
/// The value never shows up in `Debug` output, so it is safe to keep inside
/// structs that get traced.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Only a key with no characters at all counts as missing; whitespace is
    /// sent as typed and left for the service to reject.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationClientConfig {
    pub timeout: Duration,
    pub retry_config: RetryConfig,
}

impl Default for GenerationClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(180),
            retry_config: RetryConfig::default(),
        }
    }
}

#[derive(Clone)]
pub struct GenerationClient {
    service: Arc<dyn GenerationService>,
    config: GenerationClientConfig,
}

impl GenerationClient {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self {
            service,
            config: GenerationClientConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.config.retry_config = retry_config;
        self
    }

    fn retry_strategy(&self) -> impl Iterator<Item = Duration> {
        // 2x, 4x, 8x ... the base delay
        let base_ms = self.config.retry_config.base_delay.as_millis() as u64;
        ExponentialBackoff::from_millis(2)
            .factor(base_ms.max(1))
            .max_delay(Duration::from_secs(30))
            .take(self.config.retry_config.max_retries as usize)
    }

    pub async fn generate(&self, credential: &Credential, prompt: &str) -> Result<String> {
        let timeout_duration = self.config.timeout;
        let max_retries = self.config.retry_config.max_retries;
        let mut attempt = 0u32;

        RetryIf::spawn(
            self.retry_strategy(),
            || {
                attempt += 1;
                let current = attempt;
                let service = Arc::clone(&self.service);

                async move {
                    match timeout(timeout_duration, service.generate(credential, prompt)).await {
                        Ok(Ok(text)) => Ok(text),
                        Ok(Err(e)) => {
                            if e.is_transient() && current <= max_retries {
                                tracing::warn!(
                                    "Generation failed (attempt {}/{}): {}. Retrying...",
                                    current,
                                    max_retries + 1,
                                    e
                                );
                            } else {
                                tracing::error!("Generation failed after {} attempt(s): {}", current, e);
                            }
                            Err(e)
                        }
                        Err(_) => {
                            tracing::error!("Generation timed out after {:?}", timeout_duration);
                            Err(GenerationError::Service(format!(
                                "request timed out after {:?}",
                                timeout_duration
                            )))
                        }
                    }
                }
            },
            GenerationError::is_transient,
        )
        .await
    }
}
