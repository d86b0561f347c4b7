use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rewriter_llm::GenerationError;
use serde_json::json;
use thiserror::Error;

use crate::prompts::prompt_template::TemplateError;
use crate::rewrite::input_validator::{DRAFT_TOO_LONG_MESSAGE, MISSING_CREDENTIAL_MESSAGE};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("{msg} (got {words} words)", msg = DRAFT_TOO_LONG_MESSAGE)]
    DraftTooLong { words: usize },

    #[error("Please enter the text you want to re-write.")]
    EmptyDraft,

    #[error("{msg}", msg = MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Page error: {0}")]
    Page(#[from] tera::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl RewriteError {
    pub fn kind(&self) -> &'static str {
        match self {
            RewriteError::DraftTooLong { .. } => "draft_too_long",
            RewriteError::EmptyDraft => "empty_draft",
            RewriteError::MissingCredential => "missing_credential",
            RewriteError::Template(_) => "template",
            RewriteError::Page(_) => "page",
            RewriteError::Generation(GenerationError::Authentication(_)) => "authentication",
            RewriteError::Generation(_) => "service",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RewriteError::DraftTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RewriteError::EmptyDraft => StatusCode::BAD_REQUEST,
            RewriteError::MissingCredential => StatusCode::UNAUTHORIZED,
            RewriteError::Template(_) | RewriteError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RewriteError::Generation(GenerationError::Authentication(_)) => StatusCode::UNAUTHORIZED,
            RewriteError::Generation(GenerationError::Request(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            RewriteError::Generation(GenerationError::Service(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text shown to the user on the page.
    pub fn user_message(&self) -> String {
        match self {
            RewriteError::DraftTooLong { .. } => DRAFT_TOO_LONG_MESSAGE.to_string(),
            RewriteError::Generation(GenerationError::Authentication(_)) => {
                "Your OpenAI API Key was rejected. Please check the key and try again.".to_string()
            }
            RewriteError::Generation(e) => {
                format!("The text could not be re-written right now: {}", e)
            }
            RewriteError::Template(e) => format!("The instruction could not be prepared: {}", e),
            RewriteError::Page(_) => "The page could not be rendered.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RewriteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Rewrite failed: {}", self);
        } else {
            tracing::warn!("Rewrite rejected: {}", self.kind());
        }

        (
            status,
            Json(json!({
                "error": self.user_message(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}
