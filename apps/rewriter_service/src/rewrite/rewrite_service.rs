use rewriter_llm::GenerationClient;

use super::input_validator::{check_length, has_credential, has_draft, word_count};
use super::types::{RewriteForm, RewriteRequest};
use crate::error::RewriteError;
use crate::prompts::rewrite_prompt::RewritePrompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    CollectingInputs,
    LengthRejected,
    AwaitingCredential,
    Generating,
    Rendered,
    ErrorDisplayed,
}

/// Where a pass stopped, with what the page needs to show for it.
#[derive(Debug)]
pub enum PassOutcome {
    CollectingInputs,
    LengthRejected { words: usize },
    AwaitingCredential,
    Rendered { text: String },
    ErrorDisplayed { error: RewriteError },
}

impl PassOutcome {
    pub fn state(&self) -> PassState {
        match self {
            PassOutcome::CollectingInputs => PassState::CollectingInputs,
            PassOutcome::LengthRejected { .. } => PassState::LengthRejected,
            PassOutcome::AwaitingCredential => PassState::AwaitingCredential,
            PassOutcome::Rendered { .. } => PassState::Rendered,
            PassOutcome::ErrorDisplayed { .. } => PassState::ErrorDisplayed,
        }
    }
}

#[derive(Clone)]
pub struct RewriteService {
    generation_client: GenerationClient,
}

impl RewriteService {
    pub fn new(generation_client: GenerationClient) -> Self {
        Self { generation_client }
    }

    /// Gates a submission. Length is checked first and unconditionally; the
    /// credential only matters once there is a draft.
    pub fn validate(form: &RewriteForm) -> Result<RewriteRequest, RewriteError> {
        check_length(&form.draft).map_err(|words| RewriteError::DraftTooLong { words })?;

        if !has_draft(&form.draft) {
            return Err(RewriteError::EmptyDraft);
        }

        let credential = form.credential();
        if !has_credential(&credential) {
            return Err(RewriteError::MissingCredential);
        }

        Ok(RewriteRequest {
            draft: form.draft.clone(),
            tone: form.tone,
            dialect: form.dialect,
            credential,
        })
    }

    pub async fn rewrite(&self, request: RewriteRequest) -> Result<String, RewriteError> {
        let prompt = RewritePrompt::render(
            &request.draft,
            request.tone.label(),
            request.dialect.label(),
        )?;

        tracing::info!(
            state = ?PassState::Generating,
            tone = %request.tone,
            dialect = %request.dialect,
            "Requesting rewrite"
        );

        let text = self
            .generation_client
            .generate(&request.credential, &prompt)
            .await?;

        Ok(text)
    }

    /// Runs one pass of the page flow.
    pub async fn run_pass(&self, form: &RewriteForm) -> PassOutcome {
        let outcome = match Self::validate(form) {
            Err(RewriteError::DraftTooLong { words }) => PassOutcome::LengthRejected { words },
            Err(RewriteError::EmptyDraft) => PassOutcome::CollectingInputs,
            Err(RewriteError::MissingCredential) => PassOutcome::AwaitingCredential,
            Err(error) => PassOutcome::ErrorDisplayed { error },
            Ok(request) => match self.rewrite(request).await {
                Ok(text) => PassOutcome::Rendered { text },
                Err(error) => PassOutcome::ErrorDisplayed { error },
            },
        };

        tracing::info!(
            state = ?outcome.state(),
            words = word_count(&form.draft),
            "Pass finished"
        );

        outcome
    }
}
