use std::collections::HashMap;
use std::sync::LazyLock;

use super::prompt_template::{PromptTemplate, TemplateError};

const TEMPLATE_NAME: &str = "rewrite_prompt.tera";
const REWRITE_TEMPLATE: &str = include_str!("../../templates/rewrite_prompt.tera");

const INPUT_VARIABLES: [&str; 3] = ["draft", "tone", "dialect"];

static TEMPLATE: LazyLock<Result<PromptTemplate, TemplateError>> =
    LazyLock::new(|| PromptTemplate::new(TEMPLATE_NAME, REWRITE_TEMPLATE, &INPUT_VARIABLES));

pub struct RewritePrompt;

impl RewritePrompt {
    /// The compiled instruction template, built on first use.
    pub fn template() -> Result<&'static PromptTemplate, TemplateError> {
        TEMPLATE
            .as_ref()
            .map_err(|e| TemplateError::Tera(tera::Error::msg(e.to_string())))
    }

    pub fn render(draft: &str, tone: &str, dialect: &str) -> Result<String, TemplateError> {
        let values = HashMap::from([("draft", draft), ("tone", tone), ("dialect", dialect)]);
        Self::template()?.format(&values)
    }
}
