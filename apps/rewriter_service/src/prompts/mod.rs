pub mod prompt_template;
pub mod rewrite_prompt;
