//! HTML for the single rewrite page.
//!
//! The page is rebuilt from the submitted widget values on every pass, so the
//! inputs keep what the user typed or picked. Rendering goes through an
//! autoescaping tera template compiled on first use.

use std::sync::LazyLock;

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use super::input_validator::{CREDENTIAL_HELP_URL, DRAFT_TOO_LONG_MESSAGE, MISSING_CREDENTIAL_MESSAGE};
use super::rewrite_service::PassOutcome;
use super::types::{Dialect, RewriteForm, Tone};

const PAGE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

static PAGES: LazyLock<Result<Tera, tera::Error>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_NAME, PAGE_TEMPLATE)?;
    Ok(tera)
});

#[derive(Serialize)]
struct Choice {
    label: &'static str,
    selected: bool,
}

fn choices<T: Copy + PartialEq>(all: &[T], selected: T, label: fn(T) -> &'static str) -> Vec<Choice> {
    all.iter()
        .map(|&option| Choice {
            label: label(option),
            selected: option == selected,
        })
        .collect()
}

pub fn render_page(form: &RewriteForm, outcome: &PassOutcome) -> Result<String, tera::Error> {
    let tera = PAGES
        .as_ref()
        .map_err(|e| tera::Error::msg(format!("page template failed to compile: {}", e)))?;

    let mut context = TeraContext::new();
    context.insert("api_key", &form.api_key);
    context.insert("draft", &form.draft);
    context.insert("tone", form.tone.label());
    context.insert("dialect", form.dialect.label());
    context.insert("tones", &choices(&Tone::ALL, form.tone, Tone::label));
    context.insert("dialects", &choices(&Dialect::ALL, form.dialect, Dialect::label));
    context.insert("too_long_message", DRAFT_TOO_LONG_MESSAGE);
    context.insert("missing_credential_message", MISSING_CREDENTIAL_MESSAGE);
    context.insert("help_url", CREDENTIAL_HELP_URL);

    let view = match outcome {
        PassOutcome::CollectingInputs => "collecting_inputs",
        // Stops the page after the draft, before the selectors and the output.
        PassOutcome::LengthRejected { .. } => "length_rejected",
        PassOutcome::AwaitingCredential => "awaiting_credential",
        PassOutcome::Rendered { text } => {
            context.insert("text", text);
            "rendered"
        }
        PassOutcome::ErrorDisplayed { error } => {
            context.insert("error_kind", error.kind());
            context.insert("error_message", &error.user_message());
            "error"
        }
    };
    context.insert("view", view);

    tera.render(PAGE_NAME, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewriteError;
    use rewriter_llm::GenerationError;

    fn form() -> RewriteForm {
        RewriteForm {
            api_key: "sk-1".to_string(),
            draft: "hello <b>there</b>".to_string(),
            tone: Tone::Informal,
            dialect: Dialect::British,
        }
    }

    fn page(form: &RewriteForm, outcome: &PassOutcome) -> String {
        render_page(form, outcome).unwrap()
    }

    #[test]
    fn escapes_markup_in_submitted_values() {
        let form = RewriteForm {
            api_key: r#"sk-"><script>"#.to_string(),
            draft: r#"<a href="x">'&'</a>"#.to_string(),
            ..RewriteForm::default()
        };
        let html = page(&form, &PassOutcome::CollectingInputs);

        assert!(html.contains("&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;&#x2F;a&gt;"));
        assert!(html.contains(r#"value="sk-&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn initial_page_has_all_widgets_with_first_options_selected() {
        let html = page(&RewriteForm::default(), &PassOutcome::CollectingInputs);

        assert!(html.contains("<h1>Re-write your text</h1>"));
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains("<textarea"));
        assert!(html.contains(r#"<option value="Formal" selected>Formal</option>"#));
        assert!(html.contains(r#"<option value="Informal">Informal</option>"#));
        assert!(html.contains(r#"<option value="American" selected>American</option>"#));
        assert!(html.contains("Your Re-written text:"));
        assert!(html.contains(r#"<div class="output"></div>"#));
    }

    #[test]
    fn keeps_submitted_values() {
        let html = page(&form(), &PassOutcome::CollectingInputs);

        assert!(html.contains("hello &lt;b&gt;there&lt;&#x2F;b&gt;"));
        assert!(html.contains(r#"value="sk-1""#));
        assert!(html.contains(r#"<option value="Informal" selected>Informal</option>"#));
        assert!(html.contains(r#"<option value="British" selected>British</option>"#));
    }

    #[test]
    fn leading_newline_in_draft_survives() {
        let form = RewriteForm {
            draft: "\nsecond line".to_string(),
            ..form()
        };
        let html = page(&form, &PassOutcome::CollectingInputs);

        assert!(html.contains("placeholder=\"Your Text...\">\n\nsecond line</textarea>"));
    }

    #[test]
    fn length_rejection_stops_before_selectors_and_output() {
        let html = page(&form(), &PassOutcome::LengthRejected { words: 701 });

        assert!(html.contains(DRAFT_TOO_LONG_MESSAGE));
        assert!(!html.contains("<select"));
        assert!(!html.contains("Your Re-written text:"));
        assert!(html.contains(r#"<input type="hidden" name="tone" value="Informal">"#));
        assert!(html.contains(r#"<input type="hidden" name="dialect" value="British">"#));
    }

    #[test]
    fn missing_credential_shows_warning_with_link() {
        let html = page(&form(), &PassOutcome::AwaitingCredential);

        assert!(html.contains(r#"class="warning""#));
        assert!(html.contains(MISSING_CREDENTIAL_MESSAGE));
        assert!(html.contains(&format!(r#"<a href="{}">here</a>"#, CREDENTIAL_HELP_URL)));
        assert!(html.contains("<select"));
    }

    #[test]
    fn rendered_text_is_escaped() {
        let outcome = PassOutcome::Rendered {
            text: "Cheers, <script>".to_string(),
        };
        let html = page(&form(), &outcome);

        assert!(html.contains(r#"<div class="output">Cheers, &lt;script&gt;</div>"#));
    }

    #[test]
    fn authentication_error_is_distinguishable() {
        let outcome = PassOutcome::ErrorDisplayed {
            error: RewriteError::from(GenerationError::Authentication("bad".to_string())),
        };
        let html = page(&form(), &outcome);

        assert!(html.contains(r#"data-kind="authentication""#));
        assert!(html.contains("was rejected"));
    }
}
