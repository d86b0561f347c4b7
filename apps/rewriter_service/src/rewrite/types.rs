use rewriter_llm::Credential;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Formal,
    Informal,
}

impl Tone {
    pub const ALL: [Tone; 2] = [Tone::Formal, Tone::Informal];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Informal => "Informal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    American,
    British,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::American, Dialect::British];

    pub fn label(self) -> &'static str {
        match self {
            Dialect::American => "American",
            Dialect::British => "British",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Widget values submitted by the page form or the JSON API.
///
/// Missing fields take the same defaults the page shows on first load.
#[derive(Clone, Default, Deserialize)]
pub struct RewriteForm {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub draft: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub dialect: Dialect,
}

impl RewriteForm {
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }
}

impl fmt::Debug for RewriteForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteForm")
            .field("api_key", &self.credential())
            .field("draft_len", &self.draft.len())
            .field("tone", &self.tone)
            .field("dialect", &self.dialect)
            .finish()
    }
}

/// A validated pass input, ready for the template and the generation client.
#[derive(Debug, Clone)]
pub struct RewriteRequest {
    pub draft: String,
    pub tone: Tone,
    pub dialect: Dialect,
    pub credential: Credential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_options() {
        assert_eq!(Tone::default(), Tone::ALL[0]);
        assert_eq!(Dialect::default(), Dialect::ALL[0]);
    }

    #[test]
    fn form_deserializes_labels() {
        let form: RewriteForm = serde_json::from_str(
            r#"{"api_key":"sk-1","draft":"hi","tone":"Informal","dialect":"British"}"#,
        )
        .unwrap();
        assert_eq!(form.tone, Tone::Informal);
        assert_eq!(form.dialect, Dialect::British);
    }

    #[test]
    fn unknown_tone_is_rejected() {
        let result = serde_json::from_str::<RewriteForm>(r#"{"tone":"Sarcastic"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn form_debug_hides_key_and_draft() {
        let form = RewriteForm {
            api_key: "sk-secret".to_string(),
            draft: "private words".to_string(),
            ..RewriteForm::default()
        };
        let rendered = format!("{:?}", form);
        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("private words"));
    }
}
