//! Named-slot templates rendered through tera.
//!
//! A [`PromptTemplate`] compiles its `{{ name }}` text once at construction
//! and checks that every declared variable has a slot. [`PromptTemplate::format`]
//! refuses to render while a declared variable has no value, and tera rejects
//! any slot the context does not define.

use std::collections::HashMap;

use tera::{Context as TeraContext, Tera};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template declares variable `{0}` but never uses it")]
    UnusedVariable(String),

    #[error("no value supplied for placeholder `{0}`")]
    MissingValue(String),

    #[error("template failed: {0}")]
    Tera(#[from] tera::Error),
}

fn slot(name: &str) -> String {
    format!("{{{{ {} }}}}", name)
}

pub struct PromptTemplate {
    name: &'static str,
    source: String,
    input_variables: Vec<&'static str>,
    tera: Tera,
}

impl PromptTemplate {
    /// `name` must not end in `.html`, `.htm` or `.xml`: tera escapes those
    /// and prompt text goes out verbatim.
    pub fn new(
        name: &'static str,
        source: &str,
        input_variables: &[&'static str],
    ) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, source)?;

        for variable in input_variables {
            if !source.contains(&slot(variable)) {
                return Err(TemplateError::UnusedVariable(variable.to_string()));
            }
        }

        Ok(Self {
            name,
            source: source.to_string(),
            input_variables: input_variables.to_vec(),
            tera,
        })
    }

    pub fn input_variables(&self) -> &[&'static str] {
        &self.input_variables
    }

    /// Number of `{{ name }}` slots, counting repeats.
    pub fn occurrences(&self, name: &str) -> usize {
        self.source.matches(&slot(name)).count()
    }

    pub fn format(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut context = TeraContext::new();
        for variable in &self.input_variables {
            let value = values
                .get(variable)
                .ok_or_else(|| TemplateError::MissingValue(variable.to_string()))?;
            context.insert(*variable, value);
        }

        Ok(self.tera.render(self.name, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_every_occurrence() {
        let template =
            PromptTemplate::new("pair", "{{ a }} and {{ b }}, then {{ a }} again", &["a", "b"])
                .unwrap();
        assert_eq!(template.occurrences("a"), 2);

        let output = template.format(&values(&[("a", "x"), ("b", "y")])).unwrap();
        assert_eq!(output, "x and y, then x again");
    }

    #[test]
    fn rejects_unused_variable() {
        let err = PromptTemplate::new("only", "only {{ a }}", &["a", "b"]).err().unwrap();
        assert!(matches!(err, TemplateError::UnusedVariable(name) if name == "b"));
    }

    #[test]
    fn undeclared_slot_fails_to_render() {
        let template = PromptTemplate::new("extra", "{{ a }} {{ c }}", &["a"]).unwrap();
        let err = template.format(&values(&[("a", "x")])).unwrap_err();
        assert!(matches!(err, TemplateError::Tera(_)));
    }

    #[test]
    fn missing_value_is_an_error() {
        let template = PromptTemplate::new("both", "{{ a }} {{ b }}", &["a", "b"]).unwrap();
        let err = template.format(&values(&[("a", "x")])).unwrap_err();
        assert!(matches!(err, TemplateError::MissingValue(name) if name == "b"));
    }

    #[test]
    fn malformed_source_is_rejected_at_construction() {
        let err = PromptTemplate::new("broken", "{{ a ", &["a"]).err().unwrap();
        assert!(matches!(err, TemplateError::Tera(_)));
    }

    #[test]
    fn values_are_not_reinterpreted_as_slots() {
        let template = PromptTemplate::new("nested", "<{{ a }}> <{{ b }}>", &["a", "b"]).unwrap();
        let output = template
            .format(&values(&[("a", "{{ b }}"), ("b", "plain")]))
            .unwrap();
        assert_eq!(output, "<{{ b }}> <plain>");
    }

    #[test]
    fn values_are_not_html_escaped() {
        let template = PromptTemplate::new("raw.tera", "{{ a }}", &["a"]).unwrap();
        let output = template.format(&values(&[("a", r#"<b> & "q"/"#)])).unwrap();
        assert_eq!(output, r#"<b> & "q"/"#);
    }

    #[test]
    fn single_braces_stay_literal() {
        let template = PromptTemplate::new("json", "json: {\"k\": 1} {{ a }} { } {", &["a"]).unwrap();
        let output = template.format(&values(&[("a", "v")])).unwrap();
        assert_eq!(output, "json: {\"k\": 1} v { } {");
    }
}
