use rewriter_llm::Credential;

pub const MAX_DRAFT_WORDS: usize = 700;

pub const DRAFT_TOO_LONG_MESSAGE: &str =
    "Please enter a shorter text. The maximum length is 700 words.";

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please insert OpenAI API Key.";

pub const CREDENTIAL_HELP_URL: &str =
    "https://help.openai.com/en/articles/4936850-where-do-i-find-my-secret-api-key";

pub fn word_count(draft: &str) -> usize {
    draft.split_whitespace().count()
}

/// Returns the word count when the draft is over the limit.
pub fn check_length(draft: &str) -> Result<(), usize> {
    let words = word_count(draft);
    if words > MAX_DRAFT_WORDS {
        Err(words)
    } else {
        Ok(())
    }
}

pub fn has_draft(draft: &str) -> bool {
    !draft.trim().is_empty()
}

pub fn has_credential(credential: &Credential) -> bool {
    !credential.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["a"; n].join(" ")
    }

    #[test]
    fn counts_words_across_mixed_whitespace() {
        assert_eq!(word_count("one  two\nthree\tfour "), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn exactly_the_limit_passes() {
        assert_eq!(check_length(&words(700)), Ok(()));
    }

    #[test]
    fn one_over_the_limit_fails() {
        assert_eq!(check_length(&words(701)), Err(701));
    }

    #[test]
    fn blank_draft_is_not_a_draft() {
        assert!(!has_draft(" \n\t"));
        assert!(has_draft("x"));
    }

    #[test]
    fn credential_presence() {
        assert!(!has_credential(&Credential::new("")));
        assert!(has_credential(&Credential::new("sk-1")));
    }
}
