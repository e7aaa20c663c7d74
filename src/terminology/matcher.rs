use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::language::{Language, LanguagePair};
use crate::terminology::store::TerminologyDictionary;

/// Characters removed from a token before a word-level lookup
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Dictionary-based term translation
///
/// Matching is case-insensitive and exact at the dictionary level. Only the
/// turkish→english and english→german directions are supported; any other
/// pair simply misses.
#[derive(Debug, Clone)]
pub struct TerminologyMatcher {
    dictionary: Arc<TerminologyDictionary>,
}

impl TerminologyMatcher {
    pub fn new(dictionary: Arc<TerminologyDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &TerminologyDictionary {
        &self.dictionary
    }

    /// Look up a single term
    pub fn lookup(&self, term: &str, source: Language, target: Language) -> Option<&str> {
        self.dictionary
            .terms_for(LanguagePair::new(source, target))?
            .get(&term.to_lowercase())
            .map(String::as_str)
    }

    /// Translate text from the dictionary alone
    ///
    /// Returns the translated text and whether any dictionary entry was used.
    /// A whole-string match wins; otherwise tokens are looked up one by one
    /// with their punctuation stripped. A matched token is replaced wholesale,
    /// so its punctuation is not carried over.
    pub fn translate_with_terminology(&self, text: &str, source: Language, target: Language) -> (String, bool) {
        if let Some(term) = self.lookup(text, source, target) {
            return (term.to_string(), true);
        }

        let mut used_terminology = false;
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|token| {
                let clean = PUNCTUATION_REGEX.replace_all(token, "");
                match self.lookup(&clean, source, target) {
                    Some(term) => {
                        used_terminology = true;
                        term.to_string()
                    }
                    None => token.to_string(),
                }
            })
            .collect();

        if used_terminology {
            (tokens.join(" "), true)
        } else {
            (text.to_string(), false)
        }
    }
}
