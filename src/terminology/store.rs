/*!
 * Terminology dictionary storage.
 *
 * The dictionary file is a JSON object with two sections:
 * - `admin_ui_terms.<pair>`: lowercase source term → target term, for the
 *   `turkish_to_english` and `english_to_german` pairs
 * - `quality_patterns.common_mistakes.<language>`: correct term → list of
 *   known wrong variants produced by the models
 *
 * The dictionary is immutable after loading and is shared read-only.
 */

use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::TerminologyError;
use crate::language::{Language, LanguagePair};

/// A correct term together with the wrong variants models tend to emit for it
#[derive(Debug, Clone, PartialEq)]
pub struct CommonMistake {
    /// The term that should appear in the output
    pub correct: String,
    /// Variants that are known to be wrong
    pub wrong_variants: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDictionary {
    #[serde(default)]
    admin_ui_terms: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    quality_patterns: RawQualityPatterns,
}

#[derive(Debug, Default, Deserialize)]
struct RawQualityPatterns {
    // Ordered map, keeps the correction order of the file
    #[serde(default)]
    common_mistakes: HashMap<String, serde_json::Map<String, serde_json::Value>>,
}

/// Domain terminology for the translation chain
#[derive(Debug, Clone, Default)]
pub struct TerminologyDictionary {
    // @field: Dictionary section key → (lowercase source term → target term)
    terms: HashMap<String, HashMap<String, String>>,
    // @field: Target language → known mistakes, in file order
    common_mistakes: HashMap<Language, Vec<CommonMistake>>,
}

impl TerminologyDictionary {
    /// Create an empty dictionary (all lookups miss)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the dictionary from a JSON file
    ///
    /// A missing file is not an error: a warning is logged and an empty
    /// dictionary is returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TerminologyError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Terminology file not found: {}, continuing with an empty dictionary", display);
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(TerminologyError::Io { path: display, source });
            }
        };

        let dictionary = Self::from_json_str(&content, &display)?;
        info!(
            "Loaded terminology from {}: {} terms, {} known mistakes",
            display,
            dictionary.term_count(),
            dictionary.mistake_count()
        );
        Ok(dictionary)
    }

    /// Parse a dictionary from JSON text; `origin` names the source in errors
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, TerminologyError> {
        let parse_error = |source| TerminologyError::Parse {
            path: origin.to_string(),
            source,
        };

        let raw: RawDictionary = serde_json::from_str(json).map_err(parse_error)?;

        let terms = raw
            .admin_ui_terms
            .into_iter()
            .map(|(section, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(source, target)| (source.to_lowercase(), target))
                    .collect();
                (section, entries)
            })
            .collect();

        let mut common_mistakes: HashMap<Language, Vec<CommonMistake>> = HashMap::new();
        for (lang_key, patterns) in raw.quality_patterns.common_mistakes {
            let Ok(language) = Language::from_code(&lang_key) else {
                debug!("Ignoring common mistakes for unsupported language '{}'", lang_key);
                continue;
            };

            let mistakes = common_mistakes.entry(language).or_default();
            for (correct, variants) in patterns {
                let wrong_variants: Vec<String> =
                    serde_json::from_value(variants).map_err(parse_error)?;
                mistakes.push(CommonMistake { correct, wrong_variants });
            }
        }

        Ok(Self { terms, common_mistakes })
    }

    /// Add a term for a language pair
    pub fn with_term(mut self, pair: LanguagePair, source: &str, target: &str) -> Self {
        if let Some(key) = pair.dictionary_key() {
            self.terms
                .entry(key.to_string())
                .or_default()
                .insert(source.to_lowercase(), target.to_string());
        }
        self
    }

    /// Add a known mistake for a target language
    pub fn with_common_mistake(mut self, language: Language, correct: &str, wrong: &[&str]) -> Self {
        self.common_mistakes.entry(language).or_default().push(CommonMistake {
            correct: correct.to_string(),
            wrong_variants: wrong.iter().map(|w| w.to_string()).collect(),
        });
        self
    }

    /// Term table for a pair; `None` for unsupported pairs or missing sections
    pub fn terms_for(&self, pair: LanguagePair) -> Option<&HashMap<String, String>> {
        pair.dictionary_key().and_then(|key| self.terms.get(key))
    }

    /// Known mistakes for a target language
    pub fn common_mistakes(&self, language: Language) -> &[CommonMistake] {
        self.common_mistakes
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn term_count(&self) -> usize {
        self.terms.values().map(HashMap::len).sum()
    }

    pub fn mistake_count(&self) -> usize {
        self.common_mistakes
            .values()
            .flat_map(|m| m.iter())
            .map(|m| m.wrong_variants.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0 && self.mistake_count() == 0
    }
}
