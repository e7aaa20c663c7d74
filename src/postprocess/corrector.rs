/*!
 * Post-processing of raw model output.
 *
 * A raw translation goes through three ordered stages:
 * 1. Known mistakes from the dictionary are replaced by their correct term
 * 2. The hardcoded per-pair fix table is applied on word boundaries
 * 3. Sentence starts are capitalized
 *
 * The result is then scored against the original text.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::language::{Language, LanguagePair};
use crate::postprocess::fixes;
use crate::quality::{QualityResult, QualityScorer};
use crate::terminology::TerminologyDictionary;

/// Start of text, or sentence punctuation followed by whitespace, then a lowercase letter
static SENTENCE_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[.!?]\s+)(\p{Ll})").unwrap());

/// Everything known about one translated leaf string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationRecord {
    /// Source text
    pub original: String,
    /// Text as assembled from the model output
    pub raw_translation: String,
    /// Text after post-processing
    pub processed_translation: String,
    /// Score of the processed text
    pub quality: QualityResult,
    /// Whether post-processing changed the raw text
    pub improved: bool,
}

impl TranslationRecord {
    pub fn needs_review(&self) -> bool {
        self.quality.needs_review
    }
}

struct MistakePattern {
    pattern: Regex,
    correct: String,
}

/// Post-processor for raw translations
pub struct Corrector {
    scorer: QualityScorer,
    mistake_patterns: HashMap<Language, Vec<MistakePattern>>,
}

impl Corrector {
    /// Build a corrector; mistake patterns are compiled once here
    pub fn new(dictionary: Arc<TerminologyDictionary>) -> Self {
        let mut mistake_patterns = HashMap::new();

        for language in Language::ALL {
            let patterns: Vec<MistakePattern> = dictionary
                .common_mistakes(language)
                .iter()
                .flat_map(|mistake| {
                    mistake.wrong_variants.iter().filter_map(|wrong| {
                        match Regex::new(&format!("(?i){}", regex::escape(wrong))) {
                            Ok(pattern) => Some(MistakePattern {
                                pattern,
                                correct: mistake.correct.clone(),
                            }),
                            Err(e) => {
                                warn!("Skipping unusable mistake pattern '{}': {}", wrong, e);
                                None
                            }
                        }
                    })
                })
                .collect();

            if !patterns.is_empty() {
                mistake_patterns.insert(language, patterns);
            }
        }

        Self {
            scorer: QualityScorer::new(dictionary),
            mistake_patterns,
        }
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    /// Replace every known wrong variant for `target` with its correct term
    ///
    /// Variants are detected on the input text only; a variant introduced by an
    /// earlier replacement is left alone.
    pub fn fix_common_mistakes(&self, text: &str, target: Language) -> String {
        let Some(patterns) = self.mistake_patterns.get(&target) else {
            return text.to_string();
        };

        let detected: Vec<&MistakePattern> = patterns.iter().filter(|m| m.pattern.is_match(text)).collect();

        let mut result = text.to_string();
        for mistake in detected {
            result = mistake
                .pattern
                .replace_all(&result, NoExpand(&mistake.correct))
                .into_owned();
        }
        result
    }

    /// Apply the fixed correction table for the pair
    pub fn apply_terminology_fixes(&self, text: &str, source: Language, target: Language) -> String {
        fixes::apply_terminology_fixes(text, LanguagePair::new(source, target))
    }

    /// Run all stages and score the outcome
    pub fn process(&self, original: &str, raw_translation: &str, source: Language, target: Language) -> TranslationRecord {
        let processed = self.fix_common_mistakes(raw_translation, target);
        let processed = self.apply_terminology_fixes(&processed, source, target);
        let processed = normalize_capitalization(&processed);

        let quality = self.scorer.score(original, &processed, target);
        let improved = processed != raw_translation;

        TranslationRecord {
            original: original.to_string(),
            raw_translation: raw_translation.to_string(),
            processed_translation: processed,
            quality,
            improved,
        }
    }
}

/// Uppercase the first letter of the text and of every sentence
pub fn normalize_capitalization(text: &str) -> String {
    SENTENCE_START_REGEX
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}
