/*!
 * Structure-preserving translation of strings and JSON trees.
 *
 * Strings containing markup are split so that only the text between tags
 * reaches the translator. The reassembled string is the raw translation
 * that the corrector then post-processes once per leaf. JSON trees are
 * walked recursively; only string leaves change.
 */

use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::errors::TranslationError;
use crate::postprocess::{Corrector, TranslationRecord};
use crate::providers::Translator;
use crate::quality::QualityIssue;
use crate::terminology::{TerminologyDictionary, TerminologyMatcher};
use crate::translation::segments::{self, Segment};

/// A leaf whose translation scored below the review threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFlag {
    /// JSON pointer of the leaf in the document
    pub path: String,
    pub original: String,
    pub translation: String,
    pub score: f64,
    pub issues: Vec<QualityIssue>,
}

/// Per-document translation statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationStats {
    /// String leaves translated
    pub leaves: usize,
    /// Leaves changed by post-processing
    pub improved: usize,
    /// Leaves answered from the dictionary without a model call
    pub from_terminology: usize,
    /// Leaves needing review
    pub flagged: Vec<ReviewFlag>,
}

impl TranslationStats {
    fn record(&mut self, path: &str, record: &TranslationRecord) {
        self.leaves += 1;
        if record.improved {
            self.improved += 1;
        }
        if record.needs_review() {
            warn!(
                "Review needed at {} (score {:.0}): {}",
                if path.is_empty() { "/" } else { path },
                record.quality.score,
                record.quality.issue_summary()
            );
            self.flagged.push(ReviewFlag {
                path: path.to_string(),
                original: record.original.clone(),
                translation: record.processed_translation.clone(),
                score: record.quality.score,
                issues: record.quality.issues.clone(),
            });
        }
    }
}

/// Escape a key for use as a JSON pointer token
fn pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Translation driver shared by both stages of the chain
pub struct TranslationDriver {
    corrector: Corrector,
    matcher: TerminologyMatcher,
    terminology_first: bool,
}

impl TranslationDriver {
    pub fn new(dictionary: Arc<TerminologyDictionary>) -> Self {
        Self {
            corrector: Corrector::new(Arc::clone(&dictionary)),
            matcher: TerminologyMatcher::new(dictionary),
            terminology_first: false,
        }
    }

    /// Answer whole-string dictionary hits without calling the translator
    pub fn with_terminology_first(mut self, enabled: bool) -> Self {
        self.terminology_first = enabled;
        self
    }

    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    pub fn matcher(&self) -> &TerminologyMatcher {
        &self.matcher
    }

    /// Produce the raw translation of a string, keeping markup intact
    pub async fn raw_translate(&self, text: &str, translator: &dyn Translator) -> Result<String, TranslationError> {
        if !segments::contains_markup(text) {
            if text.trim().is_empty() {
                return Ok(text.to_string());
            }
            let translated = translator.translate(text).await?;
            return Ok(translated.trim().to_string());
        }

        let mut assembled = String::with_capacity(text.len());
        for segment in segments::split_markup(text) {
            match segment {
                Segment::Tag(tag) => assembled.push_str(tag),
                Segment::Text(part) => {
                    let content = part.trim();
                    if content.is_empty() {
                        assembled.push_str(part);
                        continue;
                    }

                    let translated = translator.translate(content).await?;
                    if part.starts_with(' ') {
                        assembled.push(' ');
                    }
                    assembled.push_str(translated.trim());
                    if part.ends_with(' ') {
                        assembled.push(' ');
                    }
                }
            }
        }

        Ok(assembled)
    }

    /// Translate and post-process a single leaf string
    pub async fn translate_leaf(&self, text: &str, translator: &dyn Translator) -> Result<TranslationRecord, TranslationError> {
        let (record, _) = self.translate_leaf_inner(text, translator).await?;
        Ok(record)
    }

    /// Returns the record and whether the dictionary answered without a model call
    async fn translate_leaf_inner(
        &self,
        text: &str,
        translator: &dyn Translator,
    ) -> Result<(TranslationRecord, bool), TranslationError> {
        let pair = translator.pair();

        let dictionary_hit = if self.terminology_first && !segments::contains_markup(text) {
            self.matcher.lookup(text, pair.source, pair.target)
        } else {
            None
        };

        let (raw, from_dictionary) = match dictionary_hit {
            Some(term) => {
                debug!("Dictionary hit for '{}': '{}'", text, term);
                (term.to_string(), true)
            }
            None => (self.raw_translate(text, translator).await?, false),
        };

        let record = self.corrector.process(text, &raw, pair.source, pair.target);
        Ok((record, from_dictionary))
    }

    /// Translate every string leaf of a JSON tree
    pub async fn translate_tree(&self, value: &Value, translator: &dyn Translator) -> Result<Value, TranslationError> {
        let (translated, _) = self.translate_document(value, translator).await?;
        Ok(translated)
    }

    /// Translate every string leaf of a JSON tree and collect statistics
    pub async fn translate_document(
        &self,
        value: &Value,
        translator: &dyn Translator,
    ) -> Result<(Value, TranslationStats), TranslationError> {
        let mut stats = TranslationStats::default();
        let translated = self.walk(value, String::new(), translator, &mut stats).await?;
        Ok((translated, stats))
    }

    fn walk<'a>(
        &'a self,
        value: &'a Value,
        path: String,
        translator: &'a dyn Translator,
        stats: &'a mut TranslationStats,
    ) -> BoxFuture<'a, Result<Value, TranslationError>> {
        async move {
            match value {
                Value::Object(map) => {
                    let mut translated = Map::with_capacity(map.len());
                    for (key, child) in map {
                        let child_path = format!("{}/{}", path, pointer_token(key));
                        let child = self.walk(child, child_path, translator, stats).await?;
                        translated.insert(key.clone(), child);
                    }
                    Ok(Value::Object(translated))
                }
                Value::Array(items) => {
                    let mut translated = Vec::with_capacity(items.len());
                    for (index, child) in items.iter().enumerate() {
                        let child_path = format!("{}/{}", path, index);
                        translated.push(self.walk(child, child_path, translator, stats).await?);
                    }
                    Ok(Value::Array(translated))
                }
                Value::String(text) => {
                    let (record, from_dictionary) = self.translate_leaf_inner(text, translator).await?;
                    if from_dictionary {
                        stats.from_terminology += 1;
                    }
                    stats.record(&path, &record);
                    Ok(Value::String(record.processed_translation))
                }
                other => Ok(other.clone()),
            }
        }
        .boxed()
    }
}
