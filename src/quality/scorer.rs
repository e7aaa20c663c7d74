/*!
 * Rubric-based quality scoring for a single translated string.
 *
 * The score starts at 100 and is only ever reduced:
 * - Known wrong term present: -20 each (uncapped)
 * - Empty translation: score forced to 0
 * - Translation shorter than 20% of the original: -15
 * - HTML tag set differs from the original: -10
 *
 * The final score is floored at 0 and anything below 70 needs review.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::language::Language;
use crate::terminology::TerminologyDictionary;

/// Score every translation starts with
pub const MAX_SCORE: f64 = 100.0;

/// Scores below this value are flagged for review
pub const REVIEW_THRESHOLD: f64 = 70.0;

const COMMON_MISTAKE_PENALTY: f64 = 20.0;
const TOO_SHORT_PENALTY: f64 = 15.0;
const HTML_MISMATCH_PENALTY: f64 = 10.0;

/// Minimum translated/original character ratio before `too_short` fires
const MIN_LENGTH_RATIO: f64 = 0.2;

static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Kind of problem found in a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    CommonMistake,
    EmptyTranslation,
    TooShort,
    HtmlMismatch,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommonMistake => "common_mistake",
            Self::EmptyTranslation => "empty_translation",
            Self::TooShort => "too_short",
            Self::HtmlMismatch => "html_mismatch",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue detected by the scorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_term: Option<String>,
    /// Confidence that this is a real problem (0.0 - 1.0)
    pub confidence: f64,
}

impl QualityIssue {
    fn new(kind: IssueKind, confidence: f64) -> Self {
        Self {
            kind,
            wrong_term: None,
            correct_term: None,
            confidence,
        }
    }

    fn common_mistake(wrong: &str, correct: &str) -> Self {
        Self {
            kind: IssueKind::CommonMistake,
            wrong_term: Some(wrong.to_string()),
            correct_term: Some(correct.to_string()),
            confidence: 0.9,
        }
    }
}

/// Outcome of scoring one translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityResult {
    /// Score in 0 - 100
    pub score: f64,
    /// Issues in the order the rules found them
    pub issues: Vec<QualityIssue>,
    /// True when the score is below the review threshold
    pub needs_review: bool,
}

impl QualityResult {
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    /// Comma-separated issue tags, for log lines
    pub fn issue_summary(&self) -> String {
        self.issues
            .iter()
            .map(|issue| match &issue.wrong_term {
                Some(wrong) => format!("{} ({})", issue.kind, wrong),
                None => issue.kind.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Quality scorer backed by the dictionary's known mistakes
#[derive(Debug, Clone)]
pub struct QualityScorer {
    dictionary: Arc<TerminologyDictionary>,
}

impl QualityScorer {
    pub fn new(dictionary: Arc<TerminologyDictionary>) -> Self {
        Self { dictionary }
    }

    /// Find every known wrong variant present in `text`
    pub fn check_common_mistakes(&self, text: &str, target: Language) -> Vec<QualityIssue> {
        let text_lower = text.to_lowercase();

        self.dictionary
            .common_mistakes(target)
            .iter()
            .flat_map(|mistake| {
                mistake
                    .wrong_variants
                    .iter()
                    .filter(|wrong| text_lower.contains(&wrong.to_lowercase()))
                    .map(|wrong| QualityIssue::common_mistake(wrong, &mistake.correct))
            })
            .collect()
    }

    /// Score a translation against its original
    pub fn score(&self, original: &str, translated: &str, target: Language) -> QualityResult {
        let mut score = MAX_SCORE;
        let mut issues = Vec::new();

        for mistake in self.check_common_mistakes(translated, target) {
            score -= COMMON_MISTAKE_PENALTY;
            issues.push(mistake);
        }

        if translated.trim().is_empty() {
            score = 0.0;
            issues.push(QualityIssue::new(IssueKind::EmptyTranslation, 1.0));
        }

        let original_len = original.chars().count() as f64;
        let translated_len = translated.chars().count() as f64;
        if translated_len < original_len * MIN_LENGTH_RATIO {
            score -= TOO_SHORT_PENALTY;
            issues.push(QualityIssue::new(IssueKind::TooShort, 0.7));
        }

        if extract_tags(original) != extract_tags(translated) {
            score -= HTML_MISMATCH_PENALTY;
            issues.push(QualityIssue::new(IssueKind::HtmlMismatch, 0.8));
        }

        let score = score.max(0.0);
        QualityResult {
            score,
            issues,
            needs_review: score < REVIEW_THRESHOLD,
        }
    }
}

/// Distinct `<...>` tags in a string
pub fn extract_tags(text: &str) -> HashSet<&str> {
    HTML_TAG_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}
