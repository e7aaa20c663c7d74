/*!
 * Hardcoded output corrections per language pair.
 *
 * These are known mistranslations of admin UI labels by the translation
 * models (for instance Turkish "Giriş" coming back as "Introduction"
 * instead of "Login"). Each entry replaces a whole word or phrase,
 * case-insensitively.
 */

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::language::{Language, LanguagePair};

/// One known wrong output and its correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonFix {
    pub wrong: &'static str,
    pub correct: &'static str,
}

const TURKISH_TO_ENGLISH_FIXES: &[CommonFix] = &[
    CommonFix { wrong: "introduction", correct: "login" },
    CommonFix { wrong: "exit", correct: "logout" },
    CommonFix { wrong: "mercenary kurds", correct: "exchange rates" },
    CommonFix { wrong: "bayiers", correct: "dealers" },
    CommonFix { wrong: "varient", correct: "variant" },
    CommonFix { wrong: "copyed", correct: "copied" },
    CommonFix { wrong: "absorptions", correct: "subscriptions" },
];

const ENGLISH_TO_GERMAN_FIXES: &[CommonFix] = &[
    CommonFix { wrong: "resorptionen", correct: "abonnements" },
];

struct CompiledFix {
    pattern: Regex,
    correct: &'static str,
}

fn compile(fixes: &'static [CommonFix]) -> Vec<CompiledFix> {
    fixes
        .iter()
        .map(|fix| CompiledFix {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(fix.wrong))).unwrap(),
            correct: fix.correct,
        })
        .collect()
}

static TURKISH_TO_ENGLISH_COMPILED: Lazy<Vec<CompiledFix>> = Lazy::new(|| compile(TURKISH_TO_ENGLISH_FIXES));
static ENGLISH_TO_GERMAN_COMPILED: Lazy<Vec<CompiledFix>> = Lazy::new(|| compile(ENGLISH_TO_GERMAN_FIXES));

/// The fix table for a language pair (empty for unsupported pairs)
pub fn fixes_for(pair: LanguagePair) -> &'static [CommonFix] {
    match (pair.source, pair.target) {
        (Language::Turkish, Language::English) => TURKISH_TO_ENGLISH_FIXES,
        (Language::English, Language::German) => ENGLISH_TO_GERMAN_FIXES,
        _ => &[],
    }
}

fn compiled_for(pair: LanguagePair) -> &'static [CompiledFix] {
    match (pair.source, pair.target) {
        (Language::Turkish, Language::English) => TURKISH_TO_ENGLISH_COMPILED.as_slice(),
        (Language::English, Language::German) => ENGLISH_TO_GERMAN_COMPILED.as_slice(),
        _ => &[],
    }
}

/// Apply the pair's fix table to `text`
pub fn apply_terminology_fixes(text: &str, pair: LanguagePair) -> String {
    let mut result = text.to_string();
    for fix in compiled_for(pair) {
        if fix.pattern.is_match(&result) {
            result = fix.pattern.replace_all(&result, NoExpand(fix.correct)).into_owned();
        }
    }
    result
}
