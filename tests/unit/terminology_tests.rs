/*!
 * Tests for the terminology dictionary and matcher
 */

use anyhow::Result;
use std::sync::Arc;

use hybrid_translator::errors::TerminologyError;
use hybrid_translator::language::{Language, LanguagePair};
use hybrid_translator::terminology::{TerminologyDictionary, TerminologyMatcher};

use crate::common;

#[test]
fn test_load_withSampleFile_shouldReadBothSections() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "terminology_dict.json", common::SAMPLE_DICTIONARY)?;

    let dictionary = TerminologyDictionary::load(&path)?;

    assert_eq!(dictionary.term_count(), 7);
    assert_eq!(dictionary.common_mistakes(Language::English).len(), 2);
    assert_eq!(dictionary.common_mistakes(Language::German).len(), 1);
    assert!(dictionary.common_mistakes(Language::Turkish).is_empty());
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnEmptyDictionary() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;

    let dictionary = TerminologyDictionary::load(temp_dir.path().join("missing.json"))?;

    assert!(dictionary.is_empty());
    Ok(())
}

#[test]
fn test_load_withMalformedFile_shouldFailWithParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let result = TerminologyDictionary::load(&path);

    assert!(matches!(result, Err(TerminologyError::Parse { .. })));
    Ok(())
}

#[test]
fn test_common_mistakes_shouldKeepFileOrder() {
    let dictionary = common::sample_dictionary();
    let correct: Vec<&str> = dictionary
        .common_mistakes(Language::English)
        .iter()
        .map(|m| m.correct.as_str())
        .collect();
    assert_eq!(correct, vec!["Login", "Dealers"]);
}

#[test]
fn test_translate_with_terminology_withWholeStringMatch_shouldReturnTerm() {
    let matcher = TerminologyMatcher::new(common::sample_dictionary());

    let (text, used) = matcher.translate_with_terminology("Döviz Kurları", Language::Turkish, Language::English);

    assert_eq!(text, "Exchange Rates");
    assert!(used);
}

#[test]
fn test_translate_with_terminology_withWordMatch_shouldReplaceToken() {
    let matcher = TerminologyMatcher::new(common::sample_dictionary());

    let (text, used) = matcher.translate_with_terminology("Lütfen çıkış yapın", Language::Turkish, Language::English);

    assert!(text.contains("Logout"));
    assert_eq!(text, "Lütfen Logout yapın");
    assert!(used);
}

#[test]
fn test_translate_with_terminology_withNoMatch_shouldReturnInput() {
    let matcher = TerminologyMatcher::new(common::sample_dictionary());

    let (text, used) = matcher.translate_with_terminology("Ayarlar  sayfası", Language::Turkish, Language::English);

    assert_eq!(text, "Ayarlar  sayfası");
    assert!(!used);
}

#[test]
fn test_translate_with_terminology_withUnsupportedPair_shouldMiss() {
    let matcher = TerminologyMatcher::new(common::sample_dictionary());

    let (text, used) = matcher.translate_with_terminology("giriş", Language::Turkish, Language::German);

    assert_eq!(text, "giriş");
    assert!(!used);
    assert!(matcher.lookup("login", Language::German, Language::English).is_none());
}

#[test]
fn test_lookup_shouldIgnoreCase() {
    let dictionary = TerminologyDictionary::empty().with_term(LanguagePair::ENGLISH_TO_GERMAN, "Dealers", "Händler");
    let matcher = TerminologyMatcher::new(Arc::new(dictionary));

    assert_eq!(matcher.lookup("DEALERS", Language::English, Language::German), Some("Händler"));
}
