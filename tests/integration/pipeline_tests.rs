/*!
 * End-to-end tests for directory processing.
 *
 * Documents go through both stages with mock translators; no network.
 */

use anyhow::Result;
use serde_json::json;
use std::fs;
use std::sync::Arc;

use hybrid_translator::app_config::Config;
use hybrid_translator::language::LanguagePair;
use hybrid_translator::pipeline::{FileOutcome, Pipeline};
use hybrid_translator::providers::MockTranslator;

use crate::common;

fn pipeline(config: Config, first: &MockTranslator, second: &MockTranslator) -> Pipeline {
    Pipeline::new(
        config,
        common::sample_dictionary(),
        Arc::new(first.clone()),
        Arc::new(second.clone()),
    )
    .expect("pairs match")
    .with_progress(false)
}

fn tagged_pair() -> (MockTranslator, MockTranslator) {
    (
        MockTranslator::tagged(LanguagePair::TURKISH_TO_ENGLISH),
        MockTranslator::tagged(LanguagePair::ENGLISH_TO_GERMAN),
    )
}

#[tokio::test]
async fn test_run_withTwoDocuments_shouldWriteBothLanguages() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "menu.json", r#"{"title": "Menü", "items": ["Giriş", 1]}"#)?;
    common::create_test_file(&config.input_dir, "about.json", r#"{"text": "<b>Hakkımızda</b>"}"#)?;
    common::create_test_file(&config.input_dir, "notes.txt", "ignored")?;

    let (first, second) = tagged_pair();
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.leaves, 6);

    let english = common::read_json(&config.english_output_dir.join("menu.json"))?;
    let german = common::read_json(&config.german_output_dir.join("menu.json"))?;
    assert_eq!(english, json!({"title": "[EN] Menü", "items": ["[EN] Giriş", 1]}));
    assert_eq!(german, json!({"title": "[DE] [EN] Menü", "items": ["[DE] [EN] Giriş", 1]}));

    let about = common::read_json(&config.german_output_dir.join("about.json"))?;
    assert_eq!(about, json!({"text": "<b>[DE] [EN] Hakkımızda</b>"}));

    // sorted order: about.json is translated first
    assert_eq!(first.requests(), vec!["Hakkımızda", "Menü", "Giriş"]);
    Ok(())
}

#[tokio::test]
async fn test_run_shouldWritePrettyUnicodeJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "x.json", r#"{"k":"Güncelle"}"#)?;

    let first = MockTranslator::table(LanguagePair::TURKISH_TO_ENGLISH, &[("Güncelle", "Update")]);
    let second = MockTranslator::table(LanguagePair::ENGLISH_TO_GERMAN, &[("Update", "Aktualisieren für Änderungen")]);
    pipeline(config.clone(), &first, &second).run().await?;

    let content = fs::read_to_string(config.german_output_dir.join("x.json"))?;
    assert_eq!(content, "{\n  \"k\": \"Aktualisieren für Änderungen\"\n}");
    Ok(())
}

#[tokio::test]
async fn test_run_withBrokenDocument_shouldSkipItAndContinue() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "a_broken.json", "{ \"title\": ")?;
    common::create_test_file(&config.input_dir, "b_ok.json", r#"{"title": "Başlık"}"#)?;

    let (first, second) = tagged_pair();
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert!(!config.english_output_dir.join("a_broken.json").exists());
    assert!(config.german_output_dir.join("b_ok.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withTranslatorFailure_shouldOnlyAbortThatFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "1.json", r#"["bir", "iki"]"#)?;
    common::create_test_file(&config.input_dir, "2.json", r#"["üç"]"#)?;

    // second request is "iki" in 1.json
    let first = MockTranslator::fail_on(LanguagePair::TURKISH_TO_ENGLISH, 2);
    let second = MockTranslator::echo(LanguagePair::ENGLISH_TO_GERMAN);
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert!(!config.german_output_dir.join("1.json").exists());
    assert_eq!(common::read_json(&config.german_output_dir.join("2.json"))?, json!(["Üç"]));
    Ok(())
}

#[tokio::test]
async fn test_run_withNoInputFiles_shouldExitCleanly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    fs::create_dir_all(&config.input_dir)?;

    let (first, second) = tagged_pair();
    let summary = pipeline(config, &first, &second).run().await?;

    assert_eq!(summary.processed + summary.skipped + summary.failed, 0);
    assert_eq!(first.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withExistingOutput_shouldOverwriteByDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    let input = common::create_test_file(&config.input_dir, "menu.json", r#"{"a": "Kaydet"}"#)?;
    common::create_test_file(&config.german_output_dir, "menu.json", r#"{"a": "old"}"#)?;

    let (first, second) = tagged_pair();
    let outcome = pipeline(config.clone(), &first, &second)
        .with_skip_existing(true)
        .process_file(&input)
        .await?;
    assert_eq!(outcome, FileOutcome::Skipped);
    assert_eq!(first.request_count(), 0);

    let summary = pipeline(config.clone(), &first, &second).run().await?;
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(
        common::read_json(&config.german_output_dir.join("menu.json"))?,
        json!({"a": "[DE] [EN] Kaydet"})
    );
    Ok(())
}

#[tokio::test]
async fn test_run_afterSourceEdit_shouldRetranslate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "menu.json", r#"{"a": "Kaydet"}"#)?;

    let (first, second) = tagged_pair();
    pipeline(config.clone(), &first, &second).run().await?;
    common::create_test_file(&config.input_dir, "menu.json", r#"{"a": "Sil"}"#)?;
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(common::read_json(&config.english_output_dir.join("menu.json"))?, json!({"a": "[EN] Sil"}));
    assert_eq!(common::read_json(&config.german_output_dir.join("menu.json"))?, json!({"a": "[DE] [EN] Sil"}));
    Ok(())
}

#[tokio::test]
async fn test_run_withLowScores_shouldWriteReviewReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_test_file(&config.input_dir, "menu.json", r#"{"items": {"first": "Uzun bir açıklama metni", "second": "Kaydet"}}"#)?;

    let first = MockTranslator::table(LanguagePair::TURKISH_TO_ENGLISH, &[("Uzun bir açıklama metni", ""), ("Kaydet", "Save")]);
    let second = MockTranslator::echo(LanguagePair::ENGLISH_TO_GERMAN);
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    // the empty English leaf stays empty in German as well
    assert_eq!(summary.flagged, 2);

    let report = common::read_json(&config.english_output_dir.join("menu.review.json"))?;
    assert_eq!(report["language_pair"], "Turkish -> English");
    assert_eq!(report["leaves"], 2);
    assert_eq!(report["flagged"][0]["path"], "/items/first");
    assert_eq!(report["flagged"][0]["score"], 0.0);
    assert_eq!(report["flagged"][0]["issues"][0]["type"], "empty_translation");

    assert!(config.german_output_dir.join("menu.review.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withReviewReportDisabled_shouldNotWriteReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.write_review_report = false;
    common::create_test_file(&config.input_dir, "menu.json", r#"["Uzun bir açıklama metni"]"#)?;

    let first = MockTranslator::empty(LanguagePair::TURKISH_TO_ENGLISH);
    let second = MockTranslator::echo(LanguagePair::ENGLISH_TO_GERMAN);
    let summary = pipeline(config.clone(), &first, &second).run().await?;

    assert_eq!(summary.flagged, 2);
    assert!(!config.english_output_dir.join("menu.review.json").exists());
    Ok(())
}
