/*!
 * Tests for application configuration
 */

use anyhow::Result;
use std::path::PathBuf;

use hybrid_translator::app_config::{Config, LogLevel};
use hybrid_translator::language::LanguagePair;

use crate::common;

#[test]
fn test_load_or_create_withExistingFile_shouldKeepOverrides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "input_dir": "sources",
            "terminology_first": true,
            "log_level": "warn",
            "translation": {
                "english_to_german": { "model": "mistral:7b", "endpoint": "http://10.0.0.2:11434" }
            }
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.input_dir, PathBuf::from("sources"));
    assert_eq!(config.english_output_dir, PathBuf::from("en_jsons_hybrid"));
    assert!(config.terminology_first);
    assert_eq!(config.log_level, LogLevel::Warn);

    let stage = config.translation.stage(LanguagePair::ENGLISH_TO_GERMAN).unwrap();
    assert_eq!(stage.model, "mistral:7b");
    assert_eq!(config.translation.endpoint_for(stage), "http://10.0.0.2:11434");
    assert_eq!(config.translation.turkish_to_english.model, "llama3.2:3b");
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ \"input_dir\": ")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_load_or_create_withMissingFile_shouldRoundTripDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    let reloaded = Config::load_or_create(&path)?;

    assert_eq!(created.input_dir, reloaded.input_dir);
    assert_eq!(created.translation.common.system_prompt, reloaded.translation.common.system_prompt);
    assert!(reloaded.write_review_report);
    Ok(())
}

#[test]
fn test_log_level_shouldMapToFilter() {
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}

#[test]
fn test_validate_withOutputResolvingToInputDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    std::fs::create_dir_all(&config.input_dir)?;
    std::fs::create_dir_all(temp_dir.path().join("other"))?;
    assert!(config.validate().is_ok());

    config.english_output_dir = temp_dir.path().join("other").join("..").join("tr_jsons_hybrid");
    assert!(config.validate().is_err());
    Ok(())
}
