use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language::LanguagePair;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory scanned for Turkish source documents
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving English translations
    #[serde(default = "default_english_output_dir")]
    pub english_output_dir: PathBuf,

    /// Directory receiving German translations
    #[serde(default = "default_german_output_dir")]
    pub german_output_dir: PathBuf,

    /// Terminology dictionary file
    #[serde(default = "default_terminology_file")]
    pub terminology_file: PathBuf,

    /// Use a whole-string dictionary hit instead of calling the model
    #[serde(default)]
    pub terminology_first: bool,

    /// Write a `<name>.review.json` report next to each output
    #[serde(default = "default_true")]
    pub write_review_report: bool,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend configuration (Ollama server)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Turkish → English stage
    #[serde(default = "default_turkish_to_english_stage")]
    pub turkish_to_english: StageConfig,

    /// English → German stage
    #[serde(default = "default_english_to_german_stage")]
    pub english_to_german: StageConfig,

    /// Settings shared by both stages
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Model binding for one stage of the chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StageConfig {
    // @field: Model name
    pub model: String,

    // @field: Endpoint override, empty to use the shared endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,
}

/// Common translation settings applicable to both stages
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for translation
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            turkish_to_english: default_turkish_to_english_stage(),
            english_to_german: default_english_to_german_stage(),
            common: TranslationCommonConfig::default(),
        }
    }
}

impl TranslationConfig {
    /// Stage config for a pair of the chain
    pub fn stage(&self, pair: LanguagePair) -> Option<&StageConfig> {
        if pair == LanguagePair::TURKISH_TO_ENGLISH {
            Some(&self.turkish_to_english)
        } else if pair == LanguagePair::ENGLISH_TO_GERMAN {
            Some(&self.english_to_german)
        } else {
            None
        }
    }

    /// Endpoint for a stage, falling back to the shared endpoint
    pub fn endpoint_for(&self, stage: &StageConfig) -> String {
        if stage.endpoint.is_empty() {
            self.endpoint.clone()
        } else {
            stage.endpoint.clone()
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("tr_jsons_hybrid")
}

fn default_english_output_dir() -> PathBuf {
    PathBuf::from("en_jsons_hybrid")
}

fn default_german_output_dir() -> PathBuf {
    PathBuf::from("de_jsons_hybrid")
}

fn default_terminology_file() -> PathBuf {
    PathBuf::from("terminology_dict.json")
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_turkish_to_english_stage() -> StageConfig {
    StageConfig {
        model: "llama3.2:3b".to_string(),
        endpoint: String::new(),
    }
}

fn default_english_to_german_stage() -> StageConfig {
    StageConfig {
        model: "llama3.2:3b".to_string(),
        endpoint: String::new(),
    }
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_temperature() -> f32 {
    0.1
}

fn default_system_prompt() -> String {
    "You are a professional translator for admin panel user interfaces. Translate the user's text from {source_language} to {target_language}. Reply with the translation only, without quotes or explanations.".to_string()
}

impl Config {
    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve relative directories and files against `base`
    pub fn with_base_dir<P: AsRef<Path>>(mut self, base: P) -> Self {
        let base = base.as_ref();
        for path in [
            &mut self.input_dir,
            &mut self.english_output_dir,
            &mut self.german_output_dir,
            &mut self.terminology_file,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("input_dir", &self.input_dir),
            ("english_output_dir", &self.english_output_dir),
            ("german_output_dir", &self.german_output_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("{} must not be empty", name));
            }
        }

        if self.english_output_dir == self.german_output_dir {
            return Err(anyhow!("English and German output directories must differ"));
        }

        for (name, path) in [
            ("english_output_dir", &self.english_output_dir),
            ("german_output_dir", &self.german_output_dir),
        ] {
            if same_dir(path, &self.input_dir) {
                return Err(anyhow!("{} must differ from input_dir: {}", name, path.display()));
            }
        }

        let translation = &self.translation;
        for (name, stage) in [
            ("turkish_to_english", &translation.turkish_to_english),
            ("english_to_german", &translation.english_to_german),
        ] {
            if stage.model.trim().is_empty() {
                return Err(anyhow!("A model is required for the {} stage", name));
            }
            let endpoint = translation.endpoint_for(stage);
            url::Url::parse(&endpoint)
                .with_context(|| format!("Invalid endpoint for the {} stage: {}", name, endpoint))?;
        }

        if !(0.0..=1.0).contains(&translation.common.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 1.0, got {}",
                translation.common.temperature
            ));
        }

        Ok(())
    }
}

/// Lexical match, or both paths resolve to the same existing directory
fn same_dir(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: default_input_dir(),
            english_output_dir: default_english_output_dir(),
            german_output_dir: default_german_output_dir(),
            terminology_file: default_terminology_file(),
            terminology_first: false,
            write_review_report: true,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
