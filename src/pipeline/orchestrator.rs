/*!
 * Pipeline orchestrator for the two-stage translation chain.
 *
 * Every `*.json` file directly inside the input directory goes through:
 * 1. Turkish → English, written to the English output directory
 * 2. English → German on the English tree, written to the German output directory
 *
 * A file that fails to parse or translate is logged and skipped; the run
 * continues with the next file.
 */

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language::LanguagePair;
use crate::providers::{OllamaTranslator, Translator};
use crate::terminology::TerminologyDictionary;
use crate::translation::{ReviewFlag, TranslationDriver, TranslationStats};

/// Review report written next to an output document
#[derive(Debug, Serialize)]
pub struct ReviewReport<'a> {
    pub source_file: String,
    pub language_pair: String,
    pub leaves: usize,
    pub flagged: &'a [ReviewFlag],
}

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Both stages written
    Translated {
        english: TranslationStats,
        german: TranslationStats,
    },
    /// German output already present and `skip_existing` is on
    Skipped,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// String leaves translated over both stages
    pub leaves: usize,
    pub improved: usize,
    pub flagged: usize,
    pub duration: Duration,
}

impl RunSummary {
    fn add_stats(&mut self, stats: &TranslationStats) {
        self.leaves += stats.leaves;
        self.improved += stats.improved;
        self.flagged += stats.flagged.len();
    }
}

/// Main orchestrator for document translation
pub struct Pipeline {
    // @field: App configuration
    config: Config,
    driver: TranslationDriver,
    // @field: Turkish → English stage
    turkish_to_english: Arc<dyn Translator>,
    // @field: English → German stage
    english_to_german: Arc<dyn Translator>,
    // @field: Keep documents whose German output exists
    skip_existing: bool,
    show_progress: bool,
}

impl Pipeline {
    /// Create a pipeline from explicit parts
    ///
    /// The translators must be bound to Turkish → English and English → German.
    pub fn new(
        config: Config,
        dictionary: Arc<TerminologyDictionary>,
        turkish_to_english: Arc<dyn Translator>,
        english_to_german: Arc<dyn Translator>,
    ) -> Result<Self, AppError> {
        for (translator, expected) in [
            (&turkish_to_english, LanguagePair::TURKISH_TO_ENGLISH),
            (&english_to_german, LanguagePair::ENGLISH_TO_GERMAN),
        ] {
            if translator.pair() != expected {
                return Err(AppError::Config(format!(
                    "Translator for {} is bound to {}",
                    expected,
                    translator.pair()
                )));
            }
        }

        let driver = TranslationDriver::new(dictionary).with_terminology_first(config.terminology_first);

        Ok(Self {
            config,
            driver,
            turkish_to_english,
            english_to_german,
            skip_existing: false,
            show_progress: true,
        })
    }

    /// Create a pipeline backed by Ollama, loading the dictionary from the configured file
    pub fn from_config(config: Config) -> Result<Self> {
        let dictionary = TerminologyDictionary::load(&config.terminology_file)?;

        let turkish_to_english = OllamaTranslator::from_config(&config.translation, LanguagePair::TURKISH_TO_ENGLISH)
            .context("Failed to create Turkish → English translator")?;
        let english_to_german = OllamaTranslator::from_config(&config.translation, LanguagePair::ENGLISH_TO_GERMAN)
            .context("Failed to create English → German translator")?;

        Ok(Self::new(
            config,
            Arc::new(dictionary),
            Arc::new(turkish_to_english),
            Arc::new(english_to_german),
        )?)
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check both backends; failures are only reported
    pub async fn check_backends(&self) -> bool {
        let mut reachable = true;
        for translator in [&self.turkish_to_english, &self.english_to_german] {
            if let Err(e) = translator.test_connection().await {
                warn!("Backend for {} is not reachable: {}", translator.pair(), e);
                reachable = false;
            }
        }
        reachable
    }

    /// Translate every input document
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();
        let input_dir = &self.config.input_dir;

        if !FileManager::dir_exists(input_dir) {
            warn!("Input directory does not exist: {}", input_dir.display());
            return Ok(summary);
        }

        let files = FileManager::find_files(input_dir, "json")
            .with_context(|| format!("Failed to scan input directory: {}", input_dir.display()))?;
        if files.is_empty() {
            warn!("No JSON files found in {}", input_dir.display());
            return Ok(summary);
        }

        FileManager::ensure_dir(&self.config.english_output_dir)?;
        FileManager::ensure_dir(&self.config.german_output_dir)?;

        info!("Found {} file(s) to translate", files.len());
        let progress = self.progress_bar(files.len() as u64);

        for file in &files {
            let file_name = display_name(file);
            progress.set_message(format!("Processing: {}", file_name));

            match self.process_file(file).await {
                Ok(FileOutcome::Translated { english, german }) => {
                    summary.processed += 1;
                    summary.add_stats(&english);
                    summary.add_stats(&german);
                    info!("Translated {}", file_name);
                }
                Ok(FileOutcome::Skipped) => {
                    summary.skipped += 1;
                    info!("Skipping {}, translation already exists", file_name);
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Error processing file {}: {}", file_name, e);
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        summary.duration = start_time.elapsed();

        info!(
            "Done in {}: {} processed, {} skipped, {} failed - {} strings, {} corrected, {} need review",
            format_duration(summary.duration),
            summary.processed,
            summary.skipped,
            summary.failed,
            summary.leaves,
            summary.improved,
            summary.flagged
        );

        Ok(summary)
    }

    /// Translate one document through both stages and write the outputs
    pub async fn process_file(&self, input_file: &Path) -> Result<FileOutcome, AppError> {
        let (english_path, german_path) = output_paths(&self.config, input_file)?;

        if self.skip_existing && german_path.exists() {
            return Ok(FileOutcome::Skipped);
        }

        let content = FileManager::read_to_string(input_file).map_err(|e| AppError::File(format!("{:#}", e)))?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| AppError::File(format!("Invalid JSON in {}: {}", input_file.display(), e)))?;

        debug!("{}: {}", LanguagePair::TURKISH_TO_ENGLISH, input_file.display());
        let (english, english_stats) = self
            .driver
            .translate_document(&document, self.turkish_to_english.as_ref())
            .await?;
        self.write_stage(input_file, &english_path, &english, &english_stats, LanguagePair::TURKISH_TO_ENGLISH)?;

        debug!("{}: {}", LanguagePair::ENGLISH_TO_GERMAN, english_path.display());
        let (german, german_stats) = self
            .driver
            .translate_document(&english, self.english_to_german.as_ref())
            .await?;
        self.write_stage(input_file, &german_path, &german, &german_stats, LanguagePair::ENGLISH_TO_GERMAN)?;

        Ok(FileOutcome::Translated {
            english: english_stats,
            german: german_stats,
        })
    }

    fn write_stage(
        &self,
        input_file: &Path,
        output_path: &Path,
        document: &Value,
        stats: &TranslationStats,
        pair: LanguagePair,
    ) -> Result<(), AppError> {
        FileManager::write_json_pretty(output_path, document).map_err(|e| AppError::File(format!("{:#}", e)))?;

        if self.config.write_review_report && !stats.flagged.is_empty() {
            let output_dir = output_path.parent().unwrap_or_else(|| Path::new("."));
            let report_path = FileManager::generate_output_path(output_path, output_dir, Some("review"), "json");
            let report = ReviewReport {
                source_file: input_file.display().to_string(),
                language_pair: pair.to_string(),
                leaves: stats.leaves,
                flagged: &stats.flagged,
            };
            FileManager::write_json_pretty(&report_path, &report).map_err(|e| AppError::File(format!("{:#}", e)))?;
            info!(
                "{} string(s) need review for {}, see {}",
                stats.flagged.len(),
                pair,
                report_path.display()
            );
        }

        Ok(())
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));
        progress
    }
}

/// Resolve the output paths a given input file maps to
pub fn output_paths(config: &Config, input_file: &Path) -> Result<(PathBuf, PathBuf)> {
    if input_file.file_stem().is_none() {
        return Err(anyhow!("Input path has no file name: {}", input_file.display()));
    }
    Ok((
        FileManager::generate_output_path(input_file, &config.english_output_dir, None, "json"),
        FileManager::generate_output_path(input_file, &config.german_output_dir, None, "json"),
    ))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Format duration in a human-readable format
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
