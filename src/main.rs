// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use hybrid_translator::app_config::{Config, LogLevel};
use hybrid_translator::pipeline::Pipeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for hybrid-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Hybrid JSON translator: Turkish → English → German
///
/// Translates every JSON document of the input directory, keeping its
/// structure and markup, and corrects the output with a terminology dictionary.
#[derive(Parser, Debug)]
#[command(name = "hybrid-translator")]
#[command(version)]
#[command(about = "Structure-preserving Turkish → English → German JSON translator")]
#[command(long_about = "Translates the string values of JSON documents from Turkish to English and
then from English to German, keeping keys, nesting and HTML tags intact.
Model output is corrected with a terminology dictionary and scored; strings
scoring below 70 are listed in <name>.review.json reports.

EXAMPLES:
    hybrid-translator                                  # Translate using conf.json
    hybrid-translator -s                               # Keep documents translated earlier
    hybrid-translator -b /srv/i18n                     # Resolve relative paths against /srv/i18n
    hybrid-translator --tr-en-model aya:8b             # Override the Turkish → English model
    hybrid-translator completions bash > ht.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base directory for relative paths in the configuration
    #[arg(short, long, env = "HYBRID_TRANSLATOR_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Directory with the Turkish source documents
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for English output documents
    #[arg(long)]
    english_dir: Option<PathBuf>,

    /// Directory for German output documents
    #[arg(long)]
    german_dir: Option<PathBuf>,

    /// Terminology dictionary file
    #[arg(short, long)]
    terminology_file: Option<PathBuf>,

    /// Model for the Turkish → English stage
    #[arg(long)]
    tr_en_model: Option<String>,

    /// Model for the English → German stage
    #[arg(long)]
    en_de_model: Option<String>,

    /// Skip documents whose German output already exists
    #[arg(short, long)]
    skip_existing: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl CommandLineOptions {
    /// Apply command line overrides on top of the loaded configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.english_dir {
            config.english_output_dir = dir.clone();
        }
        if let Some(dir) = &self.german_dir {
            config.german_output_dir = dir.clone();
        }
        if let Some(file) = &self.terminology_file {
            config.terminology_file = file.clone();
        }
        if let Some(model) = &self.tr_en_model {
            config.translation.turkish_to_english.model = model.clone();
        }
        if let Some(model) = &self.en_de_model {
            config.translation.english_to_german.model = model.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone().into();
        }
    }
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger starts at trace; the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "hybrid-translator", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(log_level) = &cli.log_level {
        log::set_max_level(LogLevel::from(log_level.clone()).to_level_filter());
    }

    tokio::select! {
        result = run_translate(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping. Files written so far are kept.");
            Ok(())
        }
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    let base_dir = match &options.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let config_path = if options.config_path.is_relative() {
        base_dir.join(&options.config_path)
    } else {
        options.config_path.clone()
    };

    let mut config = Config::load_or_create(&config_path)?;
    options.apply_to(&mut config);
    let config = config.with_base_dir(&base_dir);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    info!(
        "🚀 {} ({}) → {} ({})",
        config.input_dir.display(),
        config.translation.turkish_to_english.model,
        config.german_output_dir.display(),
        config.translation.english_to_german.model
    );

    let pipeline = Pipeline::from_config(config)?.with_skip_existing(options.skip_existing);
    pipeline.check_backends().await;

    let summary = pipeline.run().await?;
    if summary.failed > 0 {
        warn!("{} file(s) could not be translated", summary.failed);
    }

    Ok(())
}
