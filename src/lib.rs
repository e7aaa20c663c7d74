/*!
 * # Hybrid Translator
 *
 * A Rust library for translating JSON UI documents along the
 * Turkish → English → German chain with a terminology safety net.
 *
 * ## Features
 *
 * - Structure-preserving translation: keys, nesting, non-string values and
 *   HTML tags are kept as-is; only text reaches the model
 * - Pluggable translation backends (Ollama, closures, test mocks)
 * - Terminology dictionary with exact and word-level lookups
 * - Correction of known model mistakes and sentence capitalization
 * - Rubric-based quality scoring with review reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `language`: The languages and pairs of the chain
 * - `terminology`: Dictionary loading and term lookups
 * - `quality`: Scoring of translated strings
 * - `postprocess`: Correction of raw model output
 * - `providers`: The `Translator` boundary and its implementations
 * - `translation`: Markup splitting and JSON tree translation
 * - `pipeline`: Directory-level orchestration of both stages
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod language;
pub mod pipeline;
pub mod postprocess;
pub mod providers;
pub mod quality;
pub mod terminology;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TerminologyError, TranslationError};
pub use language::{Language, LanguagePair};
pub use pipeline::{Pipeline, RunSummary};
pub use postprocess::{Corrector, TranslationRecord};
pub use providers::Translator;
pub use quality::{QualityResult, QualityScorer};
pub use terminology::{TerminologyDictionary, TerminologyMatcher};
pub use translation::{TranslationDriver, TranslationStats};
