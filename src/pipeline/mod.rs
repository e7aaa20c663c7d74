/*!
 * Batch orchestration of the Turkish → English → German chain.
 *
 * - `orchestrator`: directory scan, per-file two-stage translation, output
 *   and review report writing
 */

pub mod orchestrator;

pub use orchestrator::{FileOutcome, Pipeline, ReviewReport, RunSummary};
