/*!
 * Quality assurance for translated strings.
 *
 * - `scorer`: rubric-based scoring (common mistakes, empty or too short
 *   output, HTML tag consistency)
 */

pub mod scorer;

pub use scorer::{IssueKind, QualityIssue, QualityResult, QualityScorer, REVIEW_THRESHOLD};
