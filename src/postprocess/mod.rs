/*!
 * Post-processing of raw translations.
 *
 * - `corrector`: ordered correction stages and scoring of the result
 * - `fixes`: the hardcoded per-pair correction table
 */

pub mod corrector;
pub mod fixes;

pub use corrector::{Corrector, TranslationRecord, normalize_capitalization};
pub use fixes::{CommonFix, apply_terminology_fixes, fixes_for};
