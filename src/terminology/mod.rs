/*!
 * Terminology support for domain-specific translations.
 *
 * - `store`: loading of the terminology dictionary file
 * - `matcher`: exact and word-level term lookups per language pair
 */

pub mod matcher;
pub mod store;

pub use matcher::TerminologyMatcher;
pub use store::{CommonMistake, TerminologyDictionary};
