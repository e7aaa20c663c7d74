/*!
 * Structure-preserving translation.
 *
 * - `segments`: splitting strings into markup and text spans
 * - `driver`: leaf and JSON tree translation with post-processing
 */

pub mod driver;
pub mod segments;

pub use self::driver::{ReviewFlag, TranslationDriver, TranslationStats};
pub use self::segments::{Segment, contains_markup, split_markup};
