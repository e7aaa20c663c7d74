/*!
 * Splitting of strings into markup and translatable spans.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Marks the start of a tag; strings without it need no splitting
pub const MARKUP_DELIMITER: char = '<';

static TAG_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// A span of a leaf string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Markup copied to the output verbatim
    Tag(&'a str),
    /// Text handed to the translator
    Text(&'a str),
}

pub fn contains_markup(text: &str) -> bool {
    text.contains(MARKUP_DELIMITER)
}

/// Split `text` into alternating tag and text spans, in order
///
/// Zero-length spans are not emitted. Concatenating the spans gives back
/// the input.
pub fn split_markup(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for tag in TAG_SPAN_REGEX.find_iter(text) {
        if tag.start() > last {
            segments.push(Segment::Text(&text[last..tag.start()]));
        }
        segments.push(Segment::Tag(tag.as_str()));
        last = tag.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}
