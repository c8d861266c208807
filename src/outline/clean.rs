//! Heading and title text cleanup.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static TOC_LEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\.{2,}.*$").expect("leader regex"));
static TRAILING_PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s+\d+)+\s*$").expect("page number regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Typographic punctuation folded to ASCII.
const PUNCTUATION_MAP: &[(char, &str)] = &[
    ('\u{2018}', "'"),    // ‘
    ('\u{2019}', "'"),    // ’
    ('\u{201C}', "\""),   // “
    ('\u{201D}', "\""),   // ”
    ('\u{2026}', "..."),  // …
    ('\u{00A0}', " "),    // no-break space
];

/// Cleaning may shrink text to no less than this fraction of the original.
const MIN_KEPT_RATIO: f32 = 0.4;

/// Clean a heading or title for output.
///
/// Folds typographic punctuation, strips table-of-contents leaders and
/// trailing page numbers, and collapses whitespace. When that removes more
/// than 60% of the text the trimmed original is kept instead. The result
/// always ends with exactly one space.
pub fn clean_heading_text(text: &str) -> String {
    let original = text.trim();

    let mut folded = String::with_capacity(original.len());
    for c in original.nfc() {
        match PUNCTUATION_MAP.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => folded.push_str(to),
            None => folded.push(c),
        }
    }

    let cleaned = TOC_LEADER.replace(&folded, "");
    let cleaned = TRAILING_PAGE_NUMBER.replace(cleaned.trim(), "");
    let cleaned = WHITESPACE.replace_all(cleaned.trim(), " ");
    let mut cleaned = cleaned.trim().to_string();

    if (cleaned.chars().count() as f32) < original.chars().count() as f32 * MIN_KEPT_RATIO {
        cleaned = original.to_string();
    }

    cleaned.push(' ');
    cleaned
}

/// Collapse runs of whitespace to single spaces without trimming.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Check if the text has letters and every letter is uppercase.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// Check if the text has cased letters and none of them is lowercase.
pub fn is_upper_cased(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase()) && !text.chars().any(|c| c.is_lowercase())
}

/// Length in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
