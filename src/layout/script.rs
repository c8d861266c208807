//! Coarse writing-system detection.
//!
//! Characters are bucketed through a static Unicode range table; a text's
//! script is the plurality bucket over its scorable characters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Writing-system bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Arabic,
    Chinese,
    Japanese,
    Korean,
    Cyrillic,
    Greek,
    Hebrew,
    Devanagari,
    Thai,
    Myanmar,
    /// Assigned character outside the named scripts (symbols, dashes, ...)
    Other,
    /// Control, private-use or otherwise unscorable text
    Unknown,
}

impl Script {
    /// Lowercase label, e.g. `"latin"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Arabic => "arabic",
            Script::Chinese => "chinese",
            Script::Japanese => "japanese",
            Script::Korean => "korean",
            Script::Cyrillic => "cyrillic",
            Script::Greek => "greek",
            Script::Hebrew => "hebrew",
            Script::Devanagari => "devanagari",
            Script::Thai => "thai",
            Script::Myanmar => "myanmar",
            Script::Other => "other",
            Script::Unknown => "unknown",
        }
    }

    /// Bucket a single character.
    pub fn of(c: char) -> Script {
        let code = c as u32;
        if c.is_control() || (0xE000..=0xF8FF).contains(&code) {
            return Script::Unknown;
        }
        match SCRIPT_RANGES.binary_search_by(|&(lo, hi, _)| {
            if hi < code {
                std::cmp::Ordering::Less
            } else if lo > code {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        }) {
            Ok(idx) => SCRIPT_RANGES[idx].2,
            Err(_) => Script::Other,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive code point ranges, sorted by start and non-overlapping.
const SCRIPT_RANGES: &[(u32, u32, Script)] = &[
    (0x0041, 0x005A, Script::Latin),
    (0x0061, 0x007A, Script::Latin),
    (0x00AA, 0x00AA, Script::Latin),
    (0x00BA, 0x00BA, Script::Latin),
    (0x00C0, 0x00D6, Script::Latin),
    (0x00D8, 0x00F6, Script::Latin),
    (0x00F8, 0x02AF, Script::Latin),
    (0x0370, 0x03FF, Script::Greek),
    (0x0400, 0x052F, Script::Cyrillic),
    (0x0590, 0x05FF, Script::Hebrew),
    (0x0600, 0x06FF, Script::Arabic),
    (0x0750, 0x077F, Script::Arabic),
    (0x08A0, 0x08FF, Script::Arabic),
    (0x0900, 0x097F, Script::Devanagari),
    (0x0E00, 0x0E7F, Script::Thai),
    (0x1000, 0x109F, Script::Myanmar),
    (0x1100, 0x11FF, Script::Korean),
    (0x1C80, 0x1C8F, Script::Cyrillic),
    (0x1E00, 0x1EFF, Script::Latin),
    (0x1F00, 0x1FFF, Script::Greek),
    (0x2C60, 0x2C7F, Script::Latin),
    (0x2DE0, 0x2DFF, Script::Cyrillic),
    (0x3040, 0x30FF, Script::Japanese),
    (0x3100, 0x312F, Script::Chinese),
    (0x3130, 0x318F, Script::Korean),
    (0x31F0, 0x31FF, Script::Japanese),
    (0x3400, 0x4DBF, Script::Chinese),
    (0x4E00, 0x9FFF, Script::Chinese),
    (0xA640, 0xA69F, Script::Cyrillic),
    (0xA720, 0xA7FF, Script::Latin),
    (0xA8E0, 0xA8FF, Script::Devanagari),
    (0xA960, 0xA97F, Script::Korean),
    (0xA9E0, 0xA9FF, Script::Myanmar),
    (0xAA60, 0xAA7F, Script::Myanmar),
    (0xAC00, 0xD7FF, Script::Korean),
    (0xF900, 0xFAFF, Script::Chinese),
    (0xFB00, 0xFB06, Script::Latin),
    (0xFB1D, 0xFB4F, Script::Hebrew),
    (0xFB50, 0xFDFF, Script::Arabic),
    (0xFE70, 0xFEFF, Script::Arabic),
    (0xFF21, 0xFF3A, Script::Latin),
    (0xFF41, 0xFF5A, Script::Latin),
    (0xFF66, 0xFF9F, Script::Japanese),
    (0x20000, 0x2FA1F, Script::Chinese),
];

/// Punctuation ignored when scoring scripts.
const IGNORED_PUNCTUATION: &str = ".,;:!?()[]{}";

/// Detect the plurality script of `text`.
///
/// Whitespace, digits and common punctuation are not scored. Ties go to the
/// script seen first. Text with nothing scorable is [`Script::Unknown`].
pub fn detect_script(text: &str) -> Script {
    let mut counts: Vec<(Script, usize)> = Vec::new();

    for c in text.chars() {
        if c.is_whitespace() || c.is_numeric() || IGNORED_PUNCTUATION.contains(c) {
            continue;
        }
        let script = Script::of(c);
        match counts.iter_mut().find(|(s, _)| *s == script) {
            Some((_, n)) => *n += 1,
            None => counts.push((script, 1)),
        }
    }

    let mut best: Option<(Script, usize)> = None;
    for (script, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((script, n));
        }
    }
    best.map(|(s, _)| s).unwrap_or(Script::Unknown)
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub fn is_spaceless_script_char(c: char) -> bool {
    matches!(Script::of(c), Script::Chinese | Script::Japanese)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&(c as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_sorted() {
        for pair in SCRIPT_RANGES.windows(2) {
            assert!(pair[0].1 < pair[1].0, "{:x?} overlaps {:x?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_script_of() {
        assert_eq!(Script::of('a'), Script::Latin);
        assert_eq!(Script::of('\u{e9}'), Script::Latin);
        assert_eq!(Script::of('\u{3b1}'), Script::Greek);
        assert_eq!(Script::of('\u{416}'), Script::Cyrillic);
        assert_eq!(Script::of('\u{5d0}'), Script::Hebrew);
        assert_eq!(Script::of('\u{628}'), Script::Arabic);
        assert_eq!(Script::of('\u{915}'), Script::Devanagari);
        assert_eq!(Script::of('\u{e01}'), Script::Thai);
        assert_eq!(Script::of('\u{1000}'), Script::Myanmar);
        assert_eq!(Script::of('\u{4e2d}'), Script::Chinese);
        assert_eq!(Script::of('\u{3042}'), Script::Japanese);
        assert_eq!(Script::of('\u{d55c}'), Script::Korean);
        assert_eq!(Script::of('-'), Script::Other);
        assert_eq!(Script::of('\u{7}'), Script::Unknown);
    }

    #[test]
    fn test_detect_script_plurality() {
        assert_eq!(detect_script("Hello, world!"), Script::Latin);
        assert_eq!(detect_script("\u{41f}\u{440}\u{438}\u{432}\u{435}\u{442} ok"), Script::Cyrillic);
        assert_eq!(detect_script("\u{65e5}\u{672c}\u{8a9e}"), Script::Chinese);
    }

    #[test]
    fn test_detect_script_ignores_digits_and_punctuation() {
        assert_eq!(detect_script("12.5 (3)"), Script::Unknown);
        assert_eq!(detect_script(""), Script::Unknown);
        assert_eq!(detect_script("   "), Script::Unknown);
    }

    #[test]
    fn test_detect_script_tie_goes_to_first_seen() {
        assert_eq!(detect_script("ab\u{3b1}\u{3b2}"), Script::Latin);
        assert_eq!(detect_script("\u{3b1}\u{3b2}ab"), Script::Greek);
    }

    #[test]
    fn test_spaceless_chars() {
        assert!(is_spaceless_script_char('\u{4e2d}'));
        assert!(is_spaceless_script_char('\u{3042}'));
        assert!(!is_spaceless_script_char('\u{d55c}'));
        assert!(!is_spaceless_script_char('a'));
    }
}
