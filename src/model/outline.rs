//! Outline result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title used when a document yields no usable lines.
pub const EMPTY_DOCUMENT_TITLE: &str = "Empty Document";

/// Title used when the text source fails.
pub const ERROR_TITLE: &str = "Error Processing Document";

/// Depth tag of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }

    /// Numeric depth, 1 for `H1`.
    pub fn depth(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page number (0-indexed)
    pub page: u32,
}

impl Heading {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered headings for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    pub title: String,
    pub outline: Vec<Heading>,
    /// Failure message when the source could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Source path, present only alongside `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl OutlineResult {
    pub fn new(title: impl Into<String>, outline: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            outline,
            error: None,
            file: None,
        }
    }

    /// Result for a document without usable text.
    pub fn empty() -> Self {
        Self::new(EMPTY_DOCUMENT_TITLE, Vec::new())
    }

    /// Result recording a failed extraction.
    pub fn failed(error: impl fmt::Display, file: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            outline: Vec::new(),
            error: Some(error.to_string()),
            file: Some(file.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }
}
