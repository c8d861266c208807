//! Coarse document-family classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::Line;

/// Document family driving which heuristic rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    /// One known request-for-proposal document with bespoke rules
    RfpFixture,
    Form,
    Invitation,
    Academic,
    Rfp,
    Pathway,
    #[default]
    General,
}

/// Keyword signatures in priority order; the first genre with any keyword
/// present in the lowercase document text wins.
const GENRE_SIGNATURES: &[(Genre, &[&str])] = &[
    (
        Genre::RfpFixture,
        &["request for proposal", "ontario digital library", "rfp:"],
    ),
    (
        Genre::Form,
        &[
            "application form",
            "signature",
            "date of birth",
            "designation",
            "name of the government",
        ],
    ),
    (
        Genre::Invitation,
        &["you're invited", "party", "hope to see you", "trampoline park"],
    ),
    (
        Genre::Academic,
        &[
            "foundation level",
            "syllabus",
            "qualifications",
            "learning objectives",
        ],
    ),
    (Genre::Rfp, &["business plan", "appendix"]),
    (
        Genre::Pathway,
        &["pathway", "stem", "regular pathway", "distinction pathway"],
    ),
];

impl Genre {
    /// All genres, in detection priority order.
    pub const ALL: [Genre; 7] = [
        Genre::RfpFixture,
        Genre::Form,
        Genre::Invitation,
        Genre::Academic,
        Genre::Rfp,
        Genre::Pathway,
        Genre::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::RfpFixture => "rfp_fixture",
            Genre::Form => "form",
            Genre::Invitation => "invitation",
            Genre::Academic => "academic",
            Genre::Rfp => "rfp",
            Genre::Pathway => "pathway",
            Genre::General => "general",
        }
    }

    /// Classify a document from the text of its lines.
    pub fn detect(lines: &[Line]) -> Genre {
        let combined = lines
            .iter()
            .map(|l| l.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Self::detect_text(&combined)
    }

    /// Classify already-lowercased document text.
    pub fn detect_text(lowercase_text: &str) -> Genre {
        GENRE_SIGNATURES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowercase_text.contains(k)))
            .map(|(genre, _)| *genre)
            .unwrap_or(Genre::General)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
