//! Upstream text sources.
//!
//! A [`PageTextSource`] turns a document identifier into positioned, styled
//! text fragments grouped by page. Everything downstream of this module is
//! independent of the PDF library in use.

mod lopdf_source;
mod options;

pub use lopdf_source::LopdfSource;
pub use options::{ErrorMode, SourceOptions};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Axis-aligned bounding box in top-down page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// One styled run of text as emitted by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Text content, untrimmed
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Bold style flag
    pub bold: bool,
    /// Italic style flag
    pub italic: bool,
    /// Bounding box; `y0` grows downwards from the top of the page
    pub bbox: BBox,
}

impl RawFragment {
    /// Create a regular-weight fragment.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
            bold: false,
            italic: false,
            bbox,
        }
    }

    /// Mark the fragment as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the fragment as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// All fragments of one page, with the page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,
    pub width: f32,
    pub height: f32,
    pub fragments: Vec<RawFragment>,
}

impl RawPage {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            fragments: Vec::new(),
        }
    }

    /// Create an empty US Letter page (612 x 792 points).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: RawFragment) {
        self.fragments.push(fragment);
    }
}

/// Coarse document metadata reported by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub page_count: u32,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

/// Everything a source yields for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub info: DocumentInfo,
    pub pages: Vec<RawPage>,
}

impl SourceDocument {
    /// Build a document from pages, deriving the page count.
    pub fn from_pages(pages: Vec<RawPage>) -> Self {
        Self {
            info: DocumentInfo {
                page_count: pages.len() as u32,
                ..DocumentInfo::default()
            },
            pages,
        }
    }
}

/// Capability that yields positioned text for a document.
///
/// Implementations own whatever handle they open for `path` and must release
/// it before returning, on success and on failure alike.
pub trait PageTextSource {
    /// Extract every page of the document at `path`.
    fn load(&self, path: &Path) -> Result<SourceDocument>;
}

impl<S: PageTextSource + ?Sized> PageTextSource for &S {
    fn load(&self, path: &Path) -> Result<SourceDocument> {
        (**self).load(path)
    }
}
