//! Fragment normalization.

use serde::{Deserialize, Serialize};

use super::script::{detect_script, Script};
use crate::source::{BBox, RawFragment, RawPage};

/// A styled text run enriched with page-relative geometry and script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Trimmed text
    pub text: String,
    /// Font size rounded to one decimal
    pub size: f32,
    pub font: String,
    pub bold: bool,
    pub italic: bool,
    /// Page number (1-indexed)
    pub page: u32,
    pub bbox: BBox,
    pub page_width: f32,
    pub page_height: f32,
    /// `x / page_width`, zero on a degenerate page
    pub relative_x: f32,
    /// `y / page_height`, zero on a degenerate page
    pub relative_y: f32,
    pub char_count: usize,
    pub word_count: usize,
    pub script: Script,
}

impl Fragment {
    /// Normalize one raw fragment of `page`.
    ///
    /// Returns `None` for whitespace-only or single-character text.
    pub fn normalize(raw: &RawFragment, page: &RawPage) -> Option<Fragment> {
        let text = raw.text.trim();
        let char_count = text.chars().count();
        if char_count <= 1 {
            return None;
        }

        let bbox = raw.bbox;
        Some(Fragment {
            text: text.to_string(),
            size: round_size(raw.size),
            font: raw.font.clone(),
            bold: raw.bold,
            italic: raw.italic,
            page: page.number,
            bbox,
            page_width: page.width,
            page_height: page.height,
            relative_x: ratio(bbox.x0, page.width),
            relative_y: ratio(bbox.y0, page.height),
            char_count,
            word_count: text.split_whitespace().count(),
            script: detect_script(text),
        })
    }

    /// Left edge.
    pub fn x(&self) -> f32 {
        self.bbox.x0
    }

    /// Top edge.
    pub fn y(&self) -> f32 {
        self.bbox.y0
    }
}

/// Normalize every usable fragment on a page, in extractor order.
pub fn normalize_page(page: &RawPage) -> Vec<Fragment> {
    page.fragments
        .iter()
        .filter_map(|raw| Fragment::normalize(raw, page))
        .collect()
}

/// Round a font size to 0.1pt.
pub fn round_size(size: f32) -> f32 {
    (size * 10.0).round() / 10.0
}

fn ratio(value: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        value / extent
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, x: f32, y: f32) -> RawFragment {
        RawFragment::new(text, 11.96, "Arial", BBox::new(x, y, x + 50.0, y + 12.0))
    }

    #[test]
    fn test_normalize_filters_short_text() {
        let page = RawPage::letter(1);
        assert!(Fragment::normalize(&raw("   ", 0.0, 0.0), &page).is_none());
        assert!(Fragment::normalize(&raw(" a ", 0.0, 0.0), &page).is_none());
        assert!(Fragment::normalize(&raw("ab", 0.0, 0.0), &page).is_some());
    }

    #[test]
    fn test_normalize_enriches_fragment() {
        let page = RawPage::new(3, 600.0, 800.0);
        let frag = Fragment::normalize(&raw("  Hello world ", 150.0, 200.0), &page).unwrap();
        assert_eq!(frag.text, "Hello world");
        assert_eq!(frag.size, 12.0);
        assert_eq!(frag.page, 3);
        assert_eq!(frag.relative_x, 0.25);
        assert_eq!(frag.relative_y, 0.25);
        assert_eq!(frag.char_count, 11);
        assert_eq!(frag.word_count, 2);
        assert_eq!(frag.script, Script::Latin);
    }

    #[test]
    fn test_zero_sized_page() {
        let page = RawPage::new(1, 0.0, 0.0);
        let frag = Fragment::normalize(&raw("Title", 10.0, 10.0), &page).unwrap();
        assert_eq!(frag.relative_x, 0.0);
        assert_eq!(frag.relative_y, 0.0);
    }

    #[test]
    fn test_round_size() {
        assert_eq!(round_size(11.96), 12.0);
        assert_eq!(round_size(9.04), 9.0);
        assert_eq!(round_size(14.25), 14.3);
    }
}
