//! Line merging.
//!
//! Fragments on a page are sorted top-to-bottom, left-to-right and merged
//! greedily into visual lines: a fragment joins the open line when it sits
//! within `line_gap` of the line's last fragment, or within `same_size_gap`
//! when its size matches exactly.

use serde::{Deserialize, Serialize};

use super::fragment::{normalize_page, Fragment};
use super::script::{detect_script, Script};
use crate::source::{BBox, SourceDocument};

/// Default vertical distance for unconditional merging.
pub const DEFAULT_LINE_GAP: f32 = 5.0;

/// Default vertical distance for merging fragments of identical size.
pub const DEFAULT_SAME_SIZE_GAP: f32 = 15.0;

/// A visual row of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Fragment texts joined with single spaces
    pub text: String,
    /// Largest constituent size
    pub size: f32,
    /// Constituent sizes in merge order
    pub sizes: Vec<f32>,
    /// Most frequent font (first seen wins ties)
    pub font: String,
    /// Distinct fonts in first-seen order
    pub fonts: Vec<String>,
    /// Majority of fragments bold
    pub bold: bool,
    /// Majority of fragments italic
    pub italic: bool,
    /// Page number (1-indexed)
    pub page: u32,
    pub bbox: BBox,
    pub page_width: f32,
    pub page_height: f32,
    pub relative_x: f32,
    pub relative_y: f32,
    pub span_count: usize,
    pub char_count: usize,
    pub word_count: usize,
    pub script: Script,
}

impl Line {
    /// Merge a non-empty run of fragments into one line.
    pub fn from_fragments(fragments: &[Fragment]) -> Option<Line> {
        let first = fragments.first()?;

        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let sizes: Vec<f32> = fragments.iter().map(|f| f.size).collect();
        let size = sizes.iter().copied().fold(f32::MIN, f32::max);

        let mut font_counts: Vec<(&str, usize)> = Vec::new();
        for f in fragments {
            match font_counts.iter_mut().find(|(name, _)| *name == f.font) {
                Some((_, n)) => *n += 1,
                None => font_counts.push((f.font.as_str(), 1)),
            }
        }
        let mut font = font_counts[0];
        for &entry in &font_counts[1..] {
            if entry.1 > font.1 {
                font = entry;
            }
        }

        let half = fragments.len() as f32 / 2.0;
        let bold = fragments.iter().filter(|f| f.bold).count() as f32 > half;
        let italic = fragments.iter().filter(|f| f.italic).count() as f32 > half;

        let bbox = fragments[1..]
            .iter()
            .fold(first.bbox, |acc, f| acc.union(&f.bbox));

        let script = detect_script(&text);
        Some(Line {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            text,
            size,
            sizes,
            font: font.0.to_string(),
            fonts: font_counts.iter().map(|(name, _)| name.to_string()).collect(),
            bold,
            italic,
            page: first.page,
            bbox,
            page_width: first.page_width,
            page_height: first.page_height,
            relative_x: first.relative_x,
            relative_y: first.relative_y,
            span_count: fragments.len(),
            script,
        })
    }

    /// Left edge of the first fragment.
    pub fn x(&self) -> f32 {
        self.bbox.x0
    }

    /// Check if every letter in the line is uppercase.
    pub fn is_uppercase(&self) -> bool {
        let mut letters = self.text.chars().filter(|c| c.is_alphabetic()).peekable();
        letters.peek().is_some() && letters.all(|c| c.is_uppercase())
    }
}

/// Greedy single-pass line clustering.
#[derive(Debug, Clone, Copy)]
pub struct LineMerger {
    line_gap: f32,
    same_size_gap: f32,
}

impl Default for LineMerger {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_GAP, DEFAULT_SAME_SIZE_GAP)
    }
}

impl LineMerger {
    /// Create a merger with explicit gap thresholds.
    pub fn new(line_gap: f32, same_size_gap: f32) -> Self {
        Self {
            line_gap,
            same_size_gap,
        }
    }

    /// Whether `next` continues a line whose last fragment is `last`.
    pub fn joins(&self, last: &Fragment, next: &Fragment) -> bool {
        let gap = (next.y() - last.y()).abs();
        gap <= self.line_gap || (gap <= self.same_size_gap && next.size == last.size)
    }

    /// Merge the fragments of a single page into lines.
    pub fn merge_page(&self, mut fragments: Vec<Fragment>) -> Vec<Line> {
        fragments.sort_by(|a, b| {
            a.y()
                .total_cmp(&b.y())
                .then_with(|| a.x().total_cmp(&b.x()))
        });

        let mut lines = Vec::new();
        let mut start = 0;
        for i in 1..fragments.len() {
            if !self.joins(&fragments[i - 1], &fragments[i]) {
                lines.extend(Line::from_fragments(&fragments[start..i]));
                start = i;
            }
        }
        lines.extend(Line::from_fragments(&fragments[start..]));
        lines
    }

    /// Normalize and merge every page of a document, in page order.
    pub fn merge_document(&self, doc: &SourceDocument) -> Vec<Line> {
        doc.pages
            .iter()
            .flat_map(|page| self.merge_page(normalize_page(page)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawFragment, RawPage};

    fn page_with(frags: Vec<RawFragment>) -> RawPage {
        let mut page = RawPage::letter(1);
        for f in frags {
            page.push(f);
        }
        page
    }

    fn at(text: &str, x: f32, y: f32, size: f32) -> RawFragment {
        RawFragment::new(text, size, "Arial", BBox::new(x, y, x + 40.0, y + size))
    }

    fn lines_of(page: &RawPage) -> Vec<Line> {
        LineMerger::default().merge_page(normalize_page(page))
    }

    #[test]
    fn test_close_fragments_merge_regardless_of_size() {
        let page = page_with(vec![at("Hello", 10.0, 100.0, 12.0), at("world", 60.0, 104.0, 9.0)]);
        let lines = lines_of(&page);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].size, 12.0);
        assert_eq!(lines[0].sizes, vec![12.0, 9.0]);
    }

    #[test]
    fn test_medium_gap_merges_only_equal_sizes() {
        let same = page_with(vec![at("First", 10.0, 100.0, 12.0), at("second", 10.0, 112.0, 12.0)]);
        assert_eq!(lines_of(&same).len(), 1);

        let differ = page_with(vec![at("First", 10.0, 100.0, 12.0), at("second", 10.0, 112.0, 11.0)]);
        assert_eq!(lines_of(&differ).len(), 2);
    }

    #[test]
    fn test_large_gap_never_merges() {
        let page = page_with(vec![at("Top", 10.0, 100.0, 12.0), at("Bottom", 10.0, 116.0, 12.0)]);
        assert_eq!(lines_of(&page).len(), 2);
    }

    #[test]
    fn test_gap_bounds_are_inclusive() {
        let at_line_gap = page_with(vec![at("Hello", 10.0, 100.0, 12.0), at("world", 60.0, 105.0, 9.0)]);
        assert_eq!(lines_of(&at_line_gap).len(), 1);

        let same = page_with(vec![at("First", 10.0, 100.0, 12.0), at("second", 10.0, 115.0, 12.0)]);
        assert_eq!(lines_of(&same).len(), 1);

        let differ = page_with(vec![at("First", 10.0, 100.0, 12.0), at("second", 10.0, 115.0, 11.0)]);
        assert_eq!(lines_of(&differ).len(), 2);

        let beyond = page_with(vec![at("First", 10.0, 100.0, 12.0), at("second", 10.0, 115.5, 12.0)]);
        assert_eq!(lines_of(&beyond).len(), 2);
    }

    #[test]
    fn test_sorted_by_position() {
        let page = page_with(vec![
            at("below", 10.0, 300.0, 10.0),
            at("right", 200.0, 100.0, 10.0),
            at("left", 10.0, 100.0, 10.0),
        ]);
        let lines = lines_of(&page);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "left right");
        assert_eq!(lines[1].text, "below");
    }

    #[test]
    fn test_majority_style_and_dominant_font() {
        let mut a = at("aa", 0.0, 50.0, 10.0).bold();
        a.font = "Bold".to_string();
        let mut b = at("bb", 50.0, 50.0, 10.0);
        b.font = "Regular".to_string();
        let mut c = at("cc", 90.0, 50.0, 10.0).bold().italic();
        c.font = "Regular".to_string();

        let lines = lines_of(&page_with(vec![a, b, c]));
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.bold);
        assert!(!line.italic);
        assert_eq!(line.font, "Regular");
        assert_eq!(line.fonts, vec!["Bold".to_string(), "Regular".to_string()]);
        assert_eq!(line.span_count, 3);
        assert_eq!(line.bbox, BBox::new(0.0, 50.0, 130.0, 60.0));
    }

    #[test]
    fn test_empty_page_yields_no_lines() {
        assert!(lines_of(&RawPage::letter(1)).is_empty());
    }

    #[test]
    fn test_is_uppercase() {
        let page = page_with(vec![at("YOU'RE INVITED", 0.0, 0.0, 20.0)]);
        assert!(lines_of(&page)[0].is_uppercase());
        let page = page_with(vec![at("Mixed Case", 0.0, 0.0, 20.0)]);
        assert!(!lines_of(&page)[0].is_uppercase());
    }
}
