//! Outline extraction options.

use crate::layout::{LineMerger, DEFAULT_LINE_GAP, DEFAULT_SAME_SIZE_GAP};

use super::title::TitleExtractor;

/// Options for outline extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Vertical distance within which fragments always share a line
    pub line_gap: f32,

    /// Vertical distance within which equal-size fragments share a line
    pub same_size_gap: f32,

    /// Lines scanned for a title in general documents
    pub title_scan_lines: usize,

    /// Lines scanned for a title in academic documents
    pub academic_title_scan_lines: usize,

    /// Lines scanned for the proposal fixture title
    pub fixture_title_scan_lines: usize,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both line merging gaps.
    pub fn with_line_gaps(mut self, line_gap: f32, same_size_gap: f32) -> Self {
        self.line_gap = line_gap;
        self.same_size_gap = same_size_gap;
        self
    }

    /// Set the general title scan window.
    pub fn with_title_scan_lines(mut self, lines: usize) -> Self {
        self.title_scan_lines = lines;
        self
    }

    /// Set the academic title scan window.
    pub fn with_academic_title_scan_lines(mut self, lines: usize) -> Self {
        self.academic_title_scan_lines = lines;
        self
    }

    /// Set the fixture title scan window.
    pub fn with_fixture_title_scan_lines(mut self, lines: usize) -> Self {
        self.fixture_title_scan_lines = lines;
        self
    }

    pub(crate) fn line_merger(&self) -> LineMerger {
        LineMerger::new(self.line_gap, self.same_size_gap)
    }

    pub(crate) fn title_extractor(&self) -> TitleExtractor {
        TitleExtractor::new(
            self.title_scan_lines,
            self.academic_title_scan_lines,
            self.fixture_title_scan_lines,
        )
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            line_gap: DEFAULT_LINE_GAP,
            same_size_gap: DEFAULT_SAME_SIZE_GAP,
            title_scan_lines: 50,
            academic_title_scan_lines: 30,
            fixture_title_scan_lines: 30,
        }
    }
}
