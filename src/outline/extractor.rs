//! End-to-end outline extraction for a single document.

use std::path::Path;

use super::headings::HeadingClassifier;
use super::options::OutlineOptions;
use crate::analysis::{DocumentAnalysis, FontThresholds};
use crate::error::Result;
use crate::layout::Line;
use crate::model::OutlineResult;
use crate::source::{DocumentInfo, PageTextSource, SourceDocument};

/// Everything derived from one document, for inspection.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub info: DocumentInfo,
    pub lines: Vec<Line>,
    pub analysis: DocumentAnalysis,
    pub thresholds: FontThresholds,
    pub result: OutlineResult,
}

/// Runs the line, analysis, title and heading stages over a document.
///
/// # Example
///
/// ```
/// use pdf_outline::source::{BBox, RawFragment, RawPage, SourceDocument};
/// use pdf_outline::OutlineExtractor;
///
/// let mut page = RawPage::letter(1);
/// page.push(RawFragment::new("1. Introduction", 18.0, "Arial", BBox::new(72.0, 72.0, 300.0, 90.0)).bold());
/// let doc = SourceDocument::from_pages(vec![page]);
///
/// let result = OutlineExtractor::new().extract_document(&doc);
/// assert_eq!(result.outline.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
    classifier: HeadingClassifier,
}

impl OutlineExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: OutlineOptions) -> Self {
        Self {
            options,
            classifier: HeadingClassifier::default(),
        }
    }

    /// Use a custom heading classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Merge a document's fragments into lines.
    pub fn lines(&self, doc: &SourceDocument) -> Vec<Line> {
        self.options.line_merger().merge_document(doc)
    }

    /// Title and outline of an extracted document.
    pub fn extract_document(&self, doc: &SourceDocument) -> OutlineResult {
        self.extract_lines(&self.lines(doc))
    }

    /// Title and outline from already-merged lines.
    ///
    /// No lines at all gives the empty-document result.
    pub fn extract_lines(&self, lines: &[Line]) -> OutlineResult {
        if lines.is_empty() {
            return OutlineResult::empty();
        }
        let analysis = DocumentAnalysis::analyze(lines);
        let thresholds = FontThresholds::from_lines(lines);
        self.build_result(lines, &analysis, &thresholds)
    }

    /// Load `path` through `source` and extract its outline.
    ///
    /// Source failures propagate; heuristic stages never fail.
    pub fn extract_file<S: PageTextSource>(&self, source: &S, path: &Path) -> Result<OutlineResult> {
        let doc = source.load(path)?;
        Ok(self.extract_document(&doc))
    }

    /// Run every stage and keep the intermediate products.
    pub fn analyze(&self, doc: &SourceDocument) -> DocumentReport {
        let lines = self.lines(doc);
        let analysis = DocumentAnalysis::analyze(&lines);
        let thresholds = FontThresholds::from_lines(&lines);
        let result = if lines.is_empty() {
            OutlineResult::empty()
        } else {
            self.build_result(&lines, &analysis, &thresholds)
        };

        DocumentReport {
            info: doc.info.clone(),
            lines,
            analysis,
            thresholds,
            result,
        }
    }

    fn build_result(
        &self,
        lines: &[Line],
        analysis: &DocumentAnalysis,
        thresholds: &FontThresholds,
    ) -> OutlineResult {
        let genre = analysis.genre;
        let title = self.options.title_extractor().extract(genre, lines, analysis);
        let outline = self.classifier.extract(genre, lines, thresholds);

        log::debug!(
            "{} lines, genre {}, {} headings, title {:?}",
            lines.len(),
            genre,
            outline.len(),
            title.trim_end()
        );
        OutlineResult::new(title, outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Genre;
    use crate::error::Error;
    use crate::source::{BBox, RawFragment, RawPage};

    fn page(number: u32, rows: &[(&str, f32, bool)]) -> RawPage {
        let mut page = RawPage::letter(number);
        for (i, &(text, size, bold)) in rows.iter().enumerate() {
            let y = 72.0 + 30.0 * i as f32;
            let frag = RawFragment::new(text, size, "Arial", BBox::new(72.0, y, 400.0, y + size));
            page.push(if bold { frag.bold() } else { frag });
        }
        page
    }

    struct FailingSource;

    impl PageTextSource for FailingSource {
        fn load(&self, _path: &Path) -> Result<SourceDocument> {
            Err(Error::PdfParse("broken xref".into()))
        }
    }

    #[test]
    fn test_empty_document() {
        let doc = SourceDocument::from_pages(vec![RawPage::letter(1)]);
        let result = OutlineExtractor::new().extract_document(&doc);
        assert_eq!(result, OutlineResult::empty());
        assert_eq!(result.title, "Empty Document");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let doc = SourceDocument::from_pages(vec![page(1, &[("   ", 12.0, false), ("x", 12.0, false)])]);
        assert_eq!(OutlineExtractor::new().extract_document(&doc), OutlineResult::empty());
    }

    #[test]
    fn test_general_document() {
        let doc = SourceDocument::from_pages(vec![
            page(
                1,
                &[
                    ("Annual Operations Review", 22.0, false),
                    ("1. Introduction", 12.0, true),
                    ("Opening paragraph text", 11.0, false),
                ],
            ),
            page(2, &[("1.1 Scope", 12.0, false), ("Closing paragraph text", 11.0, false)]),
        ]);
        let report = OutlineExtractor::new().analyze(&doc);
        assert_eq!(report.analysis.genre, Genre::General);
        assert_eq!(report.result.title, "Annual Operations Review ");

        let outline: Vec<(&str, u32)> = report
            .result
            .outline
            .iter()
            .map(|h| (h.text.trim_end(), h.page))
            .collect();
        assert_eq!(outline, vec![("1. Introduction", 0), ("1.1 Scope", 1)]);
        assert_eq!(report.info.page_count, 2);
        assert_eq!(report.lines.len(), 5);
    }

    #[test]
    fn test_form_document_has_title_only() {
        let doc = SourceDocument::from_pages(vec![page(
            1,
            &[
                ("Application Form for Grant of LTC Advance", 16.0, true),
                ("1. Name of the Government Servant", 11.0, false),
                ("Signature of applicant", 11.0, false),
            ],
        )]);
        let result = OutlineExtractor::new().extract_document(&doc);
        assert_eq!(result.title, "Application Form for Grant of LTC Advance ");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_extract_file_propagates_source_errors() {
        let err = OutlineExtractor::new()
            .extract_file(&FailingSource, Path::new("broken.pdf"))
            .unwrap_err();
        assert!(matches!(err, Error::PdfParse(_)));
    }

    #[test]
    fn test_custom_line_gaps() {
        let doc = SourceDocument::from_pages(vec![page(
            1,
            &[("Upper words", 12.0, false), ("Lower words", 12.0, false)],
        )]);
        let wide = OutlineExtractor::with_options(OutlineOptions::new().with_line_gaps(5.0, 40.0));
        assert_eq!(wide.lines(&doc).len(), 1);
        assert_eq!(OutlineExtractor::new().lines(&doc).len(), 2);
    }
}
