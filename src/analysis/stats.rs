//! Document-wide typographic statistics.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::genre::Genre;
use crate::layout::{Line, Script};

/// Histogram key for a size: tenths of a point.
pub fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Size for a histogram key.
pub fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Summary statistics over line sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeStats {
    pub mean: f32,
    pub median: f32,
    /// Most frequent size; the first seen wins ties
    pub mode: f32,
    pub unique_sizes: usize,
    pub percentile_75: f32,
    pub percentile_90: f32,
}

impl SizeStats {
    /// Compute statistics, or `None` without observations.
    pub fn from_sizes(sizes: &[f32], histogram: &IndexMap<i32, usize>) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        let mut sorted = sizes.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = sorted.len();

        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let mut mode = histogram.first().map(|(k, c)| (*k, *c))?;
        for (&key, &count) in histogram.iter().skip(1) {
            if count > mode.1 {
                mode = (key, count);
            }
        }

        let percentile = |p: f64| sorted[((p * n as f64) as usize).min(n - 1)];

        Some(SizeStats {
            mean: sizes.iter().sum::<f32>() / n as f32,
            median,
            mode: key_size(mode.0),
            unique_sizes: histogram.len(),
            percentile_75: percentile(0.75),
            percentile_90: percentile(0.90),
        })
    }
}

/// Aggregate statistics for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub total_lines: usize,
    /// Distinct pages that contributed lines
    pub pages: usize,
    /// Line count per size key (tenths of a point), in first-seen order
    pub sizes: IndexMap<i32, usize>,
    pub fonts: IndexMap<String, usize>,
    pub scripts: IndexMap<Script, usize>,
    pub bold_lines: usize,
    pub avg_line_length: f32,
    pub avg_char_count: f32,
    pub size_stats: Option<SizeStats>,
    pub genre: Genre,
}

impl DocumentAnalysis {
    /// Analyze all lines of a document.
    ///
    /// An empty slice yields zero counts, no size statistics and the
    /// general genre.
    pub fn analyze(lines: &[Line]) -> Self {
        let mut sizes = IndexMap::new();
        let mut fonts = IndexMap::new();
        let mut scripts = IndexMap::new();
        let mut pages = HashSet::new();
        let mut bold_lines = 0;
        let mut total_len = 0usize;
        let mut total_chars = 0usize;

        for line in lines {
            *sizes.entry(size_key(line.size)).or_insert(0) += 1;
            *fonts.entry(line.font.clone()).or_insert(0) += 1;
            *scripts.entry(line.script).or_insert(0) += 1;
            pages.insert(line.page);
            if line.bold {
                bold_lines += 1;
            }
            total_len += line.text.chars().count();
            total_chars += line.char_count;
        }

        let raw_sizes: Vec<f32> = lines.iter().map(|l| l.size).collect();
        let size_stats = SizeStats::from_sizes(&raw_sizes, &sizes);
        let average = |total: usize| {
            if lines.is_empty() {
                0.0
            } else {
                total as f32 / lines.len() as f32
            }
        };

        DocumentAnalysis {
            total_lines: lines.len(),
            pages: pages.len(),
            avg_line_length: average(total_len),
            avg_char_count: average(total_chars),
            sizes,
            fonts,
            scripts,
            bold_lines,
            size_stats,
            genre: Genre::detect(lines),
        }
    }

    /// Percentage (0-100) of line-size observations strictly below `size`.
    pub fn size_percentile(&self, size: f32) -> f32 {
        let total: usize = self.sizes.values().sum();
        if total == 0 {
            return 0.0;
        }
        let below: usize = self
            .sizes
            .iter()
            .filter(|&(&key, _)| key_size(key) < size)
            .map(|(_, &count)| count)
            .sum();
        below as f32 / total as f32 * 100.0
    }

    /// Most common script across lines.
    pub fn dominant_script(&self) -> Script {
        let mut best: Option<(Script, usize)> = None;
        for (&script, &count) in &self.scripts {
            if best.map_or(true, |(_, b)| count > b) {
                best = Some((script, count));
            }
        }
        best.map(|(s, _)| s).unwrap_or(Script::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{normalize_page, LineMerger};
    use crate::source::{BBox, RawFragment, RawPage};

    fn lines(specs: &[(&str, f32, bool, u32)]) -> Vec<Line> {
        let merger = LineMerger::default();
        let mut out = Vec::new();
        for (i, &(text, size, bold, page_no)) in specs.iter().enumerate() {
            let mut page = RawPage::letter(page_no);
            let y = 40.0 * i as f32;
            let mut frag = RawFragment::new(text, size, "Times", BBox::new(72.0, y, 300.0, y + size));
            frag.bold = bold;
            page.push(frag);
            out.extend(merger.merge_page(normalize_page(&page)));
        }
        out
    }

    #[test]
    fn test_analyze_counts() {
        let lines = lines(&[
            ("Heading", 16.0, true, 1),
            ("Body one", 11.0, false, 1),
            ("Body two", 11.0, false, 2),
            ("Body three", 11.0, false, 2),
        ]);
        let analysis = DocumentAnalysis::analyze(&lines);
        assert_eq!(analysis.total_lines, 4);
        assert_eq!(analysis.pages, 2);
        assert_eq!(analysis.bold_lines, 1);
        assert_eq!(analysis.sizes.get(&110), Some(&3));
        assert_eq!(analysis.dominant_script(), Script::Latin);

        let stats = analysis.size_stats.unwrap();
        assert_eq!(stats.mode, 11.0);
        assert_eq!(stats.median, 11.0);
        assert_eq!(stats.mean, 12.25);
        assert_eq!(stats.unique_sizes, 2);
        assert_eq!(stats.percentile_75, 16.0);
    }

    #[test]
    fn test_percentile_indices_truncate() {
        for n in [10usize, 20, 1000] {
            let sizes: Vec<f32> = (1..=n).map(|i| i as f32).collect();
            let histogram: IndexMap<i32, usize> = sizes.iter().map(|s| (size_key(*s), 1)).collect();
            let stats = SizeStats::from_sizes(&sizes, &histogram).unwrap();
            assert_eq!(stats.percentile_75, sizes[n * 3 / 4], "n = {}", n);
            assert_eq!(stats.percentile_90, sizes[n * 9 / 10], "n = {}", n);
        }
    }

    #[test]
    fn test_size_percentile() {
        let lines = lines(&[
            ("Title here", 20.0, false, 1),
            ("Body one", 10.0, false, 1),
            ("Body two", 10.0, false, 1),
            ("Body three", 10.0, false, 1),
        ]);
        let analysis = DocumentAnalysis::analyze(&lines);
        assert_eq!(analysis.size_percentile(20.0), 75.0);
        assert_eq!(analysis.size_percentile(10.0), 0.0);
        assert_eq!(analysis.size_percentile(30.0), 100.0);
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = DocumentAnalysis::analyze(&[]);
        assert_eq!(analysis.total_lines, 0);
        assert!(analysis.size_stats.is_none());
        assert_eq!(analysis.size_percentile(12.0), 0.0);
        assert_eq!(analysis.genre, Genre::General);
        assert_eq!(analysis.avg_line_length, 0.0);
    }

    #[test]
    fn test_size_key_round_trip() {
        assert_eq!(size_key(11.5), 115);
        assert_eq!(key_size(115), 11.5);
    }
}
