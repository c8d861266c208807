//! Per-level minimum font sizes.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::stats::{key_size, size_key};
use crate::layout::Line;
use crate::model::HeadingLevel;

/// A size must occur at least this often to count as a heading tier.
const MIN_TIER_FREQUENCY: usize = 3;

/// Multipliers of the mean size used when too few tiers exist.
const MEAN_RATIOS: [f32; 4] = [1.30, 1.15, 1.05, 1.00];

/// Minimum font size per heading level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontThresholds {
    levels: BTreeMap<HeadingLevel, f32>,
}

impl FontThresholds {
    /// Thresholds with explicit sizes for H1..H4.
    pub fn new(h1: f32, h2: f32, h3: f32, h4: f32) -> Self {
        Self {
            levels: HeadingLevel::ALL.into_iter().zip([h1, h2, h3, h4]).collect(),
        }
    }

    /// Derive thresholds from the sizes of a document's lines.
    pub fn from_lines(lines: &[Line]) -> Self {
        Self::from_sizes(lines.iter().map(|l| l.size))
    }

    /// Derive thresholds from size observations.
    ///
    /// With at least three sizes occurring three or more times, the four most
    /// frequent such sizes become the tiers, largest size first, and H4
    /// repeats H3 when only three exist. Otherwise the tiers are fixed ratios
    /// of the mean size. Non-positive sizes are ignored; no sizes at all give
    /// empty thresholds.
    pub fn from_sizes(sizes: impl IntoIterator<Item = f32>) -> Self {
        let sizes: Vec<f32> = sizes.into_iter().filter(|s| *s > 0.0).collect();
        if sizes.is_empty() {
            return Self::default();
        }

        let mut frequency: IndexMap<i32, usize> = IndexMap::new();
        for &size in &sizes {
            *frequency.entry(size_key(size)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(i32, usize)> = frequency
            .into_iter()
            .filter(|&(_, count)| count >= MIN_TIER_FREQUENCY)
            .collect();
        // Stable: equally frequent sizes keep first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        if ranked.len() >= 3 {
            let mut tiers: Vec<f32> = ranked.iter().take(4).map(|&(k, _)| key_size(k)).collect();
            tiers.sort_by(|a, b| b.total_cmp(a));
            let h4 = tiers.get(3).copied().unwrap_or(tiers[2]);
            return Self::new(tiers[0], tiers[1], tiers[2], h4);
        }

        let mean = sizes.iter().sum::<f32>() / sizes.len() as f32;
        let [r1, r2, r3, r4] = MEAN_RATIOS;
        Self::new(mean * r1, mean * r2, mean * r3, mean * r4)
    }

    /// Threshold for `level`, if any were derived.
    pub fn get(&self, level: HeadingLevel) -> Option<f32> {
        self.levels.get(&level).copied()
    }

    /// Threshold for `level`, or `default` when thresholds are empty.
    pub fn get_or(&self, level: HeadingLevel, default: f32) -> f32 {
        self.get(level).unwrap_or(default)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// `(level, size)` pairs, H1 first.
    pub fn iter(&self) -> impl Iterator<Item = (HeadingLevel, f32)> + '_ {
        self.levels.iter().map(|(l, s)| (*l, *s))
    }
}
