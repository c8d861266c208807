//! Genre-dispatched heading classification.

use std::collections::{HashMap, HashSet};

use super::clean::{char_len, clean_heading_text};
use super::rules::{HeadingProfile, RuleInput};
use crate::analysis::{FontThresholds, Genre};
use crate::layout::Line;
use crate::model::{Heading, HeadingLevel};

/// Maps lines to heading levels using one [`HeadingProfile`] per genre.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    profiles: HashMap<Genre, HeadingProfile>,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        let profiles = Genre::ALL
            .into_iter()
            .map(|genre| (genre, Self::builtin_profile(genre)))
            .collect();
        Self { profiles }
    }
}

impl HeadingClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rule set for a genre.
    pub fn builtin_profile(genre: Genre) -> HeadingProfile {
        match genre {
            Genre::RfpFixture => HeadingProfile::rfp_fixture(),
            Genre::Form => HeadingProfile::disabled(),
            Genre::Invitation => HeadingProfile::invitation(),
            Genre::Academic => HeadingProfile::academic(),
            Genre::Rfp => HeadingProfile::rfp(),
            Genre::Pathway => HeadingProfile::pathway(),
            Genre::General => HeadingProfile::general(),
        }
    }

    /// Replace the profile used for `genre`.
    pub fn with_profile(mut self, genre: Genre, profile: HeadingProfile) -> Self {
        self.profiles.insert(genre, profile);
        self
    }

    pub fn profile(&self, genre: Genre) -> Option<&HeadingProfile> {
        self.profiles.get(&genre)
    }

    /// Level for a single line, ignoring length limits and deduplication.
    pub fn classify_line(
        &self,
        genre: Genre,
        line: &Line,
        thresholds: &FontThresholds,
    ) -> Option<HeadingLevel> {
        let profile = self.profiles.get(&genre)?;
        profile.classify(&RuleInput::new(line.text.trim(), line, thresholds))
    }

    /// Extract the outline of a document.
    ///
    /// Lines whose trimmed text was already accepted, or that are shorter
    /// than the profile minimum, are skipped. Accepted headings are cleaned,
    /// given zero-based pages, stably sorted by page and truncated to the
    /// profile cap.
    pub fn extract(&self, genre: Genre, lines: &[Line], thresholds: &FontThresholds) -> Vec<Heading> {
        let Some(profile) = self.profiles.get(&genre) else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut headings = Vec::new();

        for line in lines {
            let text = line.text.trim();
            if seen.contains(text) || char_len(text) < profile.min_chars {
                continue;
            }
            if let Some(level) = profile.classify(&RuleInput::new(text, line, thresholds)) {
                seen.insert(text);
                headings.push(Heading::new(
                    level,
                    clean_heading_text(text),
                    line.page.saturating_sub(1),
                ));
            }
        }

        headings.sort_by_key(|h| h.page);
        if let Some(cap) = profile.cap {
            headings.truncate(cap);
        }
        log::trace!("{} headings for {} genre", headings.len(), genre);
        headings
    }
}
