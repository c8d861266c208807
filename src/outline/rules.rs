//! Heading rules as data.
//!
//! Each genre's classifier is an ordered list of [`Rule`]s evaluated until
//! one matches. Fixed phrase lists live in [`PhraseTable`]s, which can be
//! replaced or loaded from JSON without touching the evaluation loop.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::clean::{char_len, collapse_whitespace, is_upper_cased};
use crate::analysis::FontThresholds;
use crate::error::{Error, Result};
use crate::layout::Line;
use crate::model::HeadingLevel;

use HeadingLevel::{H1, H2, H3, H4};

static NUMBERED_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+[A-Z]").expect("numbered section regex"));
static NUMBERED_SUBSECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\s+[A-Z]").expect("numbered subsection regex"));
static APPENDIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^appendix\s+[a-z]").expect("appendix regex"));

/// The line being classified, with derived views of its text.
pub struct RuleInput<'a> {
    /// Trimmed line text
    pub text: &'a str,
    pub lower: String,
    pub line: &'a Line,
    pub thresholds: &'a FontThresholds,
}

impl<'a> RuleInput<'a> {
    pub fn new(text: &'a str, line: &'a Line, thresholds: &'a FontThresholds) -> Self {
        Self {
            text,
            lower: text.to_lowercase(),
            line,
            thresholds,
        }
    }
}

/// How a phrase table compares phrases with line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseMatch {
    /// Whole lowercase text equals the phrase
    Exact,
    /// Like `Exact`, after dropping trailing colons
    ExactIgnoringColon,
    /// Lowercase text contains the phrase
    Contains,
}

/// One phrase and the level it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub phrase: String,
    pub level: HeadingLevel,
}

/// Ordered phrase-to-level mapping; the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTable {
    #[serde(rename = "match")]
    pub mode: PhraseMatch,
    pub entries: Vec<PhraseEntry>,
}

impl PhraseTable {
    /// Create an empty table.
    pub fn new(mode: PhraseMatch) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    /// Build a table from `(phrase, level)` pairs.
    pub fn from_pairs(mode: PhraseMatch, pairs: &[(&str, HeadingLevel)]) -> Self {
        pairs
            .iter()
            .fold(Self::new(mode), |table, &(phrase, level)| table.with(phrase, level))
    }

    /// Build a table mapping every phrase to one level.
    pub fn uniform(mode: PhraseMatch, phrases: &[&str], level: HeadingLevel) -> Self {
        phrases
            .iter()
            .fold(Self::new(mode), |table, phrase| table.with(phrase, level))
    }

    /// Parse a table from JSON, e.g.
    /// `{"match": "contains", "entries": [{"phrase": "summary", "level": "H2"}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: PhraseTable = serde_json::from_str(json)
            .map_err(|e| Error::Other(format!("Invalid phrase table: {}", e)))?;
        Ok(table.normalized())
    }

    /// Append a phrase; phrases are stored lowercase.
    pub fn with(mut self, phrase: &str, level: HeadingLevel) -> Self {
        self.entries.push(PhraseEntry {
            phrase: collapse_whitespace(&phrase.to_lowercase()),
            level,
        });
        self
    }

    fn normalized(self) -> Self {
        self.entries
            .into_iter()
            .fold(Self::new(self.mode), |table, e| table.with(&e.phrase, e.level))
    }

    /// Level of the first entry matching the lowercase `text`.
    pub fn lookup(&self, lower: &str) -> Option<HeadingLevel> {
        let key = match self.mode {
            PhraseMatch::Exact => collapse_whitespace(lower),
            PhraseMatch::ExactIgnoringColon => collapse_whitespace(lower.trim_end_matches(':')),
            PhraseMatch::Contains => lower.to_string(),
        };
        self.entries
            .iter()
            .find(|e| match self.mode {
                PhraseMatch::Contains => key.contains(&e.phrase),
                _ => key == e.phrase,
            })
            .map(|e| e.level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A test on a line.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Regex over the trimmed text
    Pattern(Regex),
    /// Regex over the lowercase text
    LowerPattern(Regex),
    Bold,
    /// Line size at least the level's threshold (`default` when none derived)
    SizeAtLeast { level: HeadingLevel, default: f32 },
    /// At most this many characters
    MaxLen(usize),
    /// Character count within the inclusive range
    LenBetween(usize, usize),
    EndsWith(char),
    /// Has cased letters, none lowercase
    UpperCased,
    /// 1-indexed page at least this number
    MinPage(u32),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, input: &RuleInput<'_>) -> bool {
        match self {
            Predicate::Pattern(re) => re.is_match(input.text),
            Predicate::LowerPattern(re) => re.is_match(&input.lower),
            Predicate::Bold => input.line.bold,
            Predicate::SizeAtLeast { level, default } => {
                input.line.size >= input.thresholds.get_or(*level, *default)
            }
            Predicate::MaxLen(max) => char_len(input.text) <= *max,
            Predicate::LenBetween(min, max) => (*min..=*max).contains(&char_len(input.text)),
            Predicate::EndsWith(c) => input.text.ends_with(*c),
            Predicate::UpperCased => is_upper_cased(input.text),
            Predicate::MinPage(page) => input.line.page >= *page,
            Predicate::All(preds) => preds.iter().all(|p| p.matches(input)),
            Predicate::Any(preds) => preds.iter().any(|p| p.matches(input)),
        }
    }
}

/// One step of a first-match-wins chain.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Level comes from the table entry that matched
    Table(PhraseTable),
    /// Fixed level when the predicate holds
    When {
        predicate: Predicate,
        level: HeadingLevel,
    },
}

impl Rule {
    pub fn when(predicate: Predicate, level: HeadingLevel) -> Self {
        Rule::When { predicate, level }
    }

    pub fn apply(&self, input: &RuleInput<'_>) -> Option<HeadingLevel> {
        match self {
            Rule::Table(table) => table.lookup(&input.lower),
            Rule::When { predicate, level } => predicate.matches(input).then_some(*level),
        }
    }
}

/// Heading extraction settings for one genre.
#[derive(Debug, Clone, Default)]
pub struct HeadingProfile {
    /// Lines shorter than this many characters are skipped
    pub min_chars: usize,
    /// Maximum headings kept after sorting by page
    pub cap: Option<usize>,
    pub rules: Vec<Rule>,
}

impl HeadingProfile {
    /// A profile that never yields headings.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// First level produced by the rule chain.
    pub fn classify(&self, input: &RuleInput<'_>) -> Option<HeadingLevel> {
        self.rules.iter().find_map(|rule| rule.apply(input))
    }

    /// Replace the first phrase table in the chain, or prepend one.
    pub fn with_phrase_table(mut self, table: PhraseTable) -> Self {
        match self.rules.iter_mut().find(|r| matches!(r, Rule::Table(_))) {
            Some(rule) => *rule = Rule::Table(table),
            None => self.rules.insert(0, Rule::Table(table)),
        }
        self
    }

    /// Invitations: a couple of greeting phrases or short shouted lines.
    pub fn invitation() -> Self {
        Self {
            min_chars: 0,
            cap: Some(2),
            rules: vec![
                Rule::Table(PhraseTable::uniform(
                    PhraseMatch::Exact,
                    &["pathway options", "hope to see you there"],
                    H1,
                )),
                Rule::when(
                    Predicate::All(vec![Predicate::UpperCased, Predicate::LenBetween(10, 50)]),
                    H1,
                ),
            ],
        }
    }

    /// Pathway brochures: fixed section names only.
    pub fn pathway() -> Self {
        Self {
            min_chars: 0,
            cap: None,
            rules: vec![Rule::Table(PhraseTable::uniform(
                PhraseMatch::Contains,
                &["pathway options", "regular pathway", "distinction pathway"],
                H1,
            ))],
        }
    }

    /// Academic syllabi: front-matter names, numbered sections, large bold text.
    pub fn academic() -> Self {
        Self {
            min_chars: 5,
            cap: Some(18),
            rules: vec![
                Rule::Table(PhraseTable::uniform(
                    PhraseMatch::Exact,
                    &["revision history", "table of contents", "acknowledgements"],
                    H1,
                )),
                Rule::when(Predicate::Pattern(NUMBERED_SECTION.clone()), H1),
                Rule::when(Predicate::Pattern(NUMBERED_SUBSECTION.clone()), H2),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::SizeAtLeast { level: H1, default: 0.0 },
                        Predicate::Bold,
                        Predicate::MaxLen(80),
                    ]),
                    H1,
                ),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::SizeAtLeast { level: H2, default: 0.0 },
                        Predicate::Bold,
                        Predicate::MaxLen(60),
                    ]),
                    H2,
                ),
            ],
        }
    }

    /// Generic proposals: named sections, appendices, labelled paragraphs.
    pub fn rfp() -> Self {
        Self {
            min_chars: 5,
            cap: Some(35),
            rules: vec![
                Rule::Table(PhraseTable::uniform(
                    PhraseMatch::ExactIgnoringColon,
                    &["summary", "background", "timeline", "milestones"],
                    H2,
                )),
                Rule::when(Predicate::LowerPattern(APPENDIX.clone()), H2),
                Rule::when(Predicate::Pattern(NUMBERED_SECTION.clone()), H3),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::EndsWith(':'),
                        Predicate::LenBetween(8, 50),
                        Predicate::Bold,
                    ]),
                    H3,
                ),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::SizeAtLeast { level: H1, default: 0.0 },
                        Predicate::MaxLen(100),
                    ]),
                    H1,
                ),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::SizeAtLeast { level: H2, default: 0.0 },
                        Predicate::Bold,
                    ]),
                    H2,
                ),
            ],
        }
    }

    /// Everything else: numbered sections and bold subheadings.
    pub fn general() -> Self {
        Self {
            min_chars: 5,
            cap: Some(25),
            rules: vec![
                Rule::when(Predicate::Pattern(NUMBERED_SECTION.clone()), H1),
                Rule::when(Predicate::Pattern(NUMBERED_SUBSECTION.clone()), H2),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::Bold,
                        Predicate::SizeAtLeast { level: H2, default: 0.0 },
                        Predicate::MaxLen(80),
                    ]),
                    H2,
                ),
            ],
        }
    }

    /// The one known proposal document: its exact section titles, then
    /// colon labels and late numbered clauses.
    pub fn rfp_fixture() -> Self {
        Self {
            min_chars: 3,
            cap: None,
            rules: vec![
                Rule::Table(fixture_phrase_table()),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::EndsWith(':'),
                        Predicate::LenBetween(5, 60),
                        Predicate::Any(vec![
                            Predicate::Bold,
                            Predicate::SizeAtLeast { level: H3, default: 12.0 },
                        ]),
                    ]),
                    H3,
                ),
                Rule::when(
                    Predicate::All(vec![
                        Predicate::Pattern(NUMBERED_SECTION.clone()),
                        Predicate::MinPage(10),
                    ]),
                    H3,
                ),
            ],
        }
    }
}

fn fixture_phrase_table() -> PhraseTable {
    PhraseTable::from_pairs(
        PhraseMatch::Contains,
        &[
            ("ontario's digital library", H1),
            ("ontario\u{2019}s digital library", H1),
            ("a critical component for implementing ontario's road map to prosperity strategy", H1),
            ("a critical component for implementing ontario\u{2019}s road map to prosperity strategy", H1),
            ("summary", H2),
            ("background", H2),
            ("the business plan to be developed", H2),
            ("approach and specific proposal requirements", H2),
            ("evaluation and awarding of contract", H2),
            ("appendix a: odl envisioned phases & funding", H2),
            ("appendix a: odl envisioned phases &amp; funding", H2),
            ("appendix b: odl steering committee terms of reference", H2),
            ("appendix c: odl's envisioned electronic resources", H2),
            ("appendix c: odl\u{2019}s envisioned electronic resources", H2),
            ("timeline:", H3),
            ("equitable access for all ontarians:", H3),
            ("shared decision-making and accountability:", H3),
            ("shared governance structure:", H3),
            ("shared funding:", H3),
            ("local points of entry:", H3),
            ("access:", H3),
            ("guidance and advice:", H3),
            ("training:", H3),
            ("provincial purchasing & licensing:", H3),
            ("provincial purchasing &amp; licensing:", H3),
            ("technological support:", H3),
            ("what could the odl really mean?", H3),
            ("milestones", H3),
            ("phase i: business planning", H3),
            ("phase ii: implementing and transitioning", H3),
            ("phase iii: operating and growing the odl", H3),
            ("1. preamble", H3),
            ("2. terms of reference", H3),
            ("3. membership", H3),
            ("4. appointment criteria and process", H3),
            ("5. term", H3),
            ("6. chair", H3),
            ("7. meetings", H3),
            ("8. lines of accountability and communication", H3),
            ("9. financial and administrative policies", H3),
            ("for each ontario citizen it could mean:", H4),
            ("for each ontario student it could mean:", H4),
            ("for each ontario library it could mean:", H4),
            ("for each ontario government it could mean:", H4),
        ],
    )
}
