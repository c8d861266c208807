//! Title and heading inference.
//!
//! [`OutlineExtractor`] drives the whole pipeline. The title and heading
//! stages can also be used on their own through [`TitleExtractor`] and
//! [`HeadingClassifier`]; heading rules are plain data in [`rules`].

mod clean;
mod extractor;
mod headings;
mod options;
pub mod rules;
mod title;

pub use clean::{clean_heading_text, collapse_whitespace, is_all_uppercase, is_upper_cased};
pub use extractor::{DocumentReport, OutlineExtractor};
pub use headings::HeadingClassifier;
pub use options::OutlineOptions;
pub use rules::{HeadingProfile, PhraseMatch, PhraseTable, Predicate, Rule};
pub use title::{
    is_title_candidate, TitleExtractor, ACADEMIC_FALLBACK_TITLE, FIXTURE_FALLBACK_TITLE,
    UNTITLED_DOCUMENT,
};
