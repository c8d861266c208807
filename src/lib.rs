//! # pdf-outline
//!
//! Infer a document outline (a title plus H1-H4 headings with page numbers)
//! from the positioned text of a PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Source**: a [`PageTextSource`] yields styled fragments per page
//! - **Layout**: fragments are normalized and merged into visual lines
//! - **Analysis**: size statistics, font thresholds and document genre
//! - **Outline**: genre-specific title scoring and heading rules
//! - **Render**: JSON results, a JSON Schema and batch summaries

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod outline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use analysis::{DocumentAnalysis, FontThresholds, Genre};
pub use batch::{BatchOptions, BatchRunner, BatchSummary, FileReport};
pub use detect::{pdf_version_from_bytes, sniff_pdf_version};
pub use error::{Error, Result};
pub use layout::{Fragment, Line, LineMerger, Script};
pub use model::{Heading, HeadingLevel, OutlineResult};
pub use outline::{
    clean_heading_text, DocumentReport, HeadingClassifier, HeadingProfile, OutlineExtractor,
    OutlineOptions, TitleExtractor,
};
pub use render::JsonFormat;
pub use source::{
    DocumentInfo, ErrorMode, LopdfSource, PageTextSource, RawFragment, RawPage, SourceDocument,
    SourceOptions,
};

use std::path::Path;

/// Extract the outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdf_outline::extract_outline("document.pdf").unwrap();
/// for heading in &result.outline {
///     println!("{} {} (page {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    OutlineExtractor::new().extract_file(&LopdfSource::new(), path.as_ref())
}

/// Extract the outline of a PDF file with custom options.
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    source_options: SourceOptions,
    options: OutlineOptions,
) -> Result<OutlineResult> {
    let source = LopdfSource::with_options(source_options);
    OutlineExtractor::with_options(options).extract_file(&source, path.as_ref())
}

/// Extract the outline of an in-memory PDF.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<OutlineResult> {
    let doc = LopdfSource::new().load_bytes(data)?;
    Ok(OutlineExtractor::new().extract_document(&doc))
}

/// Process every PDF in `options.input_dir`, writing results and the schema.
pub fn run_batch(options: BatchOptions) -> Result<BatchSummary> {
    BatchRunner::new(LopdfSource::new(), options).run()
}

/// Extract the outline of a PDF file as pretty-printed JSON.
pub fn to_json<P: AsRef<Path>>(path: P) -> Result<String> {
    let result = extract_outline(path)?;
    render::to_json(&result, JsonFormat::Pretty)
}
