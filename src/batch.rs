//! Directory batch runs.
//!
//! Every PDF in the input directory is processed independently, in parallel
//! by default. A document that fails to load is recorded as a failed result
//! and never stops the run.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::OutlineResult;
use crate::outline::{OutlineExtractor, OutlineOptions};
use crate::render::{outline_schema, write_json, JsonFormat, SCHEMA_FILE_NAME};
use crate::source::PageTextSource;

/// Suffix appended to each input stem for its result file.
pub const OUTPUT_SUFFIX: &str = "_outline.json";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for `.pdf` files
    pub input_dir: PathBuf,

    /// Directory receiving one result file per document
    pub output_dir: PathBuf,

    /// Directory receiving the schema file
    pub schema_dir: PathBuf,

    /// Process documents on the rayon thread pool
    pub parallel: bool,

    /// Format of every written JSON file
    pub format: JsonFormat,

    /// Per-document extraction options
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = dir.into();
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("sample_dataset/pdfs"),
            output_dir: PathBuf::from("output"),
            schema_dir: PathBuf::from("schema"),
            parallel: true,
            format: JsonFormat::Pretty,
            outline: OutlineOptions::default(),
        }
    }
}

/// Outcome of one document in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Input file name
    pub file: String,
    pub success: bool,
    pub headings_count: usize,
    pub title: String,
    /// File name of the written result, if writing succeeded
    pub output_file: Option<String>,
}

/// Summary of a whole batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful: usize,
    pub total_headings: usize,
    pub schema_generated: bool,
    pub schema_file: Option<String>,
    pub results: Vec<FileReport>,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.total_files - self.successful
    }
}

/// Runs outline extraction over a directory of PDFs.
pub struct BatchRunner<S> {
    source: S,
    options: BatchOptions,
    extractor: OutlineExtractor,
}

impl<S: PageTextSource + Sync> BatchRunner<S> {
    pub fn new(source: S, options: BatchOptions) -> Self {
        let extractor = OutlineExtractor::with_options(options.outline.clone());
        Self {
            source,
            options,
            extractor,
        }
    }

    /// Use a preconfigured extractor, e.g. one with custom heading rules.
    pub fn with_extractor(mut self, extractor: OutlineExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every PDF in the input directory.
    ///
    /// Fails only when the input directory cannot be listed, holds no PDFs,
    /// or the output directory cannot be created.
    pub fn run(&self) -> Result<BatchSummary> {
        let inputs = discover_pdfs(&self.options.input_dir)?;
        if inputs.is_empty() {
            return Err(Error::Other(format!(
                "No PDFs found in {}",
                self.options.input_dir.display()
            )));
        }
        fs::create_dir_all(&self.options.output_dir)?;

        log::info!(
            "Processing {} PDFs from {}",
            inputs.len(),
            self.options.input_dir.display()
        );

        let results: Vec<FileReport> = if self.options.parallel {
            inputs.par_iter().map(|path| self.process_file(path)).collect()
        } else {
            inputs.iter().map(|path| self.process_file(path)).collect()
        };

        let schema_file = self.write_schema();
        let summary = BatchSummary {
            total_files: results.len(),
            successful: results.iter().filter(|r| r.success).count(),
            total_headings: results.iter().map(|r| r.headings_count).sum(),
            schema_generated: schema_file.is_some(),
            schema_file,
            results,
        };

        log::info!(
            "Processed {}/{} PDFs, {} headings",
            summary.successful,
            summary.total_files,
            summary.total_headings
        );
        Ok(summary)
    }

    /// Extract one document and write its result file.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = match self.extractor.extract_file(&self.source, path) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Failed to process {}: {}", path.display(), e);
                OutlineResult::failed(&e, file.clone())
            }
        };

        let output_name = output_file_name(path);
        let output_path = self.options.output_dir.join(&output_name);
        let output_file = match write_json(&result, &output_path, self.options.format) {
            Ok(()) => Some(output_name),
            Err(e) => {
                log::warn!("Failed to write {}: {}", output_path.display(), e);
                None
            }
        };

        log::debug!("{}: {} headings", file, result.heading_count());
        FileReport {
            success: result.is_success() && output_file.is_some(),
            headings_count: result.heading_count(),
            title: result.title,
            file,
            output_file,
        }
    }

    fn write_schema(&self) -> Option<String> {
        let path = self.options.schema_dir.join(SCHEMA_FILE_NAME);
        let written = fs::create_dir_all(&self.options.schema_dir)
            .map_err(Error::from)
            .and_then(|_| write_json(&outline_schema(), &path, JsonFormat::Pretty));
        match written {
            Ok(()) => Some(path.display().to_string()),
            Err(e) => {
                log::warn!("Failed to write schema {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Result file name for an input path: `<stem>_outline.json`.
pub fn output_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

/// Files in `dir` with a `.pdf` extension (any case), sorted by path.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
