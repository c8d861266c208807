//! Document-level analysis: statistics, genre and font thresholds.

mod genre;
mod stats;
mod thresholds;

pub use genre::Genre;
pub use stats::{key_size, size_key, DocumentAnalysis, SizeStats};
pub use thresholds::FontThresholds;
