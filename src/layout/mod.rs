//! Layout reconstruction: fragments to visual lines.

mod fragment;
mod line;
mod script;

pub use fragment::{normalize_page, round_size, Fragment};
pub use line::{Line, LineMerger, DEFAULT_LINE_GAP, DEFAULT_SAME_SIZE_GAP};
pub use script::{detect_script, is_spaceless_script_char, Script};
