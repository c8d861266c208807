//! Result model shared by the pipeline, the JSON sink and the batch runner.

mod outline;

pub use outline::{
    Heading, HeadingLevel, OutlineResult, EMPTY_DOCUMENT_TITLE, ERROR_TITLE,
};
