//! Result sink: JSON serialization of outline results and their schema.

mod json;
mod schema;

pub use json::{to_json, value_to_json, write_json, JsonFormat};
pub use schema::{outline_schema, SCHEMA_FILE_NAME};
