//! JSON rendering for outline results.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    value_to_json(result, format)
}

/// Serialize any value the way outline results are serialized.
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write `value` as JSON to `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, format: JsonFormat) -> Result<()> {
    let json = value_to_json(value, format)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel};

    fn sample() -> OutlineResult {
        OutlineResult::new(
            "Test Title ",
            vec![Heading::new(HeadingLevel::H1, "Introduction ", 0)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains('\n'));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"{"title":"Test Title ","outline":[{"level":"H1","text":"Introduction ","page":0}]}"#
        );
    }

    #[test]
    fn test_failed_result_has_error_fields() {
        let failed = OutlineResult::failed("bad file", "broken.pdf");
        let json = to_json(&failed, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"error\":\"bad file\""));
        assert!(json.contains("\"file\":\"broken.pdf\""));
        assert!(json.contains("\"outline\":[]"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&sample(), &path, JsonFormat::Pretty).unwrap();
        let back: OutlineResult = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
    }
}
