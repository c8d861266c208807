//! JSON Schema describing serialized outline results.

use serde_json::{json, Value};

/// File name the schema is published under.
pub const SCHEMA_FILE_NAME: &str = "schema.json";

/// Draft 2020-12 schema for [`OutlineResult`](crate::model::OutlineResult) JSON.
pub fn outline_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://example.com/pdf-outline-schema.json",
        "title": "PDF Outline Schema",
        "description": "Schema for PDF document outline extraction results",
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "The main title of the document",
                "minLength": 1,
                "maxLength": 500
            },
            "outline": {
                "type": "array",
                "description": "Hierarchical outline of document headings",
                "items": {
                    "type": "object",
                    "properties": {
                        "level": {
                            "type": "string",
                            "enum": ["H1", "H2", "H3", "H4"],
                            "description": "Heading level"
                        },
                        "text": {
                            "type": "string",
                            "description": "Heading text content",
                            "minLength": 1,
                            "maxLength": 300
                        },
                        "page": {
                            "type": "integer",
                            "description": "Page number (0-indexed)",
                            "minimum": 0
                        }
                    },
                    "required": ["level", "text", "page"],
                    "additionalProperties": false
                }
            },
            "error": {
                "type": "string",
                "description": "Error message if processing failed"
            },
            "file": {
                "type": "string",
                "description": "Source file name"
            }
        },
        "required": ["title", "outline"],
        "additionalProperties": false,
        "examples": [
            {
                "title": "Sample Document Title",
                "outline": [
                    {"level": "H1", "text": "Introduction", "page": 0},
                    {"level": "H2", "text": "Background Information", "page": 1},
                    {"level": "H3", "text": "Technical Details", "page": 2}
                ]
            }
        ]
    })
}
