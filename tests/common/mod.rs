#![allow(dead_code)]

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// A valid Tool record as an extractor would return it.
pub fn widget_record() -> Value {
    json!({
        "name": "Widget Pro™",
        "description": "A waterproof widget sold in three sizes.",
        "category": "Hardware"
    })
}

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write a JSON document to a temporary `.json` file.
pub fn json_file(document: &Value) -> NamedTempFile {
    temp_file(&document.to_string(), ".json")
}
