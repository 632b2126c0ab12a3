//! Text collection from JSON dataset documents.
//!
//! A document is arbitrary JSON. Texts are found by following a key path
//! (e.g. `["full_text"]`) through objects; arrays along the way are fanned
//! out. With an empty key path every string in the document is a text.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read and parse a JSON document.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Collect every string reachable through `key_path`.
pub fn collect_texts(document: &Value, key_path: &[String]) -> Vec<String> {
    let mut texts = Vec::new();
    walk(document, key_path, &mut texts);
    texts
}

fn walk(value: &Value, keys: &[String], texts: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, keys, texts);
            }
        }
        Value::Object(map) => match keys.split_first() {
            Some((key, rest)) => {
                if let Some(child) = map.get(key) {
                    walk(child, rest, texts);
                }
            }
            None => {
                for child in map.values() {
                    walk(child, keys, texts);
                }
            }
        },
        Value::String(s) if keys.is_empty() => texts.push(s.clone()),
        _ => {}
    }
}
