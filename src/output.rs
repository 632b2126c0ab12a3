//! JSON artifact persistence.
//!
//! Layout under the output directory, per document `<name>`:
//!
//! ```text
//! graph/graph_<name>                       weighted edge list (optional)
//! graph/filtered_graph_<name>              trust-filtered edge list
//! inverse_pagerank/inverse_pagerank_<name> [label, score] pairs, best first
//! trustrank/trustrank_<name>               [label, score] pairs, best first
//! summary/summary_<name>                   candidate texts
//! validation/validation_<name>             ROUGE results (when validated)
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::scoring::ValidationResult;
use crate::types::WeightedEdge;

/// Everything persisted for one document.
pub struct DocumentArtifacts<'a> {
    pub graph: Option<&'a [WeightedEdge]>,
    pub authority: &'a [(Arc<str>, f64)],
    pub trust: &'a [(Arc<str>, f64)],
    pub filtered_graph: &'a [WeightedEdge],
    pub summaries: &'a [String],
    pub validation: Option<&'a [ValidationResult]>,
}

/// Writes pretty-printed JSON files below a root directory.
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Write `value` to `<root>/<category>/<prefix>_<name>`, overwriting.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        category: &str,
        prefix: &str,
        name: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let dir = self.root.join(category);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(format!("{prefix}_{name}"));
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Write every artifact of one document. Returns the written paths.
    pub fn write_document(&self, name: &str, artifacts: &DocumentArtifacts<'_>) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if let Some(graph) = artifacts.graph {
            written.push(self.write_json("graph", "graph", name, graph)?);
        }
        written.push(self.write_json(
            "inverse_pagerank",
            "inverse_pagerank",
            name,
            &score_pairs(artifacts.authority),
        )?);
        written.push(self.write_json("trustrank", "trustrank", name, &score_pairs(artifacts.trust))?);
        written.push(self.write_json("graph", "filtered_graph", name, artifacts.filtered_graph)?);
        written.push(self.write_json("summary", "summary", name, artifacts.summaries)?);
        if let Some(validation) = artifacts.validation {
            written.push(self.write_json("validation", "validation", name, validation)?);
        }

        Ok(written)
    }
}

fn score_pairs(sorted: &[(Arc<str>, f64)]) -> Vec<(&str, f64)> {
    sorted.iter().map(|(label, score)| (label.as_ref(), *score)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_write_document_layout() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = ArtifactWriter::new(dir.path());

        let edges = vec![WeightedEdge::new("the cat", "cat sat", 2.0)];
        let scores = vec![(Arc::from("cat sat"), 0.6), (Arc::from("the cat"), 0.4)];
        let summaries = vec!["the cat sat".to_string()];

        let written = writer.write_document(
            "doc.json",
            &DocumentArtifacts {
                graph: Some(edges.as_slice()),
                authority: &scores,
                trust: &scores,
                filtered_graph: &edges,
                summaries: &summaries,
                validation: None,
            },
        )?;

        assert_eq!(written.len(), 5);
        assert!(dir.path().join("graph/graph_doc.json").is_file());
        assert!(dir.path().join("graph/filtered_graph_doc.json").is_file());
        assert!(!dir.path().join("validation").exists());

        let ranks: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("trustrank/trustrank_doc.json"))?)?;
        assert_eq!(ranks[0][0], "cat sat");
        assert_eq!(ranks[1][1], 0.4);

        let summary: Vec<String> =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary/summary_doc.json"))?)?;
        assert_eq!(summary, summaries);
        Ok(())
    }

    #[test]
    fn test_write_json_overwrites() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = ArtifactWriter::new(dir.path());

        writer.write_json("summary", "summary", "a.json", &["old"])?;
        let path = writer.write_json("summary", "summary", "a.json", &["new"])?;

        let content: Vec<String> = serde_json::from_str(&fs::read_to_string(path)?)?;
        assert_eq!(content, vec!["new"]);
        Ok(())
    }
}
