//! End-to-end summarization of one document.
//!
//! ```text
//! JSON → texts → weighted n-gram edges → WordGraph
//!      → InverseRanker → top-K seeds → TrustRanker
//!      → threshold filter → filtered WordGraph → extraction forest → candidates
//!      → (ROUGE validation) → artifacts
//! ```
//!
//! [`Summarizer`] is the pure core working on edges; [`process_document`]
//! wraps it with file IO, validation and persistence.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::discovery::file_name;
use crate::extraction::extract_summaries;
use crate::graph::{GraphError, NgramGraph, WordGraph};
use crate::output::{ArtifactWriter, DocumentArtifacts};
use crate::ranking::{InverseRanker, RankOutcome, TrustRanker};
use crate::scoring::{validate, ValidationResult};
use crate::text::{collect_texts, read_document, weighted_edges};
use crate::types::{RankingConfig, WeightedEdge};

/// Everything the core computes for one edge list.
#[derive(Debug, Clone)]
pub struct Summary {
    pub graph: WordGraph,
    pub authority: RankOutcome,
    pub trust: RankOutcome,
    pub filtered_edges: Vec<WeightedEdge>,
    pub summaries: Vec<String>,
    pub timings: StageTimings,
}

/// Wall time per stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub preprocess: Duration,
    pub graph: Duration,
    pub authority: Duration,
    pub trust: Duration,
    pub extraction: Duration,
    pub validation: Duration,
    pub output: Duration,
}

/// Graph → ranking → filtering → extraction, with no IO.
pub struct Summarizer {
    config: RankingConfig,
}

impl Summarizer {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Run the core pipeline on a weighted edge list.
    ///
    /// Fails only if an edge carries an invalid weight.
    pub fn summarize(&self, edges: Vec<WeightedEdge>) -> Result<Summary, GraphError> {
        let mut timings = StageTimings::default();

        let start = Instant::now();
        let graph = WordGraph::from_edges(edges)?;
        timings.graph = start.elapsed();
        tracing::debug!(nodes = graph.node_count(), edges = graph.edge_count(), "graph built");

        let start = Instant::now();
        let authority = InverseRanker::new(self.config.clone()).rank(&graph);
        timings.authority = start.elapsed();

        let start = Instant::now();
        let trust_ranker = TrustRanker::new(self.config.clone());
        let trust = trust_ranker.rank(&graph, &authority);
        let filtered_edges = trust_ranker.filter_graph(&graph, &trust.scores);
        timings.trust = start.elapsed();

        let start = Instant::now();
        // Edges already passed validation above
        let filtered_graph = WordGraph::from_edges(filtered_edges.iter().cloned())?;
        let summaries = extract_summaries(&filtered_graph, &trust.scores, &self.config);
        timings.extraction = start.elapsed();

        tracing::debug!(
            filtered_edges = filtered_edges.len(),
            candidates = summaries.len(),
            "extraction finished"
        );

        Ok(Summary {
            graph,
            authority,
            trust,
            filtered_edges,
            summaries,
            timings,
        })
    }
}

/// Outcome of processing one dataset document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub name: String,
    pub summary: Summary,
    pub validation: Option<Vec<ValidationResult>>,
    pub elapsed: Duration,
}

impl DocumentReport {
    /// Highest ROUGE-L candidate, if validation ran and produced any.
    pub fn best(&self) -> Option<&ValidationResult> {
        self.validation.as_ref().and_then(|v| v.first())
    }
}

/// Load reference summaries: a JSON object of document name → text.
pub fn load_references(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read validation file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Validation file {} is not a name → text object", path.display()))
}

/// Summarize one document file, validate against `reference` when given,
/// and persist artifacts through `writer` when given.
pub fn process_document(
    path: &Path,
    config: &Config,
    reference: Option<&str>,
    writer: Option<&ArtifactWriter>,
) -> Result<DocumentReport> {
    let start = Instant::now();
    let name = file_name(path);

    let prep_start = Instant::now();
    let document = read_document(path)?;
    let texts = collect_texts(&document, &config.target_data_key);
    if texts.is_empty() {
        tracing::warn!(document = %name, key = %config.target_data_key.join("."), "no text found under target key");
    }
    let edges = weighted_edges(&texts, config.ranking.window);
    let preprocess = prep_start.elapsed();

    let mut summary = Summarizer::new(config.ranking.clone())
        .summarize(edges)
        .with_context(|| format!("Failed to build graph for {}", name))?;
    summary.timings.preprocess = preprocess;

    let validation_start = Instant::now();
    let validation = reference.map(|reference| validate(&summary.summaries, reference));
    summary.timings.validation = validation_start.elapsed();

    if let Some(writer) = writer {
        let output_start = Instant::now();
        let graph_edges = config.output_graph.then(|| summary.graph.edges());
        let authority = summary.authority.sorted();
        let trust = summary.trust.sorted();

        writer.write_document(
            &name,
            &DocumentArtifacts {
                graph: graph_edges.as_deref(),
                authority: &authority,
                trust: &trust,
                filtered_graph: &summary.filtered_edges,
                summaries: &summary.summaries,
                validation: validation.as_deref(),
            },
        )?;
        summary.timings.output = output_start.elapsed();
    }

    Ok(DocumentReport {
        name,
        summary,
        validation,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_summarize_line_graph() {
        let config = RankingConfig {
            root_amount: 3,
            ..Default::default()
        };
        let summary = Summarizer::new(config)
            .summarize(weighted_edges(["The cat sat down."], 2))
            .unwrap();

        assert_eq!(summary.graph.node_count(), 3);
        assert!((summary.authority.total() - 1.0).abs() < 1e-6);
        assert_eq!(summary.filtered_edges.len(), 2);
        // Trust accumulates downstream, so the sink is the first root
        assert_eq!(
            summary.summaries,
            vec!["sat down", "cat sat down", "the cat sat down"]
        );
    }

    #[test]
    fn test_summarize_empty_input() {
        let summary = Summarizer::new(RankingConfig::default())
            .summarize(Vec::new())
            .unwrap();

        assert!(summary.authority.is_empty());
        assert!(summary.trust.is_empty());
        assert!(summary.summaries.is_empty());
    }

    #[test]
    fn test_summarize_rejects_bad_weight() {
        let result = Summarizer::new(RankingConfig::default())
            .summarize(vec![WeightedEdge::new("a b", "b c", -2.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_process_document_with_validation() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let doc = dir.path().join("story.json");
        fs::write(
            &doc,
            r#"[{"full_text": "the cat sat on the mat"}, {"full_text": "the cat sat down"}]"#,
        )?;

        let config = Config::with_base(dir.path());
        let writer = ArtifactWriter::new(&config.output_dir);
        let report = process_document(&doc, &config, Some("the cat sat on the mat"), Some(&writer))?;

        assert_eq!(report.name, "story.json");
        assert!(!report.summary.summaries.is_empty());
        assert!(report.best().is_some());
        assert!(config.output_dir.join("summary/summary_story.json").is_file());
        assert!(config.output_dir.join("validation/validation_story.json").is_file());
        assert!(config.output_dir.join("graph/graph_story.json").is_file());
        Ok(())
    }

    #[test]
    fn test_load_references() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("validation.json");
        fs::write(&path, r#"{"a.json": "reference one"}"#)?;

        let refs = load_references(&path)?;
        assert_eq!(refs["a.json"], "reference one");

        fs::write(&path, "[1, 2]")?;
        assert!(load_references(&path).is_err());
        Ok(())
    }
}
