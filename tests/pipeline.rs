//! End-to-end runs over a small JSON dataset.

use std::fs;

use anyhow::Result;
use serde_json::Value;

use gramrank::config::Config;
use gramrank::output::ArtifactWriter;
use gramrank::pipeline::process_document;
use gramrank::text::weighted_edges;
use gramrank::{NgramGraph, RankingConfig, Summarizer};

const DOCUMENT: &str = r#"[
    {"id": 1, "full_text": "The storm hit the coast early on Monday."},
    {"id": 2, "full_text": "The storm hit the coast and knocked out power."},
    {"id": 3, "full_text": "Crews restored power to the coast by Tuesday."},
    {"id": 4, "full_text": "Residents said the storm hit harder than expected."}
]"#;

const REFERENCE: &str = "The storm hit the coast and knocked out power.";

#[test]
fn test_document_run_writes_consistent_artifacts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let doc = dir.path().join("storm.json");
    fs::write(&doc, DOCUMENT)?;

    let config = Config::with_base(dir.path());
    let writer = ArtifactWriter::new(&config.output_dir);
    let report = process_document(&doc, &config, Some(REFERENCE), Some(&writer))?;
    let summary = &report.summary;

    // Authority is a distribution over every node
    assert_eq!(summary.authority.scores.len(), summary.graph.node_count());
    assert!((summary.authority.total() - 1.0).abs() < 1e-6);

    // Filtered edges keep only trusted endpoints
    let threshold = config.ranking.filter_threshold;
    for edge in &summary.filtered_edges {
        assert!(summary.trust.scores[&edge.from] > threshold, "{edge:?}");
        assert!(summary.trust.scores[&edge.to] > threshold, "{edge:?}");
    }

    // Candidates are real word sequences from the document
    assert!(!summary.summaries.is_empty());
    for text in &summary.summaries {
        assert!(text.split(' ').count() >= config.ranking.window, "{text}");
        assert_eq!(text, &text.to_lowercase());
    }

    // Validation is sorted by ROUGE-L F-measure
    let validation = report.validation.as_ref().expect("validated");
    assert_eq!(validation.len(), summary.summaries.len());
    for pair in validation.windows(2) {
        assert!(pair[0].rouge_l.f_measure >= pair[1].rouge_l.f_measure);
    }
    assert!(report.best().is_some_and(|best| best.rouge_l.f_measure > 0.0));

    // Persisted files mirror the in-memory results
    let out = &config.output_dir;
    let ranks: Value =
        serde_json::from_str(&fs::read_to_string(out.join("trustrank/trustrank_storm.json"))?)?;
    assert_eq!(ranks.as_array().map(Vec::len), Some(summary.trust.scores.len()));

    let saved: Vec<String> =
        serde_json::from_str(&fs::read_to_string(out.join("summary/summary_storm.json"))?)?;
    assert_eq!(&saved, &summary.summaries);

    let filtered: Value =
        serde_json::from_str(&fs::read_to_string(out.join("graph/filtered_graph_storm.json"))?)?;
    assert_eq!(filtered.as_array().map(Vec::len), Some(summary.filtered_edges.len()));

    assert!(out.join("graph/graph_storm.json").is_file());
    assert!(out.join("inverse_pagerank/inverse_pagerank_storm.json").is_file());
    assert!(out.join("validation/validation_storm.json").is_file());
    Ok(())
}

#[test]
fn test_document_run_without_reference_or_writer() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let doc = dir.path().join("storm.json");
    fs::write(&doc, DOCUMENT)?;

    let config = Config::with_base(dir.path());
    let report = process_document(&doc, &config, None, None)?;

    assert!(report.validation.is_none());
    assert!(report.best().is_none());
    assert!(!config.output_dir.exists());
    Ok(())
}

#[test]
fn test_summary_length_cap() -> Result<()> {
    let texts: Vec<String> = DOCUMENT
        .lines()
        .filter_map(|line| line.split("\"full_text\": \"").nth(1))
        .map(|rest| rest.trim_end_matches(['}', ',', '"', ' ']).to_string())
        .collect();
    assert_eq!(texts.len(), 4);

    let config = RankingConfig {
        max_summary_length: Some(4),
        ..Default::default()
    };
    let summary = Summarizer::new(config).summarize(weighted_edges(&texts, 2))?;

    assert!(!summary.summaries.is_empty());
    for text in &summary.summaries {
        assert!(text.split(' ').count() <= 4, "{text}");
    }
    Ok(())
}

#[test]
fn test_missing_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_base(dir.path());
    let result = process_document(&dir.path().join("absent.json"), &config, None, None);
    assert!(result.is_err());
}
