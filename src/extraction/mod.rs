//! Candidate summary extraction from the trust-filtered graph.
//!
//! This module handles:
//! - Picking the top-trust nodes as independent roots
//! - Building one BFS [`ExtractionTree`] per root
//! - Decoding every root-to-leaf path back into text
//!
//! Trees share nothing but the read-only graph and trust map, so they are
//! built in parallel with rayon. Output stays root-major regardless.

mod tree;

pub use tree::{decode_path, ExtractionTree};

use std::sync::Arc;

use rayon::prelude::*;

use crate::graph::WordGraph;
use crate::types::{sorted_scores, RankScores, RankingConfig};

/// Top `root_amount` labels by trust, clamped to the number of scored nodes.
pub fn select_roots(trust: &RankScores, root_amount: usize) -> Vec<Arc<str>> {
    sorted_scores(trust)
        .into_iter()
        .take(root_amount)
        .map(|(label, _)| label)
        .collect()
}

/// Build one extraction tree per root, in root order.
pub fn build_forest(
    graph: &WordGraph,
    trust: &RankScores,
    config: &RankingConfig,
) -> Vec<ExtractionTree> {
    let roots = select_roots(trust, config.root_amount);
    // Caps below `window` still yield the root n-gram
    let max_depth = config
        .max_summary_length
        .map(|words| words.saturating_sub(config.window));

    tracing::debug!(roots = roots.len(), ?max_depth, "building extraction forest");

    roots
        .par_iter()
        .map(|root| ExtractionTree::build(graph, trust, root, max_depth))
        .collect()
}

/// Decoded candidate texts across all trees: root-major, then path order.
/// Identical texts from different roots are kept.
pub fn extract_summaries(
    graph: &WordGraph,
    trust: &RankScores,
    config: &RankingConfig,
) -> Vec<String> {
    build_forest(graph, trust, config)
        .iter()
        .flat_map(ExtractionTree::texts)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightedEdge;

    fn trust_of(pairs: &[(&str, f64)]) -> RankScores {
        pairs.iter().map(|(l, s)| (Arc::from(*l), *s)).collect()
    }

    #[test]
    fn test_select_roots_clamps_and_orders() {
        let trust = trust_of(&[("a b", 0.1), ("b c", 0.5), ("c d", 0.5)]);

        let roots = select_roots(&trust, 10);
        let labels: Vec<&str> = roots.iter().map(|r| r.as_ref()).collect();
        assert_eq!(labels, vec!["b c", "c d", "a b"]);

        assert_eq!(select_roots(&trust, 1).len(), 1);
        assert!(select_roots(&trust, 0).is_empty());
    }

    #[test]
    fn test_empty_graph_empty_forest() {
        let config = RankingConfig::default();
        let summaries = extract_summaries(&WordGraph::new(), &RankScores::new(), &config);
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_single_root_line_graph() {
        let graph = WordGraph::from_edges(vec![
            WeightedEdge::new("the cat", "cat sat", 1.0),
            WeightedEdge::new("cat sat", "sat down", 1.0),
        ])
        .unwrap();
        let trust = trust_of(&[("the cat", 0.6), ("cat sat", 0.3), ("sat down", 0.1)]);
        let config = RankingConfig {
            root_amount: 1,
            ..Default::default()
        };

        let forest = build_forest(&graph, &trust, &config);
        assert_eq!(forest.len(), 1);
        assert_eq!(
            extract_summaries(&graph, &trust, &config),
            vec!["the cat sat down"]
        );
    }

    #[test]
    fn test_root_major_order_keeps_duplicates() {
        let graph = WordGraph::from_edges(vec![
            WeightedEdge::new("a b", "b c", 1.0),
            WeightedEdge::new("x y", "y z", 1.0),
        ])
        .unwrap();
        // "q r" is trusted but has no edges in the filtered graph
        let trust = trust_of(&[("x y", 0.4), ("a b", 0.3), ("q r", 0.2), ("b c", 0.05)]);
        let config = RankingConfig {
            root_amount: 4,
            ..Default::default()
        };

        let summaries = extract_summaries(&graph, &trust, &config);
        assert_eq!(summaries, vec!["x y z", "a b c", "q r", "b c"]);
    }

    #[test]
    fn test_max_summary_length_bounds_words() {
        let graph = WordGraph::from_edges(vec![
            WeightedEdge::new("a b", "b c", 1.0),
            WeightedEdge::new("b c", "c d", 1.0),
            WeightedEdge::new("c d", "d e", 1.0),
        ])
        .unwrap();
        let trust = trust_of(&[("a b", 0.9)]);
        let config = RankingConfig {
            root_amount: 1,
            max_summary_length: Some(3),
            ..Default::default()
        };

        assert_eq!(extract_summaries(&graph, &trust, &config), vec!["a b c"]);
    }

    #[test]
    fn test_max_summary_length_below_window_keeps_root() {
        let graph = WordGraph::from_edges(vec![WeightedEdge::new("a b", "b c", 1.0)]).unwrap();
        let trust = trust_of(&[("a b", 0.9)]);
        let config = RankingConfig {
            root_amount: 1,
            max_summary_length: Some(1),
            ..Default::default()
        };

        // Depth saturates at 0; the root n-gram is never split
        assert_eq!(extract_summaries(&graph, &trust, &config), vec!["a b"]);
    }
}
