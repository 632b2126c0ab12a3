//! Trust ranking: authority propagation biased toward a trusted seed set.
//!
//! Same power iteration as [`super::InverseRanker`], but teleportation (and
//! dangling mass) lands only on the seeds, the top `bias_amount` nodes by
//! authority. Trust therefore flows outward from the seeds along existing
//! edges; nodes unreachable from the seeds end up with zero trust.
//!
//! The trust vector is then used to cut the graph down to edges whose
//! endpoints both clear `filter_threshold`.

use std::sync::Arc;

use crate::graph::{NgramGraph, WordGraph};
use crate::types::{score_of, RankScores, RankingConfig, WeightedEdge};

use super::power::{power_iterate, RankOutcome};

/// Seed-biased ranker.
pub struct TrustRanker {
    config: RankingConfig,
}

impl TrustRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Pick the seed set from an authority ranking.
    ///
    /// Takes the first `bias_amount` labels of the descending-sorted scores,
    /// clamped to however many nodes were scored.
    pub fn seeds(&self, authority: &RankOutcome) -> Vec<Arc<str>> {
        authority
            .sorted()
            .into_iter()
            .take(self.config.bias_amount)
            .map(|(label, _)| label)
            .collect()
    }

    /// Compute trust scores seeded from the top authority nodes.
    pub fn rank(&self, graph: &WordGraph, authority: &RankOutcome) -> RankOutcome {
        let seeds = self.seeds(authority);
        self.rank_with_seeds(graph, &seeds)
    }

    /// Compute trust scores for an explicit seed set.
    ///
    /// Seeds missing from the graph are ignored. With no usable seeds the
    /// teleport vector falls back to uniform.
    pub fn rank_with_seeds(&self, graph: &WordGraph, seeds: &[Arc<str>]) -> RankOutcome {
        let n = graph.inner().node_count();

        let mut seed_indices: Vec<usize> = seeds
            .iter()
            .filter_map(|label| graph.index_of(label))
            .map(|idx| idx.index())
            .collect();
        seed_indices.sort_unstable();
        seed_indices.dedup();

        let teleport = if seed_indices.is_empty() {
            if n > 0 {
                tracing::warn!("no trust seeds present in graph, using uniform teleportation");
            }
            vec![1.0 / n.max(1) as f64; n]
        } else {
            let share = 1.0 / seed_indices.len() as f64;
            let mut teleport = vec![0.0; n];
            for idx in &seed_indices {
                teleport[*idx] = share;
            }
            teleport
        };

        tracing::debug!(seeds = seed_indices.len(), nodes = n, "trust ranking");

        let outcome = power_iterate(
            graph,
            &teleport,
            self.config.epsilon,
            self.config.trust_max_iterations,
        );

        if !outcome.converged {
            tracing::warn!(
                iterations = outcome.iterations,
                epsilon = self.config.epsilon,
                "trust ranking hit iteration cap before converging"
            );
        }

        outcome
    }

    /// Edges of `graph` whose endpoints both score above `filter_threshold`.
    pub fn filter_graph<G: NgramGraph>(&self, graph: &G, trust: &RankScores) -> Vec<WeightedEdge> {
        filter_edges(&graph.edges(), trust, self.config.filter_threshold)
    }
}

/// Keep edges where both `trust[from]` and `trust[to]` exceed `threshold`.
///
/// Labels with no trust entry count as 0. Input order is preserved.
pub fn filter_edges(edges: &[WeightedEdge], trust: &RankScores, threshold: f64) -> Vec<WeightedEdge> {
    edges
        .iter()
        .filter(|e| score_of(trust, &e.from) > threshold && score_of(trust, &e.to) > threshold)
        .cloned()
        .collect()
}
