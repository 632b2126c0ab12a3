//! Authority ranking (inverse-rank) over the n-gram graph.
//!
//! A node earns authority from the nodes pointing to it, each pointer
//! splitting its score across its out-edges in proportion to edge weight.
//! Teleportation is uniform, so the result is a probability distribution
//! over every node.

use crate::graph::WordGraph;
use crate::types::RankingConfig;

use super::power::{power_iterate, RankOutcome};

/// Authority ranker using uniform teleportation.
pub struct InverseRanker {
    config: RankingConfig,
}

impl InverseRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Compute authority scores for all nodes.
    ///
    /// Scores sum to ≈1.0. Runs at most `config.max_iterations` rounds.
    pub fn rank(&self, graph: &WordGraph) -> RankOutcome {
        let n = graph.inner().node_count();
        let teleport = vec![1.0 / n.max(1) as f64; n];

        let outcome = power_iterate(
            graph,
            &teleport,
            self.config.epsilon,
            self.config.max_iterations,
        );

        if !outcome.converged {
            tracing::warn!(
                iterations = outcome.iterations,
                epsilon = self.config.epsilon,
                "authority ranking hit iteration cap before converging"
            );
        }

        outcome
    }
}
