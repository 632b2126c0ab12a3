//! Weighted power iteration shared by both ranking passes.
//!
//! ```text
//! R(v) = (1-d) * t[v] + d * Σ R(u) * w(u→v) / W(u)  +  d * D * t[v]
//!                          u → v
//! ```
//!
//! Where:
//! - d = [`DAMPING`] (0.85)
//! - t = teleportation distribution (uniform, or concentrated on seeds)
//! - W(u) = total outgoing weight of u
//! - D = total score currently held by dangling nodes (W(u) = 0)
//!
//! Dangling mass is re-injected along `t`, so the vector keeps summing to 1
//! whenever `t` does. Iterates until the largest per-node change drops
//! below epsilon or the iteration cap is hit.

use std::sync::Arc;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::WordGraph;
use crate::types::{sorted_scores, RankScores};

/// Damping factor for both ranking passes.
pub const DAMPING: f64 = 0.85;

/// Result of one ranking pass.
#[derive(Debug, Clone, Default)]
pub struct RankOutcome {
    pub scores: RankScores,
    pub iterations: usize,
    /// False when the iteration cap was reached first. Not an error: the
    /// last vector is still returned.
    pub converged: bool,
}

impl RankOutcome {
    /// Scores ordered by descending value, ties by label.
    pub fn sorted(&self) -> Vec<(Arc<str>, f64)> {
        sorted_scores(&self.scores)
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Run power iteration over `graph` with the given teleport vector.
///
/// `teleport` is indexed by node index and must have `node_count()` entries.
pub(crate) fn power_iterate(
    graph: &WordGraph,
    teleport: &[f64],
    epsilon: f64,
    max_iterations: usize,
) -> RankOutcome {
    let inner = graph.inner();
    let n = inner.node_count();

    if n == 0 {
        return RankOutcome {
            scores: RankScores::new(),
            iterations: 0,
            converged: true,
        };
    }
    debug_assert_eq!(teleport.len(), n);

    let out_weight: Vec<f64> = inner
        .node_indices()
        .map(|idx| inner.edges(idx).map(|e| *e.weight()).sum())
        .collect();

    let mut ranks = vec![1.0 / n as f64; n];
    let mut new_ranks = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iterations {
        iterations += 1;

        let dangling_sum: f64 = (0..n)
            .filter(|&u| out_weight[u] == 0.0)
            .map(|u| ranks[u])
            .sum();

        for (v, slot) in new_ranks.iter_mut().enumerate() {
            *slot = (1.0 - DAMPING) * teleport[v] + DAMPING * dangling_sum * teleport[v];
        }

        for u in 0..n {
            if out_weight[u] == 0.0 {
                continue;
            }
            let share = DAMPING * ranks[u] / out_weight[u];
            for edge in inner.edges(NodeIndex::new(u)) {
                new_ranks[edge.target().index()] += share * edge.weight();
            }
        }

        let max_change = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0_f64, f64::max);

        std::mem::swap(&mut ranks, &mut new_ranks);

        if max_change < epsilon {
            converged = true;
            break;
        }
    }

    tracing::debug!(nodes = n, iterations, converged, "power iteration finished");

    let scores = inner
        .node_indices()
        .map(|idx| (Arc::clone(&inner[idx]), ranks[idx.index()]))
        .collect();

    RankOutcome {
        scores,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightedEdge;

    fn chain_with_sink() -> WordGraph {
        // c d has in-edges only
        WordGraph::from_edges(vec![
            WeightedEdge::new("a b", "b c", 1.0),
            WeightedEdge::new("b c", "c d", 1.0),
            WeightedEdge::new("x y", "b c", 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_dangling_mass_is_conserved_every_iteration() {
        let graph = chain_with_sink();
        let n = graph.inner().node_count();
        let uniform = vec![1.0 / n as f64; n];

        for cap in 1..=6 {
            let outcome = power_iterate(&graph, &uniform, 0.0, cap);
            assert_eq!(outcome.iterations, cap);
            assert!(
                (outcome.total() - 1.0).abs() < 1e-12,
                "sum drifted to {} after {} iterations",
                outcome.total(),
                cap
            );
        }
    }

    #[test]
    fn test_zero_iterations_returns_initial_vector() {
        let graph = chain_with_sink();
        let n = graph.inner().node_count();
        let uniform = vec![1.0 / n as f64; n];

        let outcome = power_iterate(&graph, &uniform, 1e-5, 0);
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 0);
        for score in outcome.scores.values() {
            assert!((score - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_graph() {
        let outcome = power_iterate(&WordGraph::new(), &[], 1e-5, 100);
        assert!(outcome.is_empty());
        assert!(outcome.converged);
    }
}
