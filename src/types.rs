//! Core types for gramrank.
//!
//! Key design decisions:
//! - `Arc<str>` labels so graph nodes, rank maps and trees share one allocation
//! - Rank maps are plain `HashMap`s; ordering is derived on demand by
//!   [`sorted_scores`] with a deterministic tie-break on the label
//! - All tuning knobs live in [`RankingConfig`], passed explicitly to each stage

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde helpers for Arc<str> fields
mod arc_str_serde {
    use super::*;

    pub fn serialize<S>(arc: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(arc.as_ref())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

/// A directed, weighted link between two n-gram labels.
///
/// This is the unit exchanged at every boundary: the text stage produces
/// them, the graph consumes them, and the trust filter emits a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    #[serde(with = "arc_str_serde")]
    pub from: Arc<str>,
    #[serde(with = "arc_str_serde")]
    pub to: Arc<str>,
    pub weight: f64,
}

impl WeightedEdge {
    pub fn new(from: impl Into<Arc<str>>, to: impl Into<Arc<str>>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Score per node label. Absent labels score 0.
pub type RankScores = HashMap<Arc<str>, f64>;

/// Look up a score, defaulting to 0 for unknown labels.
pub fn score_of(scores: &RankScores, label: &str) -> f64 {
    scores.get(label).copied().unwrap_or(0.0)
}

/// Order two (label, score) entries: descending score, then ascending label.
pub fn by_score_desc(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Sorted view of a rank map, highest score first.
pub fn sorted_scores(scores: &RankScores) -> Vec<(Arc<str>, f64)> {
    let mut sorted: Vec<(Arc<str>, f64)> = scores
        .iter()
        .map(|(label, &score)| (Arc::clone(label), score))
        .collect();
    sorted.sort_by(|a, b| by_score_desc((&a.0, a.1), (&b.0, b.1)));
    sorted
}

/// Parameters for ranking, filtering and extraction.
///
/// Damping is not configurable; both passes use [`crate::ranking::DAMPING`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Convergence tolerance on the max per-node score change
    pub epsilon: f64,
    /// Iteration cap for the authority (inverse-rank) pass
    pub max_iterations: usize,
    /// Iteration cap for the trust pass
    pub trust_max_iterations: usize,
    /// Number of top authority nodes used as trust seeds
    pub bias_amount: usize,
    /// Nodes at or below this trust score are dropped from the filtered graph
    pub filter_threshold: f64,
    /// Number of extraction roots
    pub root_amount: usize,
    /// Maximum words per decoded candidate (None = unbounded).
    ///
    /// Bounds tree depth to `max_summary_length - window`. A root alone
    /// still decodes to `window` words, so caps below `window` act as
    /// `window`.
    pub max_summary_length: Option<usize>,
    /// Tokens per n-gram node
    pub window: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            max_iterations: 200,
            trust_max_iterations: 20,
            bias_amount: 5,
            filter_threshold: 1e-3,
            root_amount: 5,
            max_summary_length: None,
            window: 2,
        }
    }
}
