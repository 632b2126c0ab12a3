//! Weighted n-gram graph storage.
//!
//! The graph only stores edges; it does not care whether they came from
//! sliding-window text or anywhere else. Ranking and extraction consume it.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::sync::Arc;

use super::GraphError;
use crate::types::WeightedEdge;

/// Operations every n-gram graph backend provides.
pub trait NgramGraph {
    /// Insert (from, to, weight) triples, creating nodes as needed and
    /// summing the weight of repeated pairs. Rejects the whole batch if any
    /// weight is non-positive or non-finite.
    fn insert_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = WeightedEdge>;

    /// Outgoing (neighbor, weight) pairs. Empty for sinks and unknown labels.
    fn neighbors(&self, label: &str) -> Vec<(Arc<str>, f64)>;

    /// All node labels in insertion order.
    fn nodes(&self) -> Vec<Arc<str>>;

    /// All merged edges in insertion order.
    fn edges(&self) -> Vec<WeightedEdge>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

/// Directed n-gram graph backed by petgraph.
///
/// Labels are mapped to dense `NodeIndex` values once at insertion time so
/// ranking and traversal can work on indices instead of strings.
/// Node indices are contiguous `0..node_count()` because nothing is removed.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    /// The underlying directed graph
    graph: DiGraph<Arc<str>, f64>,
    /// Fast lookup: label -> NodeIndex
    index: HashMap<Arc<str>, NodeIndex>,
}

impl WordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a batch of edges.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = WeightedEdge>,
    {
        let mut graph = Self::new();
        graph.insert_edges(edges)?;
        Ok(graph)
    }

    /// Add a node, returns its index.
    /// Idempotent - returns existing index if already present.
    fn add_node(&mut self, label: &Arc<str>) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(Arc::clone(label));
        self.index.insert(Arc::clone(label), idx);
        idx
    }

    /// Node index for a label (if present)
    pub fn index_of(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    /// Label by index
    pub fn label(&self, idx: NodeIndex) -> Option<&Arc<str>> {
        self.graph.node_weight(idx)
    }

    /// Outgoing (target, weight) pairs by index, in insertion order.
    pub fn out_edges(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        // petgraph yields outgoing edges newest-first
        let mut out: Vec<(NodeIndex, f64)> = self
            .graph
            .edges(idx)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        out.reverse();
        out
    }

    /// Access underlying petgraph for algorithms
    pub fn inner(&self) -> &DiGraph<Arc<str>, f64> {
        &self.graph
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl NgramGraph for WordGraph {
    fn insert_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = WeightedEdge>,
    {
        let edges: Vec<WeightedEdge> = edges.into_iter().collect();

        if let Some(bad) = edges
            .iter()
            .find(|e| !e.weight.is_finite() || e.weight <= 0.0)
        {
            return Err(GraphError::InvalidWeight {
                from: Arc::clone(&bad.from),
                to: Arc::clone(&bad.to),
                weight: bad.weight,
            });
        }

        for edge in edges {
            let from = self.add_node(&edge.from);
            let to = self.add_node(&edge.to);
            match self.graph.find_edge(from, to) {
                Some(existing) => self.graph[existing] += edge.weight,
                None => {
                    self.graph.add_edge(from, to, edge.weight);
                }
            }
        }

        Ok(())
    }

    fn neighbors(&self, label: &str) -> Vec<(Arc<str>, f64)> {
        let Some(idx) = self.index_of(label) else {
            return vec![];
        };
        self.out_edges(idx)
            .into_iter()
            .map(|(target, weight)| (Arc::clone(&self.graph[target]), weight))
            .collect()
    }

    fn nodes(&self) -> Vec<Arc<str>> {
        self.graph.node_weights().cloned().collect()
    }

    fn edges(&self) -> Vec<WeightedEdge> {
        self.graph
            .edge_references()
            .map(|e| WeightedEdge {
                from: Arc::clone(&self.graph[e.source()]),
                to: Arc::clone(&self.graph[e.target()]),
                weight: *e.weight(),
            })
            .collect()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
