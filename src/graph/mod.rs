//! Weighted directed n-gram graph.
//!
//! Nodes are opaque n-gram labels, edges carry positive co-occurrence
//! weights. Repeated (from, to) pairs merge by summing weight.

mod error;
mod word_graph;

pub use error::GraphError;
pub use word_graph::{NgramGraph, WordGraph};
