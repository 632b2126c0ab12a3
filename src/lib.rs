//! gramrank - graph-based extractive summarization
//!
//! Builds a weighted graph of overlapping word n-grams, ranks it twice with
//! power iteration, and walks the trusted part of the graph to assemble
//! candidate summaries.
//!
//! # Architecture
//!
//! ```text
//! Texts → N-gram Edges → Graph → Authority → Trust → Filter → Extraction → Candidates
//!   ↓          ↓           ↓         ↓          ↓        ↓          ↓            ↓
//!  serde    sliding     petgraph  uniform    top-K    both ends   BFS forest   ROUGE
//!  _json    window      DiGraph   teleport   seeds    > threshold  (rayon)    + JSON
//! ```
//!
//! # Core entry points
//!
//! - [`graph::WordGraph`]: the n-gram graph, duplicate edges merge by weight
//! - [`ranking::InverseRanker`] / [`ranking::TrustRanker`]: the two passes
//! - [`extraction::extract_summaries`]: forest construction and decoding
//! - [`pipeline::Summarizer`]: all of the above on an edge list

pub mod config;
pub mod discovery;
pub mod extraction;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod ranking;
pub mod rendering;
pub mod scoring;
pub mod text;
pub mod types;

// Re-export core types
pub use types::{RankScores, RankingConfig, WeightedEdge};

pub use graph::{GraphError, NgramGraph, WordGraph};
pub use ranking::{InverseRanker, RankOutcome, TrustRanker, DAMPING};
pub use extraction::{decode_path, extract_summaries, ExtractionTree};
pub use pipeline::{Summarizer, Summary};
