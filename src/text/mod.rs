//! Text preprocessing: JSON documents to weighted n-gram edges.

mod document;
mod ngrams;

pub use document::{collect_texts, read_document};
pub use ngrams::{ngrams, tokenize, weighted_edges};
