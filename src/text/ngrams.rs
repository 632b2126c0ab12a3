//! Sliding-window n-grams and weighted chain edges.
//!
//! ```text
//! "The cat sat down"  →  [the, cat, sat, down]
//!                     →  ["the cat", "cat sat", "sat down"]        (window = 2)
//!                     →  "the cat"→"cat sat", "cat sat"→"sat down"  (weight = count)
//! ```
//!
//! Consecutive n-grams overlap by `window - 1` tokens, which is what lets
//! extraction decode a path back into contiguous text.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::WeightedEdge;

/// Lowercase word tokens. Apostrophes stay inside words ("don't").
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Space-joined n-grams of `window` tokens each.
/// Empty when there are fewer tokens than `window` or `window` is 0.
pub fn ngrams(tokens: &[String], window: usize) -> Vec<String> {
    if window == 0 {
        return Vec::new();
    }
    tokens.windows(window).map(|w| w.join(" ")).collect()
}

/// Count n-gram chains across all texts and emit them as weighted edges.
///
/// Chains never span two texts. Output is sorted by weight descending,
/// then by labels, so it is stable for a given input set.
pub fn weighted_edges<I, S>(texts: I, window: usize) -> Vec<WeightedEdge>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<(Arc<str>, Arc<str>), usize> = HashMap::new();
    let mut interned: HashMap<String, Arc<str>> = HashMap::new();

    for text in texts {
        let grams = ngrams(&tokenize(text.as_ref()), window);
        let grams: Vec<Arc<str>> = grams
            .into_iter()
            .map(|g| {
                interned
                    .entry(g)
                    .or_insert_with_key(|k| Arc::from(k.as_str()))
                    .clone()
            })
            .collect();

        for pair in grams.windows(2) {
            *counts
                .entry((Arc::clone(&pair[0]), Arc::clone(&pair[1])))
                .or_insert(0) += 1;
        }
    }

    let mut edges: Vec<WeightedEdge> = counts
        .into_iter()
        .map(|((from, to), count)| WeightedEdge {
            from,
            to,
            weight: count as f64,
        })
        .collect();

    edges.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.from.cmp(&b.from))
            .then_with(|| a.to.cmp(&b.to))
    });

    edges
}
