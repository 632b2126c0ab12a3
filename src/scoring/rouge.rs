//! ROUGE scores for comparing candidate summaries to a reference.
//!
//! ## Metrics Overview
//!
//! | Metric  | What it measures                              | Range   |
//! |---------|-----------------------------------------------|---------|
//! | ROUGE-1 | Unigram overlap                               | 0.0-1.0 |
//! | ROUGE-2 | Bigram overlap                                | 0.0-1.0 |
//! | ROUGE-L | Longest common subsequence of tokens          | 0.0-1.0 |
//!
//! Each metric reports precision (relative to the candidate), recall
//! (relative to the reference) and their harmonic mean. Tokens come from
//! [`crate::text::tokenize`], so scoring is case-insensitive and ignores
//! punctuation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::tokenize;

/// Precision / recall / F1 triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScore {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f-measure")]
    pub f_measure: f64,
}

impl RougeScore {
    fn from_counts(hits: usize, candidate_total: usize, reference_total: usize) -> Self {
        let precision = if candidate_total == 0 {
            0.0
        } else {
            hits as f64 / candidate_total as f64
        };
        let recall = if reference_total == 0 {
            0.0
        } else {
            hits as f64 / reference_total as f64
        };
        let f_measure = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            precision,
            recall,
            f_measure,
        }
    }
}

/// All three scores for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub text: String,
    pub rouge1: RougeScore,
    pub rouge2: RougeScore,
    #[serde(rename = "rougeL")]
    pub rouge_l: RougeScore,
}

/// ROUGE-N over token n-grams (clipped multiset overlap).
pub fn rouge_n(candidate: &str, reference: &str, n: usize) -> RougeScore {
    let cand_tokens = tokenize(candidate);
    let ref_tokens = tokenize(reference);
    let cand = gram_counts(&cand_tokens, n);
    let refr = gram_counts(&ref_tokens, n);

    let hits = cand
        .iter()
        .map(|(gram, &count)| count.min(refr.get(gram).copied().unwrap_or(0)))
        .sum();

    RougeScore::from_counts(hits, cand.values().sum(), refr.values().sum())
}

pub fn rouge1(candidate: &str, reference: &str) -> RougeScore {
    rouge_n(candidate, reference, 1)
}

pub fn rouge2(candidate: &str, reference: &str) -> RougeScore {
    rouge_n(candidate, reference, 2)
}

/// ROUGE-L from the longest common token subsequence.
pub fn rouge_l(candidate: &str, reference: &str) -> RougeScore {
    let cand = tokenize(candidate);
    let refr = tokenize(reference);
    RougeScore::from_counts(lcs_len(&cand, &refr), cand.len(), refr.len())
}

/// Score every candidate and order by ROUGE-L F-measure, best first.
/// Equal scores keep candidate order.
pub fn validate(candidates: &[String], reference: &str) -> Vec<ValidationResult> {
    let mut results: Vec<ValidationResult> = candidates
        .iter()
        .map(|text| ValidationResult {
            text: text.clone(),
            rouge1: rouge1(text, reference),
            rouge2: rouge2(text, reference),
            rouge_l: rouge_l(text, reference),
        })
        .collect();

    results.sort_by(|a, b| b.rouge_l.f_measure.total_cmp(&a.rouge_l.f_measure));
    results
}

fn gram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Rolling single-row LCS table.
fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diag = 0;
        for (j, y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}
