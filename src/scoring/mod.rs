//! Reference-based quality scoring of candidate summaries.

mod rouge;

pub use rouge::{rouge1, rouge2, rouge_l, rouge_n, validate, RougeScore, ValidationResult};
