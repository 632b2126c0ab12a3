//! Output rendering for the end-of-run report.
//!
//! - Summary table: one row per document with best ROUGE F-measures and time
//! - Best summarization: the top validated candidate per document
//!
//! All styling goes through [`Palette`] so `--no-color` yields plain text.

mod colors;
mod report;

pub use colors::Palette;
pub use report::{format_runtime, ReportRenderer, RunEntry};
