//! End-of-run report: summary table and best summaries.
//!
//! ```text
//! No.  File          Best ROUGE F (1, 2, L)   Time (ms)
//! 1    news_1.json   0.615, 0.333, 0.538      12.40
//! 2    news_2.json   -, -, -                  3.05
//!
//! Best summarization:
//!
//! 1.) news_1.json                   : The cat sat on the mat.
//! 2.) news_2.json                   : -
//! ```
//!
//! Columns are padded before styling so ANSI codes never skew alignment.

use std::time::Duration;

use crate::scoring::ValidationResult;

use super::colors::Palette;

const HEADERS: [&str; 4] = ["No.", "File", "Best ROUGE F (1, 2, L)", "Time (ms)"];
const COLUMN_GAP: usize = 3;
const NAME_WIDTH: usize = 30;

/// One processed document as seen by the report.
#[derive(Debug, Clone)]
pub struct RunEntry<'a> {
    pub name: &'a str,
    /// Best validated candidate. None when validation was skipped or the
    /// document failed.
    pub best: Option<&'a ValidationResult>,
    pub elapsed: Duration,
    pub failed: bool,
}

/// Renders the run report as text.
pub struct ReportRenderer {
    palette: Palette,
}

impl ReportRenderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Left-aligned table of every document in run order.
    pub fn summary_table(&self, entries: &[RunEntry<'_>]) -> String {
        let rows: Vec<[String; 4]> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                [
                    (i + 1).to_string(),
                    entry.name.to_string(),
                    score_cell(entry.best),
                    format!("{:.2}", entry.elapsed.as_secs_f64() * 1e3),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| self.palette.header(&pad(h, w)))
            .collect();
        push_line(&mut out, &header);

        for (row, entry) in rows.iter().zip(entries) {
            let [no, name, scores, time] = row;
            let scores_cell = match entry.best {
                Some(best) => self.palette.score(&pad(scores, widths[2]), best.rouge_l.f_measure),
                None if entry.failed => self.palette.error(&pad("failed", widths[2])),
                None => self.palette.dim(&pad(scores, widths[2])),
            };
            let cells = [
                pad(no, widths[0]),
                self.palette.file_name(&pad(name, widths[1])),
                scores_cell,
                self.palette.dim(&pad(time, widths[3])),
            ];
            push_line(&mut out, &cells);
        }

        out
    }

    /// Best candidate per document, capitalized and terminated with a period.
    pub fn best_summaries(&self, entries: &[RunEntry<'_>]) -> String {
        let mut out = format!("{}\n\n", self.palette.header("Best summarization:"));

        for (i, entry) in entries.iter().enumerate() {
            let text = match entry.best {
                Some(best) => sentence(&best.text),
                None => self.palette.dim("-"),
            };
            out.push_str(&format!(
                "{}.) {}: {}\n\n",
                i + 1,
                self.palette.file_name(&pad(entry.name, NAME_WIDTH)),
                text
            ));
        }

        out
    }
}

/// Total wall time, switching to seconds past ten seconds.
pub fn format_runtime(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1e3;
    if ms < 1e4 {
        format!("{:.2} ms", ms)
    } else {
        format!("{:.3} s", ms / 1e3)
    }
}

fn score_cell(best: Option<&ValidationResult>) -> String {
    match best {
        Some(best) => format!(
            "{:.3}, {:.3}, {:.3}",
            best.rouge1.f_measure, best.rouge2.f_measure, best.rouge_l.f_measure
        ),
        None => "-, -, -".to_string(),
    }
}

fn sentence(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => "-".to_string(),
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

fn push_line(out: &mut String, cells: &[String]) {
    let line = cells.join(&" ".repeat(COLUMN_GAP));
    out.push_str(line.trim_end());
    out.push('\n');
}
