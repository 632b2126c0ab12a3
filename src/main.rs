//! gramrank CLI - graph-based extractive summarization
//!
//! Runs the full pipeline over every document in the dataset directory:
//!
//! 1. Discovery: list `.json` documents (or the ones named with --files)
//! 2. Text: collect texts, chain sliding-window n-grams into weighted edges
//! 3. Graph: build the n-gram graph
//! 4. Authority: inverse-rank power iteration with uniform teleportation
//! 5. Trust: power iteration seeded from the top authority nodes, then filter
//! 6. Extraction: BFS trees from the top trust nodes, decoded into candidates
//! 7. Validation: ROUGE against the reference summary, if one exists
//! 8. Output: JSON artifacts per document, then a summary report
//!
//! Progress goes to stderr, the report to stdout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gramrank::config::Config;
use gramrank::discovery::{file_name, find_documents};
use gramrank::output::ArtifactWriter;
use gramrank::pipeline::{load_references, process_document, DocumentReport};
use gramrank::rendering::{format_runtime, Palette, ReportRenderer, RunEntry};

/// Graph-based extractive summarization of JSON text collections
///
/// gramrank chains word n-grams into a weighted graph, ranks nodes by
/// authority, propagates trust from the strongest ones, and walks the
/// trusted subgraph to assemble candidate summaries.
///
/// Examples:
///   gramrank                              # Every document in the dataset
///   gramrank --files news_1.json          # One document
///   gramrank --exclude "draft_*.json"     # Skip drafts
///   gramrank --root ./corpus --no-color   # Other project, plain output
#[derive(Parser, Debug)]
#[command(name = "gramrank")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Process only these documents
    ///
    /// Names are looked up in the dataset directory; paths to existing
    /// files are used as-is.
    #[arg(short, long, value_name = "FILES", num_args = 1..)]
    pub files: Vec<String>,

    /// Skip these documents
    ///
    /// Accepts exact file names or glob patterns, added to the
    /// `exclude` list from gramrank.toml.
    #[arg(short, long, value_name = "FILES", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Project root directory
    ///
    /// gramrank.toml is searched here and in its ancestors. Relative
    /// paths in the config resolve against the config file.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Explicit config file (skips the gramrank.toml search)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress and report output
    ///
    /// Artifacts are still written. Errors and warnings are still shown.
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output
    ///
    /// Raises the log level to debug: iteration counts, graph sizes,
    /// forest construction. RUST_LOG overrides this.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    ///
    /// Useful for piping the report to files.
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = run(&cli)?;

    if !cli.quiet {
        print!("{}", report);
    }

    Ok(())
}

/// Install the fmt subscriber on stderr.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gramrank=debug" } else { "gramrank=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Process every selected document and return the rendered report.
fn run(cli: &Cli) -> Result<String> {
    let start = Instant::now();
    let progress = !cli.quiet;

    let root = cli.root.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to resolve root path '{}': {}",
            cli.root.display(),
            e
        )
    })?;

    let mut config = match cli.config {
        Some(ref path) => Config::load_file(path)?,
        None => Config::load(&root),
    };
    config.exclude.extend(cli.exclude.iter().cloned());

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 1: Discovery
    // ══════════════════════════════════════════════════════════════════════════
    let documents = select_documents(&cli.files, &config)?;

    if progress {
        eprintln!("📂 gramrank v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("{}", config.display_summary());
        eprintln!();
        eprintln!("Documents:");
        for (i, doc) in documents.iter().enumerate() {
            eprintln!("  {}.) {}", i + 1, file_name(doc));
        }
        eprintln!();
    }

    if documents.is_empty() {
        return Ok(format!(
            "No documents found in {}. Check dataset-dir and exclude settings.\n",
            config.dataset_dir.display()
        ));
    }

    let references = match config.validation_file {
        Some(ref path) => match load_references(path) {
            Ok(refs) => refs,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "validation disabled");
                HashMap::new()
            }
        },
        None => HashMap::new(),
    };

    let writer = ArtifactWriter::new(&config.output_dir);

    // ══════════════════════════════════════════════════════════════════════════
    // Stage 2-8: Per-document pipeline
    // ══════════════════════════════════════════════════════════════════════════
    let mut results: Vec<(String, Result<DocumentReport>, std::time::Duration)> = Vec::new();

    for (i, doc) in documents.iter().enumerate() {
        let name = file_name(doc);
        if progress {
            eprintln!("({}/{}) === {} ===", i + 1, documents.len(), name);
        }

        let doc_start = Instant::now();
        let reference = references.get(&name).map(String::as_str);
        let result = match process_document(doc, &config, reference, Some(&writer)) {
            Err(e) if config.stop_on_error => {
                return Err(e.context(format!("Stopped on {}", name)));
            }
            other => other,
        };
        let elapsed = doc_start.elapsed();

        match result {
            Ok(ref report) => {
                if progress {
                    print_progress(report);
                }
            }
            Err(ref e) => {
                eprintln!("✗ Error processing {}: {:#}", name, e);
            }
        }

        if progress {
            eprintln!("Calculation runtime: {}\n", format_runtime(elapsed));
        }
        results.push((name, result, elapsed));
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Report
    // ══════════════════════════════════════════════════════════════════════════
    let entries: Vec<RunEntry<'_>> = results
        .iter()
        .map(|(name, result, elapsed)| RunEntry {
            name,
            best: result.as_ref().ok().and_then(DocumentReport::best),
            elapsed: *elapsed,
            failed: result.is_err(),
        })
        .collect();

    let renderer = ReportRenderer::new(Palette::new(!cli.no_color));
    Ok(format!(
        "=== Summary ===\n\nTotal runtime: {}\n\n{}\n{}",
        format_runtime(start.elapsed()),
        renderer.summary_table(&entries),
        renderer.best_summaries(&entries)
    ))
}

/// Resolve `--files` against the dataset directory, or discover everything.
fn select_documents(files: &[String], config: &Config) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        return find_documents(&config.dataset_dir, config).with_context(|| {
            format!("Failed to list dataset {}", config.dataset_dir.display())
        });
    }

    Ok(files
        .iter()
        .filter(|name| !config.matches_exclude(name))
        .map(|name| {
            let path = Path::new(name);
            if path.is_file() {
                path.to_path_buf()
            } else {
                config.dataset_dir.join(name)
            }
        })
        .collect())
}

fn print_progress(report: &DocumentReport) {
    let summary = &report.summary;
    let t = &summary.timings;

    eprintln!("✓ Preprocessed text ({:.2?})", t.preprocess);
    eprintln!(
        "✓ Built graph: {} nodes, {} edges ({:.2?})",
        summary.graph.inner().node_count(),
        summary.graph.inner().edge_count(),
        t.graph
    );
    eprintln!(
        "✓ Authority ranking: sum {:.4}, {} iterations ({:.2?})",
        summary.authority.total(),
        summary.authority.iterations,
        t.authority
    );
    eprintln!(
        "✓ Trust ranking: {} iterations, {} edges kept ({:.2?})",
        summary.trust.iterations,
        summary.filtered_edges.len(),
        t.trust
    );
    eprintln!(
        "✓ Extracted {} candidates ({:.2?})",
        summary.summaries.len(),
        t.extraction
    );
    match report.best() {
        Some(best) => eprintln!(
            "✓ Validated: best ROUGE-L F {:.3} ({:.2?})",
            best.rouge_l.f_measure, t.validation
        ),
        None => eprintln!("· Skipped validation"),
    }
    eprintln!("✓ Wrote artifacts ({:.2?})", t.output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(["gramrank"]);
        assert!(cli.files.is_empty());
        assert!(cli.exclude.is_empty());
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.quiet);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_cli_parse_files_and_exclude() {
        let cli = Cli::parse_from([
            "gramrank", "--files", "a.json", "b.json", "-e", "draft_*",
        ]);
        assert_eq!(cli.files, vec!["a.json", "b.json"]);
        assert_eq!(cli.exclude, vec!["draft_*"]);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from(["gramrank", "--quiet", "--verbose", "--no-color"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_select_documents_names_resolve_into_dataset() {
        let config = Config {
            exclude: vec!["skip.json".to_string()],
            ..Config::with_base(Path::new("/data"))
        };
        let docs = select_documents(
            &["a.json".to_string(), "skip.json".to_string()],
            &config,
        )
        .unwrap();
        assert_eq!(docs, vec![PathBuf::from("/data/dataset/a.json")]);
    }

    #[test]
    fn test_run_reports_every_document() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dataset = dir.path().join("dataset");
        fs::create_dir(&dataset)?;
        fs::write(
            dataset.join("good.json"),
            r#"[{"full_text": "the cat sat on the mat"}]"#,
        )?;
        fs::write(dataset.join("broken.json"), "{ not json")?;

        let cli = Cli::parse_from([
            "gramrank",
            "--quiet",
            "--no-color",
            "--root",
            dir.path().to_str().unwrap(),
        ]);
        let report = run(&cli)?;

        assert!(report.contains("good.json"));
        assert!(report.contains("broken.json"));
        assert!(report.contains("failed"));
        assert!(dir.path().join("output/summary/summary_good.json").is_file());
        Ok(())
    }

    #[test]
    fn test_run_stop_on_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("gramrank.toml"), "[options]\nstop-on-error = true\n")?;
        fs::create_dir(dir.path().join("dataset"))?;
        fs::write(dir.path().join("dataset/broken.json"), "{ not json")?;

        let cli = Cli::parse_from(["gramrank", "-q", "--root", dir.path().to_str().unwrap()]);
        assert!(run(&cli).is_err());
        Ok(())
    }
}
