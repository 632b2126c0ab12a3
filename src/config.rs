//! Configuration loading from gramrank.toml.
//!
//! Every key is optional; anything missing falls back to the defaults shown
//! here. Relative paths resolve against the directory holding the file.
//!
//! ## Example
//!
//! ```toml
//! target-data-key = ["full_text"]
//! exclude = ["draft_*.json"]
//!
//! [paths]
//! dataset-dir = "dataset"
//! output-dir = "output"
//! validation-file = "validation/validation.json"
//!
//! [parameters]
//! epsilon = 1e-5
//! max-iterations = 200
//! trust-max-iterations = 20
//! bias-amount = 5
//! filter-threshold = 1e-3
//! root-amount = 5
//! max-summary-length = 20
//! window = 2
//!
//! [options]
//! stop-on-error = false
//! output-graph = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::RankingConfig;

/// File name searched for in the run root and its ancestors.
pub const CONFIG_FILE: &str = "gramrank.toml";

/// gramrank configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Directory scanned for `.json` documents.
    pub dataset_dir: PathBuf,

    /// Root directory for written artifacts.
    pub output_dir: PathBuf,

    /// JSON object mapping document file name to reference summary.
    pub validation_file: Option<PathBuf>,

    /// Key path to the text fields inside each document.
    pub target_data_key: Vec<String>,

    /// Glob patterns for dataset files to skip.
    pub exclude: Vec<String>,

    /// Ranking, filtering and extraction parameters.
    pub ranking: RankingConfig,

    /// Abort the run on the first failing document.
    pub stop_on_error: bool,

    /// Write the unfiltered weighted edge list per document.
    pub output_graph: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    target_data_key: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    paths: Option<RawPaths>,
    parameters: Option<RawParameters>,
    options: Option<RawOptions>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawPaths {
    dataset_dir: Option<String>,
    output_dir: Option<String>,
    validation_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawParameters {
    epsilon: Option<f64>,
    max_iterations: Option<usize>,
    trust_max_iterations: Option<usize>,
    bias_amount: Option<usize>,
    filter_threshold: Option<f64>,
    root_amount: Option<usize>,
    max_summary_length: Option<usize>,
    window: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawOptions {
    stop_on_error: Option<bool>,
    output_graph: Option<bool>,
}

impl Config {
    /// Defaults with paths rooted at `base`.
    pub fn with_base(base: &Path) -> Self {
        Self {
            source: None,
            dataset_dir: base.join("dataset"),
            output_dir: base.join("output"),
            validation_file: Some(base.join("validation").join("validation.json")),
            target_data_key: vec!["full_text".to_string()],
            exclude: Vec::new(),
            ranking: RankingConfig::default(),
            stop_on_error: false,
            output_graph: true,
        }
    }

    /// Load configuration for the given directory.
    ///
    /// Search order:
    /// 1. gramrank.toml in directory
    /// 2. Walk up to find gramrank.toml
    /// 3. Default config rooted at `directory`
    ///
    /// A file that exists but fails to parse is reported and skipped.
    pub fn load(directory: &Path) -> Self {
        let mut current = Some(directory);
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.exists() {
                match Self::load_file(&candidate) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(path = %candidate.display(), error = %e, "ignoring unreadable config");
                        break;
                    }
                }
            }
            current = dir.parent();
        }

        Self::with_base(directory)
    }

    /// Load a specific config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_raw(raw, base, path.to_path_buf()))
    }

    fn from_raw(raw: RawConfig, base: &Path, source: PathBuf) -> Self {
        let defaults = Self::with_base(base);
        let paths = raw.paths.unwrap_or_default();
        let params = raw.parameters.unwrap_or_default();
        let options = raw.options.unwrap_or_default();
        let ranking = RankingConfig::default();

        // An empty string disables validation
        let validation_file = match paths.validation_file {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(resolve(base, &p)),
            None => defaults.validation_file,
        };

        Self {
            source: Some(source),
            dataset_dir: paths
                .dataset_dir
                .map(|p| resolve(base, &p))
                .unwrap_or(defaults.dataset_dir),
            output_dir: paths
                .output_dir
                .map(|p| resolve(base, &p))
                .unwrap_or(defaults.output_dir),
            validation_file,
            target_data_key: raw.target_data_key.unwrap_or(defaults.target_data_key),
            exclude: raw.exclude.unwrap_or_default(),
            ranking: RankingConfig {
                epsilon: params.epsilon.unwrap_or(ranking.epsilon),
                max_iterations: params.max_iterations.unwrap_or(ranking.max_iterations),
                trust_max_iterations: params
                    .trust_max_iterations
                    .unwrap_or(ranking.trust_max_iterations),
                bias_amount: params.bias_amount.unwrap_or(ranking.bias_amount),
                filter_threshold: params.filter_threshold.unwrap_or(ranking.filter_threshold),
                root_amount: params.root_amount.unwrap_or(ranking.root_amount),
                max_summary_length: params.max_summary_length.or(ranking.max_summary_length),
                window: params.window.unwrap_or(ranking.window),
            },
            stop_on_error: options.stop_on_error.unwrap_or(defaults.stop_on_error),
            output_graph: options.output_graph.unwrap_or(defaults.output_graph),
        }
    }

    /// Check if a dataset file name matches any exclude pattern.
    pub fn matches_exclude(&self, name: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern == name || glob_match::glob_match(pattern, name))
    }

    /// Format config for display.
    pub fn display_summary(&self) -> String {
        let mut lines = Vec::new();

        match self.source {
            Some(ref source) => lines.push(format!("   Config: {}", source.display())),
            None => lines.push("   Config: (defaults)".to_string()),
        }

        lines.push(format!("   Dataset: {}", self.dataset_dir.display()));
        lines.push(format!("   Output: {}", self.output_dir.display()));
        match self.validation_file {
            Some(ref v) => lines.push(format!("   Validation: {}", v.display())),
            None => lines.push("   Validation: (none)".to_string()),
        }
        lines.push(format!("   Target key: {}", self.target_data_key.join(".")));

        let r = &self.ranking;
        lines.push(format!(
            "   Epsilon: {:e} | Iterations: {} (trust {})",
            r.epsilon, r.max_iterations, r.trust_max_iterations
        ));
        lines.push(format!(
            "   Bias: {} | Roots: {} | Filter: {:e} | Window: {}",
            r.bias_amount, r.root_amount, r.filter_threshold, r.window
        ));
        if let Some(max) = r.max_summary_length {
            lines.push(format!("   Max summary words: {}", max));
        }

        lines.join("\n")
    }
}

/// Normalize Windows separators and join relative paths onto `base`.
fn resolve(base: &Path, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw.replace('\\', "/"));
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
