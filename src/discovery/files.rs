//! Dataset document discovery.
//!
//! Lists the `.json` documents directly inside the dataset directory:
//! - Respects .gitignore via the `ignore` crate
//! - Applies the config's exclude globs to file names
//! - Returns sorted paths so runs are reproducible

use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

use crate::config::Config;

/// Extension of dataset documents.
const DOCUMENT_EXTENSION: &str = "json";

/// Find dataset documents in `directory` (non-recursive).
///
/// A single file path is returned as-is if it is a JSON document.
pub fn find_documents(directory: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if directory.is_file() {
        return Ok(if is_document(directory) {
            vec![directory.to_path_buf()]
        } else {
            vec![]
        });
    }

    if !directory.is_dir() {
        anyhow::bail!("Dataset directory does not exist: {}", directory.display());
    }

    let walker = WalkBuilder::new(directory)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .follow_links(false)
        .max_depth(Some(1))
        .build();

    let mut files: Vec<PathBuf> = walker
        // Skip entries we can't read (permissions, broken symlinks, etc.)
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_document(path))
        .filter(|path| {
            let name = file_name(path);
            !config.matches_exclude(&name)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// File name as a display string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_sorted_json_only() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("b.json"), "{}")?;
        fs::write(dir.path().join("a.JSON"), "{}")?;
        fs::write(dir.path().join("notes.txt"), "x")?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("nested").join("c.json"), "{}")?;

        let files = find_documents(dir.path(), &Config::default())?;
        let names: Vec<String> = files.iter().map(|f| file_name(f)).collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
        Ok(())
    }

    #[test]
    fn test_exclude_patterns_apply() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("keep.json"), "{}")?;
        fs::write(dir.path().join("draft_1.json"), "{}")?;

        let config = Config {
            exclude: vec!["draft_*".to_string()],
            ..Default::default()
        };
        let files = find_documents(dir.path(), &config)?;
        assert_eq!(files, vec![dir.path().join("keep.json")]);
        Ok(())
    }

    #[test]
    fn test_single_file_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let doc = dir.path().join("one.json");
        fs::write(&doc, "{}")?;

        assert_eq!(find_documents(&doc, &Config::default())?, vec![doc]);
        Ok(())
    }

    #[test]
    fn test_nonexistent_path() {
        let result = find_documents(Path::new("/nonexistent/path/xyz"), &Config::default());
        assert!(result.is_err());
    }
}
