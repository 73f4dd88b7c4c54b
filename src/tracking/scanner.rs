//! Source tree scanner for discovering images under each category.
//!
//! Every immediate subdirectory of the source root is a category. All
//! regular files below a category, at any depth, become flat manifest keys
//! of the form `category/relative/path` with the cosmetic suffix stripped
//! from each segment.

use crate::manifest::{FlatManifest, KEY_SEPARATOR, Node, strip_suffix};
use crate::utils::relative_segments;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Scanner for enumerating the files of a source tree
pub struct TreeScanner {
    /// Directory whose subdirectories are the categories
    root: PathBuf,
}

impl TreeScanner {
    /// Create a new scanner rooted at `root`
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Scan every category and bind each file key to the placeholder value
    ///
    /// Files directly under the root are ignored. Keys within a category are
    /// produced in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root directory cannot be listed
    /// - A category traversal fails
    pub fn scan(&self) -> Result<FlatManifest> {
        let span = span!(Level::DEBUG, "scan", root = %self.root.display());
        let _guard = span.enter();

        let listing = std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read source root: {}", self.root.display()))?;

        let mut flat = FlatManifest::new();
        let mut categories = 0usize;

        for entry in listing {
            let entry = entry.with_context(|| {
                format!("Failed to read directory entry in {}", self.root.display())
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let category = strip_suffix(&entry.file_name().to_string_lossy()).to_string();
            for relative in Self::scan_category(&path)? {
                flat.insert(
                    format!("{category}{KEY_SEPARATOR}{relative}"),
                    Node::placeholder(),
                );
            }
            categories += 1;
        }

        debug!(categories, files = flat.len(), "Scan complete");
        Ok(flat)
    }

    /// Sorted, normalized relative keys for every file below `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory traversal fails
    fn scan_category(dir: &Path) -> Result<Vec<String>> {
        let mut files: Vec<Vec<String>> = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;

            if entry.file_type().is_file()
                && let Some(segments) = relative_segments(entry.path(), dir)
            {
                files.push(segments);
            }
        }

        files.sort();

        Ok(files
            .iter()
            .map(|segments| {
                segments
                    .iter()
                    .map(|segment| strip_suffix(segment))
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_structure(root: &Path) -> Result<()> {
        // Create directory structure:
        // root/
        //   Props/
        //     Chair.png
        //     Kitchen/
        //       Pot.PNG
        //       Pan.png
        //   Chars/
        //     Hero.png
        //     notes.txt
        //   Empty/
        //   loose.png

        fs::create_dir_all(root.join("Props/Kitchen"))?;
        fs::create_dir_all(root.join("Chars"))?;
        fs::create_dir_all(root.join("Empty"))?;

        fs::write(root.join("Props/Chair.png"), "")?;
        fs::write(root.join("Props/Kitchen/Pot.PNG"), "")?;
        fs::write(root.join("Props/Kitchen/Pan.png"), "")?;
        fs::write(root.join("Chars/Hero.png"), "")?;
        fs::write(root.join("Chars/notes.txt"), "")?;
        fs::write(root.join("loose.png"), "")?;

        Ok(())
    }

    fn sorted_keys(flat: &FlatManifest) -> Vec<String> {
        let mut keys: Vec<String> = flat.keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_scan_builds_category_keys() -> Result<()> {
        let temp_dir = TempDir::new()?;
        create_test_structure(temp_dir.path())?;

        let flat = TreeScanner::new(temp_dir.path().to_path_buf()).scan()?;

        assert_eq!(
            sorted_keys(&flat),
            vec![
                "Chars/Hero",
                "Chars/notes.txt",
                "Props/Chair",
                "Props/Kitchen/Pan",
                "Props/Kitchen/Pot",
            ]
        );
        assert!(flat.iter().all(|(_, value)| *value == Node::placeholder()));

        Ok(())
    }

    #[test]
    fn test_category_keys_are_sorted() -> Result<()> {
        let temp_dir = TempDir::new()?;
        create_test_structure(temp_dir.path())?;

        let flat = TreeScanner::new(temp_dir.path().to_path_buf()).scan()?;
        let props: Vec<&str> = flat
            .keys()
            .filter(|key| key.starts_with("Props/"))
            .map(String::as_str)
            .collect();

        assert_eq!(props, vec!["Props/Chair", "Props/Kitchen/Pan", "Props/Kitchen/Pot"]);
        Ok(())
    }

    #[test]
    fn test_root_files_and_empty_categories_are_ignored() -> Result<()> {
        let temp_dir = TempDir::new()?;
        create_test_structure(temp_dir.path())?;

        let flat = TreeScanner::new(temp_dir.path().to_path_buf()).scan()?;

        assert!(!flat.contains_key("loose"));
        assert!(!flat.keys().any(|key| key.starts_with("Empty")));
        Ok(())
    }

    #[test]
    fn test_suffix_stripped_from_every_segment() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("Sheet.png/frames.PNG"))?;
        fs::write(temp_dir.path().join("Sheet.png/frames.PNG/01.png"), "")?;

        let flat = TreeScanner::new(temp_dir.path().to_path_buf()).scan()?;

        assert_eq!(sorted_keys(&flat), vec!["Sheet/frames/01"]);
        Ok(())
    }

    #[test]
    fn test_empty_root() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let flat = TreeScanner::new(temp_dir.path().to_path_buf()).scan()?;
        assert!(flat.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_root_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let scanner = TreeScanner::new(temp_dir.path().join("nonexistent"));

        let err = match scanner.scan() {
            Ok(_) => anyhow::bail!("scan of a missing root should fail"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Failed to read source root"));
        Ok(())
    }
}
