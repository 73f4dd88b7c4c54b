//! Run configuration.
//!
//! Everything the pipeline needs to know about its surroundings is passed in
//! through [`SyncConfig`]; nothing is read from globals.

use crate::{DEFAULT_MANIFEST_FILE, DEFAULT_SOURCE_ROOT};
use std::path::PathBuf;

/// Paths and presentation settings for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Directory whose immediate subdirectories are the categories.
    pub source_root: PathBuf,

    /// Manifest file read as prior state and overwritten with the result.
    pub manifest_path: PathBuf,

    /// Whether report lines are rendered with ANSI colors.
    pub color: bool,
}

impl SyncConfig {
    /// Creates a configuration with explicit paths and colors disabled.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            manifest_path: manifest_path.into(),
            color: false,
        }
    }

    /// Enables or disables colored report lines.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Default for SyncConfig {
    /// `./SourcePack` and `./elements_layering.json`, colored whenever the
    /// terminal supports it.
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_ROOT, DEFAULT_MANIFEST_FILE)
            .with_color(colored::control::SHOULD_COLORIZE.should_colorize())
    }
}
