//! Reading the prior manifest and writing the new one.
//!
//! A missing, blank or unparseable manifest is never fatal: the run starts
//! from an empty prior state and, for the unparseable case, carries a
//! warning for the report. Only I/O failures propagate.

use super::format::to_grouped_json;
use super::{Mapping, Node};
use crate::utils::paths::ensure_parent_dirs;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{Level, debug, span};

/// Prior manifest state as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Parsed manifest tree, or an empty mapping when there was nothing usable.
    pub root: Node,
    /// Set when the file existed but could not be used.
    pub warning: Option<String>,
}

impl Snapshot {
    /// A snapshot with no prior entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Node::Mapping(Mapping::new()),
            warning: None,
        }
    }

    /// An empty snapshot carrying a warning message.
    fn discarded(warning: String) -> Self {
        Self {
            warning: Some(warning),
            ..Self::empty()
        }
    }
}

/// Loads the manifest at `path`.
///
/// The tree is returned as parsed; suffix normalization is left to the
/// caller.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let span = span!(Level::DEBUG, "load_snapshot", path = %path.display());
    let _guard = span.enter();

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No prior manifest, starting empty");
            return Ok(Snapshot::empty());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read manifest: {}", path.display()));
        }
    };

    let content = bytes.trim_ascii();
    if content.is_empty() {
        debug!("Prior manifest is blank, starting empty");
        return Ok(Snapshot::empty());
    }

    match serde_json::from_slice::<serde_json::Value>(content) {
        Ok(value @ serde_json::Value::Object(_)) => {
            let root = Node::from(value);
            debug!(
                categories = root.as_mapping().map_or(0, Mapping::len),
                "Loaded prior manifest"
            );
            Ok(Snapshot { root, warning: None })
        }
        Ok(_) => Ok(Snapshot::discarded(format!(
            "Warning: {} is not a JSON object, starting fresh.",
            path.display()
        ))),
        Err(e) => {
            debug!(error = %e, "Prior manifest failed to parse");
            Ok(Snapshot::discarded(format!(
                "Warning: {} is invalid JSON, starting fresh.",
                path.display()
            )))
        }
    }
}

/// Overwrites `path` with the grouped encoding of `root` plus a trailing
/// newline, returning the number of bytes written.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn save_manifest(path: &Path, root: &Node) -> Result<usize> {
    let mut text = to_grouped_json(root);
    text.push('\n');

    ensure_parent_dirs(path)?;
    std::fs::write(path, &text)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

    debug!(path = %path.display(), bytes = text.len(), "Manifest written");
    Ok(text.len())
}
