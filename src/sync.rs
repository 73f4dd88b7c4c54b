//! Reconciling the scanned source tree with the prior manifest.
//!
//! The run is split into pure and effectful parts:
//!
//! - [`merge`] compares two flat manifests and decides what survives
//! - [`reconcile`] turns a scan and a snapshot into the new manifest plus
//!   report lines, without touching the filesystem
//! - [`plan`] reads the source tree and the prior manifest
//! - [`synchronize_with`] runs the whole pipeline, overwrites the manifest
//!   file and hands each report line to a callback as soon as it is known

use crate::config::SyncConfig;
use crate::manifest::{
    FlatManifest, Node, Snapshot, flatten, load_snapshot, normalize_node, save_manifest, unflatten,
};
use crate::tracking::TreeScanner;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{Level, debug, span};

/// One line of the change report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// The prior manifest could not be used.
    Warning(String),
    /// A key found on disk that the prior manifest did not have.
    Added(String),
    /// A key from the prior manifest whose file is gone.
    Deleted(String),
    /// The manifest file was rewritten.
    Updated(PathBuf),
}

/// Outcome of comparing the scanned keys against the prior ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Merge {
    /// Surviving and new keys in sorted order.
    pub merged: BTreeMap<String, Node>,
    /// Keys present only in the scan, sorted.
    pub added: Vec<String>,
    /// Keys present only in the prior manifest, in prior manifest order.
    pub deleted: Vec<String>,
}

/// Result of a run: the manifest to persist and what to tell the user.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Nested manifest grouped by category.
    pub manifest: Node,
    /// Report lines in display order.
    pub report: Vec<ReportLine>,
}

/// Merges `scanned` keys with the `previous` flat manifest.
///
/// A key in both keeps its previous value verbatim, even when that value
/// equals the placeholder. A key only in `scanned` is bound to the
/// placeholder. A key only in `previous` is dropped.
#[must_use]
pub fn merge(scanned: &FlatManifest, previous: &FlatManifest) -> Merge {
    let mut keys: Vec<&String> = scanned.keys().collect();
    keys.sort();

    let mut result = Merge::default();
    for key in keys {
        let value = if let Some(old) = previous.get(key) {
            old.clone()
        } else {
            result.added.push(key.clone());
            Node::placeholder()
        };
        result.merged.insert(key.clone(), value);
    }

    result.deleted = previous
        .keys()
        .filter(|key| !scanned.contains_key(key.as_str()))
        .cloned()
        .collect();

    result
}

/// Builds the new manifest from a scan and the prior snapshot.
///
/// The snapshot is normalized and flattened before comparison.
#[must_use]
pub fn reconcile(scanned: &FlatManifest, snapshot: &Snapshot) -> SyncOutcome {
    let previous = flatten(&normalize_node(&snapshot.root));
    let Merge {
        merged,
        added,
        deleted,
    } = merge(scanned, &previous);

    debug!(
        kept = merged.len() - added.len(),
        added = added.len(),
        deleted = deleted.len(),
        "Merged manifest"
    );

    let mut report = Vec::with_capacity(added.len() + deleted.len() + 1);
    report.extend(snapshot.warning.iter().cloned().map(ReportLine::Warning));
    report.extend(added.into_iter().map(ReportLine::Added));
    report.extend(deleted.into_iter().map(ReportLine::Deleted));

    SyncOutcome {
        manifest: unflatten(merged),
        report,
    }
}

/// Reads the prior manifest and the source tree and reconciles them.
///
/// Nothing is written.
///
/// # Errors
///
/// Returns an error if the source root cannot be traversed or the manifest
/// exists but cannot be read.
pub fn plan(config: &SyncConfig) -> Result<SyncOutcome> {
    let snapshot = load_snapshot(&config.manifest_path)?;
    let scanned = TreeScanner::new(config.source_root.clone()).scan()?;
    Ok(reconcile(&scanned, &snapshot))
}

/// Runs the full pipeline and overwrites the manifest file.
///
/// The returned report ends with [`ReportLine::Updated`].
///
/// # Errors
///
/// Returns an error if the source root cannot be traversed or the manifest
/// cannot be read or written.
pub fn synchronize(config: &SyncConfig) -> Result<SyncOutcome> {
    synchronize_with(config, |_| Ok(()))
}

/// Like [`synchronize`], passing every report line to `emit` as it becomes
/// final.
///
/// A warning about a discarded manifest is emitted right after loading, so
/// it reaches the user even when the scan fails afterwards. The remaining
/// lines follow once the new manifest has been written.
///
/// # Errors
///
/// Returns an error if the pipeline fails or `emit` does.
pub fn synchronize_with<F>(config: &SyncConfig, mut emit: F) -> Result<SyncOutcome>
where
    F: FnMut(&ReportLine) -> Result<()>,
{
    let span = span!(
        Level::DEBUG,
        "synchronize",
        root = %config.source_root.display(),
        manifest = %config.manifest_path.display()
    );
    let _guard = span.enter();

    let snapshot = load_snapshot(&config.manifest_path)?;
    if let Some(warning) = &snapshot.warning {
        emit(&ReportLine::Warning(warning.clone()))?;
    }

    let scanned = TreeScanner::new(config.source_root.clone()).scan()?;
    let mut outcome = reconcile(&scanned, &snapshot);
    save_manifest(&config.manifest_path, &outcome.manifest)?;
    outcome
        .report
        .push(ReportLine::Updated(config.manifest_path.clone()));

    for line in &outcome.report {
        if !matches!(line, ReportLine::Warning(_)) {
            emit(line)?;
        }
    }

    Ok(outcome)
}
