#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # Layersync - Layering Manifest Synchronizer
//!
//! Layersync keeps a hand-annotated JSON manifest in step with a folder of
//! source images. Each run scans the source tree, compares it with the
//! manifest from the previous run, keeps every annotation whose image still
//! exists, adds placeholders for new images, drops entries for deleted ones
//! and rewrites the manifest in a stable, grouped layout.
//!
//! ## Architecture
//!
//! - [`tracking`]: scanning category folders into flat keys
//! - [`manifest`]: the manifest tree, suffix normalization, flattening,
//!   grouped encoding, loading and saving
//! - [`sync`]: merging old and new keys and producing the change report
//! - [`output`]: rendering the report to the console
//! - [`config`]: paths and presentation settings for a run
//! - [`utils`]: path helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use layersync::{SyncConfig, output, sync};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SyncConfig::new("SourcePack", "elements_layering.json");
//! let outcome = sync::synchronize(&config)?;
//! output::write_report(&mut std::io::stdout(), &outcome.report, config.color)?;
//! # Ok(())
//! # }
//! ```

/// Run configuration passed into the pipeline.
pub mod config;

/// Manifest model, normalization, flattening, encoding and persistence.
pub mod manifest;

/// Console rendering of the change report.
pub mod output;

/// Merging and reporting.
pub mod sync;

/// Source tree scanning.
pub mod tracking;

/// Utility functions and helpers.
pub mod utils;

pub use config::SyncConfig;

/// Current version of the layersync binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default source tree, relative to the working directory.
pub const DEFAULT_SOURCE_ROOT: &str = "SourcePack";

/// Default manifest file, relative to the working directory.
pub const DEFAULT_MANIFEST_FILE: &str = "elements_layering.json";
