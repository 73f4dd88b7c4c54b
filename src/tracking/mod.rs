//! Discovery of the images that should appear in the manifest.
//!
//! # Usage
//!
//! ```no_run
//! use layersync::tracking::TreeScanner;
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let flat = TreeScanner::new(PathBuf::from("SourcePack")).scan()?;
//! for (key, _) in flat.iter() {
//!     println!("{key}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod scanner;

pub use scanner::TreeScanner;
