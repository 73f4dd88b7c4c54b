//! Utility functions and helpers.
//!
//! - [`paths`]: forward-slash relative keys and parent directory creation

pub mod paths;

pub use paths::{ensure_parent_dirs, relative_segments};
