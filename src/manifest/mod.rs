//! In-memory model of the layering manifest.
//!
//! The manifest on disk is a JSON object of categories, each holding an
//! object of relative image paths mapped to an annotation slot. In memory
//! every JSON value is carried as a [`Node`], a closed tagged variant that
//! the normalizer, the flattener and the serializer each walk with one
//! recursive function.
//!
//! # Submodules
//!
//! - [`normalize`]: cosmetic `.png` suffix stripping
//! - [`flatten`]: nested manifest <-> flat `category/path` keys
//! - [`format`]: grouped, deterministic JSON text encoding
//! - [`snapshot`]: loading the prior manifest and persisting the new one

pub mod flatten;
pub mod format;
pub mod normalize;
pub mod snapshot;

use indexmap::IndexMap;

pub use flatten::{FlatManifest, flatten, unflatten};
pub use format::to_grouped_json;
pub use normalize::{normalize_node, strip_suffix};
pub use snapshot::{Snapshot, load_snapshot, save_manifest};

/// Separator joining a category and the path segments of a flat key.
pub const KEY_SEPARATOR: char = '/';

/// A leaf JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any JSON number, kept in its parsed form so it re-encodes unchanged.
    Number(serde_json::Number),
    /// A string literal.
    String(String),
}

/// One value of the manifest tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A JSON object with its keys in document order.
    Mapping(Mapping),
    /// A JSON array.
    Sequence(Vec<Node>),
    /// Anything else.
    Scalar(Scalar),
}

impl Node {
    /// The value bound to a newly observed image: `[""]`.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::Sequence(vec![Self::string("")])
    }

    /// Shorthand for a string scalar.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Returns the inner mapping if this node is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the node back into a `serde_json::Value`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Scalar(Scalar::Null) => Value::Null,
            Self::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Self::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            Self::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Object(object) => Self::Mapping(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
        }
    }
}

/// String-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces its value in place, so the key
/// keeps the position of its first insertion. Equality ignores order.
pub type Mapping = IndexMap<String, Node>;
