//! Removal of the cosmetic image extension from keys and values.
//!
//! Image files on disk carry a `.png` extension that the manifest does not
//! want to see. Matching is ASCII case-insensitive on the suffix only; the
//! rest of the string is left untouched.

use super::{Mapping, Node, Scalar};

/// Extension stripped from paths and manifest strings.
pub const COSMETIC_SUFFIX: &str = ".png";

/// Strips [`COSMETIC_SUFFIX`] from the end of `name`, ignoring its case.
#[must_use]
pub fn strip_suffix(name: &str) -> &str {
    let cut = name.len().saturating_sub(COSMETIC_SUFFIX.len());
    if name.len() >= COSMETIC_SUFFIX.len()
        && name.is_char_boundary(cut)
        && name[cut..].eq_ignore_ascii_case(COSMETIC_SUFFIX)
    {
        &name[..cut]
    } else {
        name
    }
}

/// Returns a structurally identical node with the suffix stripped from
/// every mapping key, sequence element and string leaf.
///
/// Keys that collide after stripping keep the first key's position and the
/// last value.
#[must_use]
pub fn normalize_node(node: &Node) -> Node {
    match node {
        Node::Mapping(map) => Node::Mapping(
            map.iter()
                .map(|(key, value)| (strip_suffix(key).to_string(), normalize_node(value)))
                .collect::<Mapping>(),
        ),
        Node::Sequence(items) => Node::Sequence(items.iter().map(normalize_node).collect()),
        Node::Scalar(Scalar::String(s)) => Node::string(strip_suffix(s)),
        Node::Scalar(other) => Node::Scalar(other.clone()),
    }
}
