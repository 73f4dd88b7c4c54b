//! Conversion between the nested manifest and flat `category/path` keys.
//!
//! Comparing the scanned tree against the prior manifest happens on flat
//! keys; persisting happens on the nested, category-grouped form.

use super::{KEY_SEPARATOR, Mapping, Node};

/// Flat view of a manifest: `category/relative/path` -> value, in the order
/// the keys were encountered.
pub type FlatManifest = Mapping;

/// Flattens nested mappings into slash-joined keys.
///
/// Mapping values are descended into with their key appended to the
/// prefix; any other value becomes a leaf under the fully joined key. An
/// empty nested mapping contributes nothing, and a root that is not a
/// mapping flattens to an empty result.
#[must_use]
pub fn flatten(root: &Node) -> FlatManifest {
    let mut flat = FlatManifest::new();
    if let Node::Mapping(map) = root {
        flatten_into(map, "", &mut flat);
    }
    flat
}

/// Recursive step of [`flatten`]
fn flatten_into(map: &Mapping, prefix: &str, flat: &mut FlatManifest) {
    for (key, value) in map.iter() {
        let joined = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{key}")
        };

        match value {
            Node::Mapping(child) => flatten_into(child, &joined, flat),
            leaf => {
                flat.insert(joined, leaf.clone());
            }
        }
    }
}

/// Groups flat keys back under their top-level category.
///
/// Each key is split once on the first separator: the left part names the
/// category and the remainder becomes a key inside it. A key without a
/// separator (or with nothing after it) is bound directly at the top level.
/// When a bare key and a grouped key share a category the later one in
/// iteration order replaces the earlier.
#[must_use]
pub fn unflatten<I>(entries: I) -> Node
where
    I: IntoIterator<Item = (String, Node)>,
{
    let mut nested = Mapping::new();

    for (key, value) in entries {
        match key.split_once(KEY_SEPARATOR) {
            Some((category, rest)) if !rest.is_empty() => {
                if let Some(Node::Mapping(group)) = nested.get_mut(category) {
                    group.insert(rest.to_string(), value);
                } else {
                    let mut group = Mapping::new();
                    group.insert(rest.to_string(), value);
                    nested.insert(category.to_string(), Node::Mapping(group));
                }
            }
            Some((category, _)) => {
                nested.insert(category.to_string(), value);
            }
            None => {
                nested.insert(key, value);
            }
        }
    }

    Node::Mapping(nested)
}
