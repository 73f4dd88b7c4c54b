//! Grouped JSON encoding of the manifest.
//!
//! The output is valid JSON laid out for people editing it by hand:
//!
//! - object keys are sorted case-insensitively
//! - top-level categories are separated by a blank line
//! - inside a category a blank line starts each new immediate subfolder
//! - arrays stay on one line
//!
//! Encoding the same tree twice yields the same bytes.

use super::{KEY_SEPARATOR, Mapping, Node};
use std::cmp::Ordering;

/// Spaces added per nesting level.
const INDENT: usize = 2;

/// Encodes `root` as grouped JSON text, without a trailing newline.
#[must_use]
pub fn to_grouped_json(root: &Node) -> String {
    encode(root, 0)
}

/// Encodes one node found at nesting `level`.
fn encode(node: &Node, level: usize) -> String {
    match node {
        Node::Mapping(map) => encode_mapping(map, level),
        Node::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(|item| item.to_json().to_string()).collect();
            format!("[{}]", parts.join(","))
        }
        Node::Scalar(_) => node.to_json().to_string(),
    }
}

/// Encodes a mapping, one entry per line.
fn encode_mapping(map: &Mapping, level: usize) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let mut entries: Vec<(&String, &Node)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| case_insensitive(a, b));

    let pad = " ".repeat(INDENT * level);
    let entry_pad = " ".repeat(INDENT * (level + 1));
    let mut lines = Vec::with_capacity(entries.len() * 2);

    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 && starts_new_group(entries[i - 1].0, key, level) {
            lines.push(String::new());
        }

        let value = encode(value, level + 1);
        let comma = if i + 1 < entries.len() { "," } else { "" };
        let quoted = serde_json::Value::String((*key).clone());
        lines.push(format!("{entry_pad}{quoted}: {value}{comma}"));
    }

    format!("{{\n{}\n{pad}}}", lines.join("\n"))
}

/// Whether a blank line goes between `previous` and `current`.
///
/// Every top-level category gets its own block; below that a block
/// starts whenever the first path segment changes.
fn starts_new_group(previous: &str, current: &str, level: usize) -> bool {
    level == 0 || first_segment(previous) != first_segment(current)
}

/// Text before the first separator, or the whole key.
fn first_segment(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR).map_or(key, |(head, _)| head)
}

/// Lowercased comparison with the raw key as tie-breaker.
fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
