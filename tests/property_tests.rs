use layersync::manifest::{
    FlatManifest, Node, flatten, normalize_node, strip_suffix, to_grouped_json, unflatten,
};
use layersync::sync::merge;
use proptest::prelude::*;

/// Path segment without the separator, possibly carrying the image suffix
fn segment() -> impl Strategy<Value = String> {
    ("[A-Za-z0-9 _-]{1,8}", prop::bool::ANY)
        .prop_map(|(name, png)| if png { format!("{name}.PNG") } else { name })
}

/// Flat key with a category and one to three path segments
fn flat_key() -> impl Strategy<Value = String> {
    (segment(), prop::collection::vec(segment(), 1..4))
        .prop_map(|(category, rest)| format!("{category}/{}", rest.join("/")))
}

/// Leaf annotation value
fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::placeholder()),
        "[a-z ]{0,6}".prop_map(|s| Node::Sequence(vec![Node::string(s)])),
        "[a-z.]{0,6}".prop_map(Node::string),
    ]
}

fn flat_manifest() -> impl Strategy<Value = FlatManifest> {
    prop::collection::vec((flat_key(), leaf()), 0..40)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn test_flatten_unflatten_is_lossless(flat in flat_manifest()) {
        // Invariant: grouping by category and flattening again restores every key
        let round_trip = flatten(&unflatten(flat.clone()));
        prop_assert_eq!(round_trip, flat);
    }

    #[test]
    fn test_normalization_is_idempotent(flat in flat_manifest()) {
        let nested = unflatten(flat);
        let once = normalize_node(&nested);
        prop_assert_eq!(normalize_node(&once), once);
    }

    #[test]
    fn test_strip_suffix_only_touches_the_end(name in "[A-Za-z0-9/._-]{0,16}") {
        let stripped = strip_suffix(&name);
        prop_assert!(name.starts_with(stripped));
        prop_assert!(stripped.len() == name.len() || stripped.len() + 4 == name.len());
    }

    #[test]
    fn test_encoding_is_stable_and_valid_json(flat in flat_manifest()) {
        let nested = unflatten(flat);
        let text = to_grouped_json(&nested);

        // Parsing the output and encoding it again yields the same bytes
        let reparsed: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(to_grouped_json(&Node::from(reparsed)), text);
    }

    #[test]
    fn test_merge_against_itself_changes_nothing(flat in flat_manifest()) {
        let result = merge(&flat, &flat);

        prop_assert!(result.added.is_empty());
        prop_assert!(result.deleted.is_empty());
        prop_assert_eq!(result.merged.len(), flat.len());
        for (key, value) in flat.iter() {
            prop_assert_eq!(result.merged.get(key), Some(value));
        }
    }

    #[test]
    fn test_merge_partitions_keys(old in flat_manifest(), new in flat_manifest()) {
        let result = merge(&new, &old);

        for key in &result.added {
            prop_assert!(new.contains_key(key) && !old.contains_key(key));
            prop_assert_eq!(result.merged.get(key), Some(&Node::placeholder()));
        }
        for key in &result.deleted {
            prop_assert!(old.contains_key(key) && !new.contains_key(key));
            prop_assert!(!result.merged.contains_key(key));
        }
        for (key, value) in result.merged.iter() {
            if let Some(previous) = old.get(key) {
                prop_assert_eq!(value, previous);
            }
        }
    }
}
