//! Deep merge for configuration trees.
//!
//! Implements replace-recursive merging: nested trees are merged key by key,
//! everything else in the overlay replaces what the base had.
//! Sequences are replaced entirely, not concatenated.

use super::tree::ConfigTree;
use serde_json::Value;

/// Deep merge `overlay` into `base`, with `overlay` taking precedence.
///
/// - Trees are merged recursively: keys in overlay override keys in base
/// - Sequences, strings, numbers, booleans and nulls are replaced entirely
/// - A key whose type changes between base and overlay takes the overlay value
///
/// # Example
/// ```
/// use serde_json::json;
/// use yaml_confluence::config::deep_merge;
///
/// let mut base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// }).as_object().cloned().unwrap();
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// }).as_object().cloned().unwrap();
/// deep_merge(&mut base, overlay);
/// assert_eq!(base["server"], json!({ "port": 9000, "host": "localhost" }));
/// assert_eq!(base["features"], json!(["c"]));
/// ```
pub fn deep_merge(base: &mut ConfigTree, overlay: ConfigTree) {
    for (key, overlay_value) in overlay {
        match overlay_value {
            Value::Object(overlay_map) => {
                // Both are trees: merge recursively
                if let Some(Value::Object(base_map)) = base.get_mut(&key) {
                    deep_merge(base_map, overlay_map);
                } else {
                    base.insert(key, Value::Object(overlay_map));
                }
            }
            // Any other case: overlay replaces base entirely
            overlay_value => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Merge multiple trees in order, with later trees taking precedence.
///
/// Equivalent to folding `deep_merge` over the list into an empty tree.
pub fn deep_merge_all(trees: impl IntoIterator<Item = ConfigTree>) -> ConfigTree {
    trees.into_iter().fold(ConfigTree::new(), |mut acc, tree| {
        deep_merge(&mut acc, tree);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> ConfigTree {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn merged(base: Value, overlay: Value) -> Value {
        let mut base = tree(base);
        deep_merge(&mut base, tree(overlay));
        Value::Object(base)
    }

    #[test]
    fn test_scalar_conflict_is_right_biased() {
        assert_eq!(merged(json!({"a": 1}), json!({"a": 2})), json!({"a": 2}));
    }

    #[test]
    fn test_nested_trees_union() {
        assert_eq!(
            merged(json!({"a": {"x": 1}}), json!({"a": {"y": 2}})),
            json!({"a": {"x": 1, "y": 2}})
        );
    }

    #[test]
    fn test_merge_simple_objects() {
        assert_eq!(
            merged(json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})),
            json!({"a": 1, "b": 3, "c": 4})
        );
    }

    #[test]
    fn test_arrays_replaced_not_merged() {
        assert_eq!(
            merged(json!({"items": [1, 2, 3]}), json!({"items": [4, 5]})),
            json!({"items": [4, 5]})
        );
    }

    #[test]
    fn test_null_replaces_base() {
        assert_eq!(
            merged(json!({"a": 1, "b": {"c": 2}}), json!({"a": null, "b": {"c": null}})),
            json!({"a": null, "b": {"c": null}})
        );
    }

    #[test]
    fn test_deep_nested_merge() {
        let base = json!({
            "level1": {
                "level2": {
                    "level3": {"a": 1, "b": 2}
                }
            }
        });
        let overlay = json!({
            "level1": {
                "level2": {
                    "level3": {"b": 3, "c": 4}
                }
            }
        });
        assert_eq!(
            merged(base, overlay),
            json!({
                "level1": {
                    "level2": {
                        "level3": {"a": 1, "b": 3, "c": 4}
                    }
                }
            })
        );
    }

    #[test]
    fn test_merge_all() {
        let trees = vec![
            tree(json!({"a": 1})),
            tree(json!({"b": 2})),
            tree(json!({"a": 3, "c": 4})),
        ];
        assert_eq!(
            Value::Object(deep_merge_all(trees)),
            json!({"a": 3, "b": 2, "c": 4})
        );
    }

    #[test]
    fn test_merge_all_empty() {
        assert!(deep_merge_all(Vec::new()).is_empty());
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        assert_eq!(
            merged(json!({"value": 42}), json!({"value": {"nested": true}})),
            json!({"value": {"nested": true}})
        );
    }

    #[test]
    fn test_overlay_replaces_object_with_primitive() {
        assert_eq!(
            merged(json!({"value": {"nested": true}}), json!({"value": 42})),
            json!({"value": 42})
        );
    }
}
