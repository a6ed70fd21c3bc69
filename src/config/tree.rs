//! The in-memory configuration tree and path lookup.

use serde_json::Value;

/// A parsed or merged configuration: string keys mapping to scalars,
/// sequences or nested trees.
pub type ConfigTree = serde_json::Map<String, Value>;

/// Separator between keys in a lookup path (`database:host`).
pub const PATH_DELIMITER: char = ':';

/// Resolve a colon-delimited key path against a tree.
///
/// Descends one key at a time and returns `None` as soon as a key is
/// missing or a scalar is reached while keys remain. Numeric segments index
/// into sequences. Every segment is a literal key, so the empty path looks
/// up the empty key.
///
/// # Example
/// ```
/// use serde_json::json;
/// use yaml_confluence::config::get_by_path;
///
/// let tree = json!({"database": {"host": "db.local", "replicas": ["a", "b"]}});
/// let tree = tree.as_object().unwrap();
/// assert_eq!(get_by_path(tree, "database:host"), Some(&json!("db.local")));
/// assert_eq!(get_by_path(tree, "database:replicas:1"), Some(&json!("b")));
/// assert_eq!(get_by_path(tree, "database:host:port"), None);
/// ```
pub fn get_by_path<'a>(tree: &'a ConfigTree, path: &str) -> Option<&'a Value> {
    let mut keys = path.split(PATH_DELIMITER);
    let mut current = tree.get(keys.next()?)?;

    for key in keys {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(parse_index(key)?)?,
            // Scalar reached with keys remaining
            _ => return None,
        };
    }

    Some(current)
}

/// Parse a sequence index written in canonical decimal form (`0`, `12`).
///
/// Signs, leading zeros and anything but ASCII digits are rejected.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment.len() == 1 || !segment.starts_with('0'));
    if canonical { segment.parse().ok() } else { None }
}

/// Collect every leaf of a tree together with its colon-joined path.
///
/// Empty maps and empty sequences count as leaves.
pub fn leaf_paths(tree: &ConfigTree) -> Vec<(String, &Value)> {
    let mut leaves = Vec::new();
    let mut stack: Vec<(String, &Value)> = tree
        .iter()
        .rev()
        .map(|(key, value)| (key.clone(), value))
        .collect();

    while let Some((path, value)) = stack.pop() {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map.iter().rev() {
                    stack.push((format!("{}{}{}", path, PATH_DELIMITER, key), child));
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push((format!("{}{}{}", path, PATH_DELIMITER, index), child));
                }
            }
            _ => leaves.push((path, value)),
        }
    }

    leaves
}
