//! Pointwise and structural document mutation.
//!
//! Every operation takes the current document by shared reference, deep
//! copies it, edits the copy, and returns it; the input document is never
//! modified and remains the caller's to keep or discard. Irregular inputs
//! degrade to a no-op or to silent materialization, never to an error.

use serde_json::{Map, Value};

use formdoc_path::{get_mut, PathStep};

use crate::schema::SchemaNode;
use crate::synth::synthesize;

/// Write `value` at `path` in a copy of `root`.
///
/// An empty path is a no-op returning the document unchanged. Missing or
/// non-indexable intermediate locations are materialized as empty objects
/// regardless of what the schema would say at that location. This policy is
/// intentionally not schema-aware, unlike [`insert_element`]; do not "fix"
/// it to consult the schema.
///
/// # Example
///
/// ```
/// use formdoc_core::set_at_path;
/// use serde_json::json;
///
/// let doc = json!({"name": "a"});
/// let next = set_at_path(&doc, &["name".into()], json!("b"));
/// assert_eq!(next, json!({"name": "b"}));
/// assert_eq!(doc, json!({"name": "a"}));
/// ```
pub fn set_at_path(root: &Value, path: &[PathStep], value: Value) -> Value {
    let mut doc = root.clone();
    if let Some((last, intermediate)) = path.split_last() {
        let slot = descend(&mut doc, intermediate);
        write_step(slot, last, value);
    }
    doc
}

/// Append a synthesized element to the repeated collection at `path`.
///
/// `path` is resolved against `schema_root` to find the governing
/// `Repeated` node; anything else resolves to a no-op copy. The sequence
/// itself is materialized as empty first when absent from the document.
pub fn insert_element(root: &Value, schema_root: &SchemaNode, path: &[PathStep]) -> Value {
    let element = match schema_root.resolve(path) {
        Some(SchemaNode::Repeated { element, .. }) => synthesize(element),
        _ => return root.clone(),
    };
    let mut doc = root.clone();
    let slot = descend(&mut doc, path);
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    if let Value::Array(arr) = slot {
        arr.push(element);
    }
    doc
}

/// Remove the element at `index` from the sequence at `path`, preserving
/// the relative order of the remaining elements.
///
/// Out-of-range indices and locations that are not sequences are no-ops,
/// not errors.
pub fn remove_element(root: &Value, path: &[PathStep], index: usize) -> Value {
    let mut doc = root.clone();
    if let Some(Value::Array(arr)) = get_mut(&mut doc, path) {
        if index < arr.len() {
            arr.remove(index);
        }
    }
    doc
}

/// Walk `steps`, forcing each location into something indexable.
///
/// Existing arrays are entered through an in-range numeric step; every
/// other situation (absent key, scalar in the way, bad index) collapses the
/// location to an empty object before entering it.
fn descend<'a>(doc: &'a mut Value, steps: &[PathStep]) -> &'a mut Value {
    let mut current = doc;
    for step in steps {
        current = step_into(current, step);
    }
    current
}

fn step_into<'a>(current: &'a mut Value, step: &str) -> &'a mut Value {
    let array_idx = match &*current {
        Value::Array(arr) => step.parse::<usize>().ok().filter(|&i| i < arr.len()),
        _ => None,
    };
    if let Some(idx) = array_idx {
        match current {
            Value::Array(arr) => &mut arr[idx],
            other => other, // not reached: shape checked above
        }
    } else {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => map
                .entry(step.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            other => other, // not reached: forced to an object above
        }
    }
}

/// Assign `value` under the final `step` of a write.
///
/// Arrays accept an index in `[0, len]` (assign or append); anything else
/// falls back to the same object-materialization policy as the
/// intermediate walk.
fn write_step(slot: &mut Value, step: &str, value: Value) {
    let array_idx = match &*slot {
        Value::Array(arr) => step.parse::<usize>().ok().filter(|&i| i <= arr.len()),
        _ => None,
    };
    if let Some(idx) = array_idx {
        if let Value::Array(arr) = slot {
            if idx == arr.len() {
                arr.push(value);
            } else {
                arr[idx] = value;
            }
        }
        return;
    }
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        map.insert(step.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{container, number, repeated, text};
    use serde_json::json;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let doc = json!({"name": "a", "tags": ["x", "y"]});
        let next = set_at_path(&doc, &path(&["name"]), json!("b"));
        assert_eq!(next, json!({"name": "b", "tags": ["x", "y"]}));
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let doc = json!({"name": "a"});
        let next = set_at_path(&doc, &[], json!("ignored"));
        assert_eq!(next, doc);
    }

    #[test]
    fn test_set_does_not_mutate_input() {
        let doc = json!({"name": "a", "nested": {"k": [1, 2]}});
        let snapshot = doc.clone();
        let _ = set_at_path(&doc, &path(&["nested", "k", "0"]), json!(9));
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_set_materializes_missing_intermediates_as_objects() {
        let doc = json!({});
        let next = set_at_path(&doc, &path(&["a", "b", "c"]), json!(1));
        assert_eq!(next, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_set_clobbers_scalar_intermediates() {
        let doc = json!({"a": 5});
        let next = set_at_path(&doc, &path(&["a", "b"]), json!(1));
        assert_eq!(next, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_into_array_by_index() {
        let doc = json!({"tags": ["x", "y"]});
        assert_eq!(
            set_at_path(&doc, &path(&["tags", "1"]), json!("z")),
            json!({"tags": ["x", "z"]})
        );
        // Index equal to the length appends.
        assert_eq!(
            set_at_path(&doc, &path(&["tags", "2"]), json!("z")),
            json!({"tags": ["x", "y", "z"]})
        );
    }

    #[test]
    fn test_set_bad_array_step_falls_back_to_object() {
        let doc = json!({"tags": ["x"]});
        // Out-of-range and non-numeric final steps collapse the array to an
        // object holding the written entry, per the fixed write policy.
        assert_eq!(
            set_at_path(&doc, &path(&["tags", "9"]), json!("z")),
            json!({"tags": {"9": "z"}})
        );
        assert_eq!(
            set_at_path(&doc, &path(&["tags", "first"]), json!("z")),
            json!({"tags": {"first": "z"}})
        );
    }

    #[test]
    fn test_insert_appends_synthesized_element() {
        let schema = container(vec![
            ("name".to_string(), text()),
            ("tags".to_string(), repeated(text())),
        ]);
        let doc = json!({"name": "a", "tags": ["x", "y"]});
        let next = insert_element(&doc, &schema, &path(&["tags"]));
        assert_eq!(next, json!({"name": "a", "tags": ["x", "y", ""]}));
        assert_eq!(doc, json!({"name": "a", "tags": ["x", "y"]}));
    }

    #[test]
    fn test_insert_materializes_missing_sequence() {
        let schema = container(vec![(
            "rows".to_string(),
            repeated(container(vec![("n".to_string(), number().with_default(7))])),
        )]);
        let doc = json!({});
        let next = insert_element(&doc, &schema, &path(&["rows"]));
        assert_eq!(next, json!({"rows": [{"n": 7}]}));
    }

    #[test]
    fn test_insert_noop_when_path_is_not_repeated() {
        let schema = container(vec![("name".to_string(), text())]);
        let doc = json!({"name": "a"});
        assert_eq!(insert_element(&doc, &schema, &path(&["name"])), doc);
        assert_eq!(insert_element(&doc, &schema, &path(&["absent"])), doc);
    }

    #[test]
    fn test_remove_preserves_order() {
        let doc = json!({"tags": ["x", "y", "z"]});
        assert_eq!(
            remove_element(&doc, &path(&["tags"]), 1),
            json!({"tags": ["x", "z"]})
        );
        assert_eq!(doc, json!({"tags": ["x", "y", "z"]}));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let doc = json!({"tags": ["x"]});
        assert_eq!(remove_element(&doc, &path(&["tags"]), 1), doc);
        assert_eq!(remove_element(&doc, &path(&["tags"]), 99), doc);
        assert_eq!(remove_element(&doc, &path(&["name"]), 0), doc);
    }
}
