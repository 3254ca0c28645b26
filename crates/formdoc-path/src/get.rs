use serde_json::Value;

use crate::PathStep;

/// Read the value at `path` in a document.
///
/// `None` means the location is missing, which is distinct from a present
/// `null`: `get` on an explicit `null` returns `Some(&Value::Null)`.
/// A non-indexable value, an absent key, or a non-numeric or out-of-range
/// sequence index short-circuits to `None`; this function never fails.
///
/// # Example
///
/// ```
/// use formdoc_path::get;
/// use serde_json::{json, Value};
///
/// let doc = json!({"name": "a", "tags": ["x", "y"], "note": null});
/// assert_eq!(get(&doc, &["tags".into(), "1".into()]), Some(&json!("y")));
/// assert_eq!(get(&doc, &["note".into()]), Some(&Value::Null));
/// assert_eq!(get(&doc, &["tags".into(), "9".into()]), None);
/// assert_eq!(get(&doc, &["missing".into(), "deep".into()]), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        match current {
            Value::Array(arr) => {
                let idx: usize = step.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(step.as_str())?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Mutable companion of [`get`], with the same resolution rules.
pub fn get_mut<'a>(val: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        match current {
            Value::Array(arr) => {
                let idx: usize = step.parse().ok()?;
                current = arr.get_mut(idx)?;
            }
            Value::Object(map) => {
                current = map.get_mut(step.as_str())?;
            }
            _ => return None,
        }
    }
    Some(current)
}
