//! Default value synthesis.
//!
//! `synthesize` gives a freshly created repeated element its
//! schema-conformant shape instead of a null placeholder. It is a pure,
//! total function over the schema union and is never invoked implicitly by
//! reads; missing locations stay missing until something writes.

use serde_json::{json, Map, Value};

use crate::schema::{ScalarKind, SchemaNode};

/// Build a schema-conformant default value for `node`.
///
/// Containers synthesize every child in declared order; repeated
/// collections always start empty.
pub fn synthesize(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Container { children, .. } => {
            let mut map = Map::new();
            for (name, child) in children {
                map.insert(name.clone(), synthesize(child));
            }
            Value::Object(map)
        }
        SchemaNode::Repeated { .. } => Value::Array(Vec::new()),
        SchemaNode::Scalar {
            scalar: ScalarKind::Number,
            default,
            ..
        } => default.clone().unwrap_or_else(|| json!(0)),
        SchemaNode::Scalar { default, .. } | SchemaNode::LongText { default, .. } => {
            default.clone().unwrap_or_else(|| Value::String(String::new()))
        }
        SchemaNode::Choice {
            default, options, ..
        } => default
            .clone()
            .or_else(|| options.first().map(|opt| opt.value.clone()))
            .unwrap_or_else(|| Value::String(String::new())),
        SchemaNode::Flag { default, .. } => Value::Bool(truthy(default.as_ref())),
    }
}

// Boolean coercion for Flag defaults: absent, null, false, 0 and "" are
// false, everything else is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
