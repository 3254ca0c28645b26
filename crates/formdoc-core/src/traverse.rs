//! Schema/value co-traversal.
//!
//! [`visit`] walks the schema tree and the current document in lock-step
//! and yields one record per binding point, in the order the renderer
//! should lay widgets out: schema-declared order for containers, ascending
//! index order for sequences. The traversal is a pure function of its two
//! inputs; each call starts from scratch, so a render pass can simply
//! re-run it after every accepted mutation.

use serde_json::Value;

use formdoc_path::{get, Path};

use crate::schema::SchemaNode;
use crate::synth::synthesize;

/// One binding point produced by [`visit`].
#[derive(Debug, Clone, PartialEq)]
pub enum VisitRecord<'a> {
    /// A leaf field: bind a widget at `path` showing `value`.
    ///
    /// `value` is the current document value at `path`, or the node's
    /// synthesized default when the location is missing.
    Field {
        path: Path,
        node: &'a SchemaNode,
        value: Value,
    },
    /// The append affordance of a mutable repeated collection at `path`;
    /// wired by the renderer to [`crate::insert_element`].
    Append { path: Path, element: &'a SchemaNode },
}

impl<'a> VisitRecord<'a> {
    /// The document location this record binds to.
    pub fn path(&self) -> &Path {
        match self {
            VisitRecord::Field { path, .. } | VisitRecord::Append { path, .. } => path,
        }
    }
}

/// Start a fresh lazy traversal of `schema` paired with `doc`.
pub fn visit<'a>(schema: &'a SchemaNode, doc: &'a Value) -> Traversal<'a> {
    Traversal {
        doc,
        stack: vec![Frame::Node {
            path: Vec::new(),
            node: schema,
        }],
    }
}

/// Iterator over [`VisitRecord`]s; see [`visit`].
pub struct Traversal<'a> {
    doc: &'a Value,
    stack: Vec<Frame<'a>>,
}

enum Frame<'a> {
    Node { path: Path, node: &'a SchemaNode },
    Emit(VisitRecord<'a>),
}

impl<'a> Iterator for Traversal<'a> {
    type Item = VisitRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let (path, node) = match frame {
                Frame::Emit(record) => return Some(record),
                Frame::Node { path, node } => (path, node),
            };
            match node {
                SchemaNode::Container { children, .. } => {
                    // Pushed in reverse so children pop in declared order.
                    for (name, child) in children.iter().rev() {
                        let mut child_path = path.clone();
                        child_path.push(name.clone());
                        self.stack.push(Frame::Node {
                            path: child_path,
                            node: child,
                        });
                    }
                }
                SchemaNode::Repeated {
                    element, mutable, ..
                } => {
                    if *mutable {
                        self.stack.push(Frame::Emit(VisitRecord::Append {
                            path: path.clone(),
                            element,
                        }));
                    }
                    let len = match get(self.doc, &path) {
                        Some(Value::Array(arr)) => arr.len(),
                        _ => 0,
                    };
                    for index in (0..len).rev() {
                        let mut elem_path = path.clone();
                        elem_path.push(index.to_string());
                        self.stack.push(Frame::Node {
                            path: elem_path,
                            node: element,
                        });
                    }
                }
                leaf => {
                    let value = match get(self.doc, &path) {
                        Some(v) => v.clone(),
                        None => synthesize(leaf),
                    };
                    return Some(VisitRecord::Field {
                        path,
                        node: leaf,
                        value,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{container, flag, repeated, text};
    use formdoc_path::format_pointer;
    use serde_json::json;

    fn pointers(schema: &SchemaNode, doc: &Value) -> Vec<String> {
        visit(schema, doc)
            .map(|record| match record {
                VisitRecord::Field { path, .. } => format_pointer(&path),
                VisitRecord::Append { path, .. } => format!("{}+", format_pointer(&path)),
            })
            .collect()
    }

    fn sample_schema() -> SchemaNode {
        container(vec![
            ("name".to_string(), text()),
            ("tags".to_string(), repeated(text())),
            (
                "flags".to_string(),
                container(vec![("done".to_string(), flag())]),
            ),
        ])
    }

    #[test]
    fn test_deterministic_order() {
        let schema = sample_schema();
        let doc = json!({"name": "a", "tags": ["x", "y"]});
        assert_eq!(
            pointers(&schema, &doc),
            ["/name", "/tags/0", "/tags/1", "/tags+", "/flags/done"]
        );
    }

    #[test]
    fn test_missing_sequence_yields_only_append() {
        let schema = sample_schema();
        let doc = json!({"name": "a"});
        assert_eq!(pointers(&schema, &doc), ["/name", "/tags+", "/flags/done"]);
    }

    #[test]
    fn test_immutable_repeated_has_no_append() {
        let schema = container(vec![(
            "tags".to_string(),
            repeated(text()).read_only(),
        )]);
        let doc = json!({"tags": ["x"]});
        assert_eq!(pointers(&schema, &doc), ["/tags/0"]);
    }

    #[test]
    fn test_leaf_values_fall_back_to_defaults() {
        let schema = container(vec![
            ("name".to_string(), text().with_default("anon")),
            ("done".to_string(), flag()),
        ]);
        let doc = json!({"done": true});
        let values: Vec<Value> = visit(&schema, &doc)
            .map(|record| match record {
                VisitRecord::Field { value, .. } => value,
                VisitRecord::Append { .. } => panic!("no repeated nodes here"),
            })
            .collect();
        assert_eq!(values, [json!("anon"), json!(true)]);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let schema = sample_schema();
        let doc = json!({"tags": ["x"]});
        let first: Vec<String> = pointers(&schema, &doc);
        let second: Vec<String> = pointers(&schema, &doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_path_accessor() {
        let schema = container(vec![("name".to_string(), text())]);
        let doc = json!({});
        let records: Vec<VisitRecord> = visit(&schema, &doc).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(format_pointer(records[0].path()), "/name");
    }
}
