//! Schema-bound, path-addressed mutation engine for editable form
//! documents.
//!
//! A read-only [`SchemaNode`] tree describes the document's fields; the
//! document itself is a plain `serde_json::Value` owned by the caller.
//! Renderers drive [`visit`] to get one record per widget, and feed edits
//! back through [`set_at_path`], [`insert_element`] and [`remove_element`],
//! each of which returns a new document and leaves the input untouched.
//!
//! # Example
//!
//! ```
//! use formdoc_core::{container, insert_element, remove_element, repeated,
//!                    set_at_path, text};
//! use serde_json::json;
//!
//! let schema = container(vec![
//!     ("name".to_string(), text()),
//!     ("tags".to_string(), repeated(text())),
//! ]);
//! let doc = json!({"name": "a", "tags": ["x", "y"]});
//!
//! let doc2 = remove_element(&doc, &["tags".into()], 0);
//! assert_eq!(doc2, json!({"name": "a", "tags": ["y"]}));
//!
//! let doc3 = insert_element(&doc, &schema, &["tags".into()]);
//! assert_eq!(doc3, json!({"name": "a", "tags": ["x", "y", ""]}));
//!
//! let doc4 = set_at_path(&doc, &["name".into()], json!("b"));
//! assert_eq!(doc4, json!({"name": "b", "tags": ["x", "y"]}));
//! assert_eq!(doc["name"], "a");
//! ```

pub mod mutate;
pub mod schema;
pub mod synth;
pub mod traverse;

pub use mutate::{insert_element, remove_element, set_at_path};
pub use schema::{
    choice, container, flag, long_text, number, option, option_string, repeated, text,
    ChoiceOption, NodeMeta, ScalarKind, SchemaNode,
};
pub use synth::synthesize;
pub use traverse::{visit, Traversal, VisitRecord};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
