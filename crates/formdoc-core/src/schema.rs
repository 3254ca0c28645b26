//! Declarative field schema for editable form documents.
//!
//! A schema tree is built once per editing session and never mutated by the
//! engine; every operation takes it by shared reference.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use formdoc_path::PathStep;

/// Input kinds for single-line scalar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Number,
}

/// Display metadata shared by every node kind.
///
/// `attrs` is an opaque bag the renderer receives untouched; the engine
/// never inspects it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

/// One selectable entry of a [`SchemaNode::Choice`] field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: Value,
    pub label: String,
}

/// One node of the schema tree describing a document field.
///
/// The kinds are mutually exclusive variants: every field meaningful to a
/// kind is required for that variant and absent for the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    Scalar {
        #[serde(default)]
        meta: NodeMeta,
        scalar: ScalarKind,
        mutable: bool,
        #[serde(default)]
        default: Option<Value>,
    },
    LongText {
        #[serde(default)]
        meta: NodeMeta,
        mutable: bool,
        #[serde(default)]
        default: Option<Value>,
    },
    Choice {
        #[serde(default)]
        meta: NodeMeta,
        mutable: bool,
        #[serde(default)]
        default: Option<Value>,
        options: Vec<ChoiceOption>,
    },
    Flag {
        #[serde(default)]
        meta: NodeMeta,
        mutable: bool,
        #[serde(default)]
        default: Option<Value>,
    },
    Container {
        #[serde(default)]
        meta: NodeMeta,
        mutable: bool,
        // Association list so declared child order survives any map impl.
        children: Vec<(String, SchemaNode)>,
    },
    Repeated {
        #[serde(default)]
        meta: NodeMeta,
        mutable: bool,
        element: Box<SchemaNode>,
    },
}

impl SchemaNode {
    /// Display metadata of this node.
    pub fn meta(&self) -> &NodeMeta {
        match self {
            SchemaNode::Scalar { meta, .. }
            | SchemaNode::LongText { meta, .. }
            | SchemaNode::Choice { meta, .. }
            | SchemaNode::Flag { meta, .. }
            | SchemaNode::Container { meta, .. }
            | SchemaNode::Repeated { meta, .. } => meta,
        }
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            SchemaNode::Scalar { meta, .. }
            | SchemaNode::LongText { meta, .. }
            | SchemaNode::Choice { meta, .. }
            | SchemaNode::Flag { meta, .. }
            | SchemaNode::Container { meta, .. }
            | SchemaNode::Repeated { meta, .. } => meta,
        }
    }

    /// Whether the renderer may edit the field this node describes.
    pub fn is_mutable(&self) -> bool {
        match self {
            SchemaNode::Scalar { mutable, .. }
            | SchemaNode::LongText { mutable, .. }
            | SchemaNode::Choice { mutable, .. }
            | SchemaNode::Flag { mutable, .. }
            | SchemaNode::Container { mutable, .. }
            | SchemaNode::Repeated { mutable, .. } => *mutable,
        }
    }

    /// Resolve a path against the schema tree.
    ///
    /// This is the schema-side counterpart of [`formdoc_path::get`]: the
    /// same path vocabulary, resolved by schema structure instead of by the
    /// containers present in a value tree. A step descends into a
    /// `Container` child by name, or through a `Repeated` element schema
    /// when it parses as a sequence index. `None` when a step does not
    /// resolve.
    pub fn resolve(&self, path: &[PathStep]) -> Option<&SchemaNode> {
        let mut current = self;
        for step in path {
            current = match current {
                SchemaNode::Container { children, .. } => children
                    .iter()
                    .find(|(name, _)| name == step)
                    .map(|(_, child)| child)?,
                SchemaNode::Repeated { element, .. } => {
                    step.parse::<usize>().ok()?;
                    element
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Match a raw selected string against this node's options.
    ///
    /// Options are compared by the canonical rendering of their value (see
    /// [`option_string`]). When nothing matches, or the node is not a
    /// `Choice`, the raw string is passed through unchanged; selection is
    /// tolerated, not validated.
    pub fn match_option(&self, raw: &str) -> Value {
        if let SchemaNode::Choice { options, .. } = self {
            for opt in options {
                if option_string(&opt.value) == raw {
                    return opt.value.clone();
                }
            }
        }
        Value::String(raw.to_string())
    }

    /// Set the default value (leaf kinds only; containers are unchanged).
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        match &mut self {
            SchemaNode::Scalar { default, .. }
            | SchemaNode::LongText { default, .. }
            | SchemaNode::Choice { default, .. }
            | SchemaNode::Flag { default, .. } => *default = Some(value.into()),
            SchemaNode::Container { .. } | SchemaNode::Repeated { .. } => {}
        }
        self
    }

    /// Set the display name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.meta_mut().label = Some(label.into());
        self
    }

    /// Attach one renderer-only attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta_mut().attrs.insert(key.into(), value.into());
        self
    }

    /// Mark the node as not editable.
    pub fn read_only(mut self) -> Self {
        match &mut self {
            SchemaNode::Scalar { mutable, .. }
            | SchemaNode::LongText { mutable, .. }
            | SchemaNode::Choice { mutable, .. }
            | SchemaNode::Flag { mutable, .. }
            | SchemaNode::Container { mutable, .. }
            | SchemaNode::Repeated { mutable, .. } => *mutable = false,
        }
        self
    }
}

/// Canonical string rendering used to match renderer input against choice
/// options: strings render unquoted, every other value as its JSON text.
pub fn option_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A single-line text field.
pub fn text() -> SchemaNode {
    SchemaNode::Scalar {
        meta: NodeMeta::default(),
        scalar: ScalarKind::Text,
        mutable: true,
        default: None,
    }
}

/// A single-line numeric field.
pub fn number() -> SchemaNode {
    SchemaNode::Scalar {
        meta: NodeMeta::default(),
        scalar: ScalarKind::Number,
        mutable: true,
        default: None,
    }
}

/// A multi-line text field.
pub fn long_text() -> SchemaNode {
    SchemaNode::LongText {
        meta: NodeMeta::default(),
        mutable: true,
        default: None,
    }
}

/// A boolean field.
pub fn flag() -> SchemaNode {
    SchemaNode::Flag {
        meta: NodeMeta::default(),
        mutable: true,
        default: None,
    }
}

/// A field selecting one of an ordered list of options.
pub fn choice(options: Vec<ChoiceOption>) -> SchemaNode {
    SchemaNode::Choice {
        meta: NodeMeta::default(),
        mutable: true,
        default: None,
        options,
    }
}

/// One option of a [`choice`] field.
pub fn option(value: impl Into<Value>, label: impl Into<String>) -> ChoiceOption {
    ChoiceOption {
        value: value.into(),
        label: label.into(),
    }
}

/// A fixed group of named child fields, in declared order.
pub fn container(children: Vec<(String, SchemaNode)>) -> SchemaNode {
    SchemaNode::Container {
        meta: NodeMeta::default(),
        mutable: true,
        children,
    }
}

/// A growable sequence of elements sharing one schema.
pub fn repeated(element: SchemaNode) -> SchemaNode {
    SchemaNode::Repeated {
        meta: NodeMeta::default(),
        mutable: true,
        element: Box::new(element),
    }
}
