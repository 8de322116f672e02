use crate::graph::{ParameterValue, Parameters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The input widget/shape a parameter expects.
///
/// Only the list/scalar split matters to the graph model; the remaining
/// variants are carried through so an editor can render the right control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterKind {
    Text,
    Number,
    Select,
    List,
    Other(String),
}

impl ParameterKind {
    /// Whether values of this kind are collections rather than single values.
    pub fn is_list(&self) -> bool {
        matches!(self, ParameterKind::List)
    }

    /// The value a freshly created node holds for a parameter of this kind.
    pub fn default_value(&self) -> ParameterValue {
        match self {
            ParameterKind::Text => ParameterValue::Scalar(serde_json::Value::String(String::new())),
            ParameterKind::List => ParameterValue::List(Vec::new()),
            ParameterKind::Number | ParameterKind::Select | ParameterKind::Other(_) => {
                ParameterValue::Scalar(serde_json::Value::Null)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParameterKind::Text => "text",
            ParameterKind::Number => "number",
            ParameterKind::Select => "select",
            ParameterKind::List => "list",
            ParameterKind::Other(other) => other,
        }
    }
}

impl From<String> for ParameterKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "text" | "string" => ParameterKind::Text,
            "number" | "float" | "int" | "integer" => ParameterKind::Number,
            "select" => ParameterKind::Select,
            "list" | "array" | "files" | "multiselect" => ParameterKind::List,
            _ => ParameterKind::Other(raw),
        }
    }
}

impl From<ParameterKind> for String {
    fn from(kind: ParameterKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one input accepted by a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
}

impl ParameterSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }
}

/// A processing function offered by the catalog, with its declared inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
}

impl NodeTypeDefinition {
    /// Builds the initial parameter mapping for a node of this type.
    pub fn initial_parameters(&self) -> Parameters {
        initial_parameters(&self.parameters)
    }
}

/// One default value per schema field, keyed by field name.
pub fn initial_parameters(schema: &[ParameterSchema]) -> Parameters {
    schema
        .iter()
        .map(|field| (field.name.clone(), field.kind.default_value()))
        .collect()
}
