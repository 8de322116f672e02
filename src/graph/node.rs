use super::{NodeId, ParameterValue, Parameters};
use crate::catalog::{ParameterKind, ParameterSchema, initial_parameters};
use serde::{Deserialize, Serialize};

/// Node type of the seeded start node.
pub const START_NODE_TYPE: &str = "select_files";

/// Label shown for the seeded start node.
pub const START_NODE_LABEL: &str = "Select files";

/// Parameter of the start node holding the selected input files.
pub const FILES_PARAMETER: &str = "files";

/// Canvas coordinates of a node. Only meaningful to the editor display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One processing step placed on the editor canvas.
///
/// Serializes in the editor's node shape, `{id, type, position, data: {label,
/// parameters}}`. Flat `label`/`parameters` fields are accepted on input too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EditorNode", into = "EditorNode")]
pub struct Node {
    pub id: NodeId,
    pub node_type: String,
    pub label: String,
    pub position: Position,
    /// Declared inputs, copied from the catalog when the node was created.
    pub schema: Vec<ParameterSchema>,
    pub parameters: Parameters,
}

impl Node {
    /// Builds a node whose parameters are the defaults of `schema`.
    pub fn new(
        id: NodeId,
        node_type: impl Into<String>,
        position: Position,
        schema: Vec<ParameterSchema>,
    ) -> Self {
        let node_type = node_type.into();
        let label = default_label(&node_type);
        let parameters = initial_parameters(&schema);
        Self {
            id,
            node_type,
            label,
            position,
            schema,
            parameters,
        }
    }

    /// The `select_files` node every graph starts with.
    pub fn start() -> Self {
        Self::new(
            NodeId::start(),
            START_NODE_TYPE,
            Position::new(250.0, 0.0),
            vec![ParameterSchema::new(
                FILES_PARAMETER,
                "Files",
                ParameterKind::List,
            )],
        )
    }

    pub fn is_start(&self) -> bool {
        self.id.is_start()
    }

    /// Looks up the declared schema of a parameter.
    pub fn schema_for(&self, parameter: &str) -> Option<&ParameterSchema> {
        self.schema.iter().find(|field| field.name == parameter)
    }
}

/// The display label derived from a node type.
pub fn default_label(node_type: &str) -> String {
    if node_type == START_NODE_TYPE {
        START_NODE_LABEL.to_string()
    } else {
        format!("{} Node", node_type)
    }
}

/// Node as it appears in editor JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EditorNode {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<EditorNodeData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    schema: Vec<ParameterSchema>,
    #[serde(default, skip_serializing)]
    label: Option<String>,
    #[serde(default, skip_serializing)]
    parameters: Option<EditorParameters>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EditorNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<EditorParameters>,
}

/// Parameters as stored by the editor.
///
/// Nodes dropped from the catalog carry the schema array itself in place of
/// values. Its entries are keyed by index, the same keys a JavaScript object
/// spread of an array produces, so the resolver strips them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EditorParameters {
    Values(Parameters),
    Legacy(Vec<serde_json::Value>),
}

impl From<EditorParameters> for Parameters {
    fn from(parameters: EditorParameters) -> Self {
        match parameters {
            EditorParameters::Values(values) => values,
            EditorParameters::Legacy(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| (index.to_string(), ParameterValue::from(entry)))
                .collect(),
        }
    }
}

impl From<EditorNode> for Node {
    fn from(record: EditorNode) -> Self {
        let data = record.data.unwrap_or_default();
        Self {
            id: record.id,
            node_type: record.node_type,
            label: data.label.or(record.label).unwrap_or_default(),
            position: record.position,
            schema: record.schema,
            parameters: data
                .parameters
                .or(record.parameters)
                .map(Parameters::from)
                .unwrap_or_default(),
        }
    }
}

impl From<Node> for EditorNode {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            node_type: node.node_type,
            position: node.position,
            data: Some(EditorNodeData {
                label: Some(node.label),
                parameters: Some(EditorParameters::Values(node.parameters)),
            }),
            schema: node.schema,
            label: None,
            parameters: None,
        }
    }
}
