use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised by edits to a `PipelineGraph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' does not exist in the pipeline graph")]
    NodeNotFound(NodeId),

    #[error("The start node '{}' cannot be removed", NodeId::START)]
    StartNodeRemoval,

    #[error(
        "Parameter '{parameter}' of node '{node_id}' expects a {expected} value, but received the other shape"
    )]
    ParameterKindMismatch {
        node_id: NodeId,
        parameter: String,
        expected: &'static str,
    },
}

/// Errors that can occur while linearizing a graph into pipeline steps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error(
        "Cycle detected: node '{node_id}' was reached again after {steps_resolved} resolved steps"
    )]
    CycleDetected {
        node_id: NodeId,
        steps_resolved: usize,
    },
}

/// Errors that can occur while loading the node-type catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Could not read catalog file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(String),

    #[error("Catalog source unavailable: {0}")]
    Unavailable(String),

    #[error("Node type '{0}' is defined more than once in the catalog")]
    DuplicateName(String),
}

/// Errors reported by the backend collaborators (submission and listing).
#[derive(Error, Debug, Clone)]
pub enum SubmissionError {
    #[error("Backend rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

/// Errors surfaced by an `EditorSession`.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("A pipeline must be given a name before it can be saved")]
    EmptyPipelineName,
}
