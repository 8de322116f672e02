//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build, resolve and submit a
//! pipeline graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipegraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = Catalog::from_json(&std::fs::read_to_string("forms/processing_functions.json")?)?;
//! let mut graph = PipelineGraph::new();
//! let node = graph.add_node("FeatureFinderMetabo", Position::default(), &catalog);
//! graph.connect(NodeId::start(), node)?;
//!
//! for step in graph.resolve()? {
//!     println!("{}", step);
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Edge, Node, NodeId, ParameterValue, Parameters, PipelineGraph, Position};

// Catalog
pub use crate::catalog::{
    Catalog, CatalogSource, JsonCatalogFile, NodeTypeDefinition, ParameterKind, ParameterSchema,
    StaticCatalog,
};

// Resolution
pub use crate::resolver::{CyclePolicy, PipelineResolver, ResolvedStep, format_chain, resolve};

// Session and collaborators
pub use crate::experiment::{ExperimentRecord, ExperimentSource, ProjectId};
pub use crate::session::{EditorSession, EditorSessionBuilder};
pub use crate::submission::{
    PipelineClient, PipelineSubmission, SavedPipeline, SavedStep, SubmissionReceipt,
};

// Error types
pub use crate::error::{CatalogError, GraphError, ResolveError, SessionError, SubmissionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
