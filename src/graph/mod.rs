//! The editable pipeline graph: nodes, edges and their parameters.

mod edge;
mod id;
mod model;
mod node;
mod parameter;

pub use edge::*;
pub use id::NodeId;
pub use model::*;
pub use node::*;
pub use parameter::*;

/// Tracing target for graph edits.
pub const TRACING_TARGET: &str = "pipegraph::graph";
