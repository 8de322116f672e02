//! # pipegraph - Pipeline Graph Model and Resolver
//!
//! **pipegraph** holds the node graph a user builds in a drag-and-drop pipeline
//! editor and turns it into the ordered, parameter-resolved list of steps a
//! processing backend executes.
//!
//! ## Core Workflow
//!
//! 1.  **Load the catalog**: the node types an editor can offer, each with its
//!     declared parameters, come from a [`catalog::CatalogSource`].
//! 2.  **Edit the graph**: a [`graph::PipelineGraph`] starts with a single
//!     `select_files` node (id `"1"`). Nodes are added from catalog types,
//!     connected one successor at a time, and have their parameters edited.
//! 3.  **Resolve**: the [`resolver::PipelineResolver`] walks from the start node
//!     along successor edges and produces [`resolver::ResolvedStep`]s. Cycles
//!     are reported instead of looping.
//! 4.  **Submit**: an [`session::EditorSession`] ties it together and hands the
//!     resolved pipeline to a [`submission::PipelineClient`] on run or save.
//!
//! ## Quick Start
//!
//! ```rust
//! use pipegraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = Catalog::from_json(
//!         r#"{"functions": [
//!             {"name": "peak_picking", "parameters": [
//!                 {"name": "signal_to_noise", "label": "S/N", "type": "number"}
//!             ]}
//!         ]}"#,
//!     )?;
//!
//!     let mut graph = PipelineGraph::new();
//!     let picking = graph.add_node("peak_picking", Position::new(250.0, 120.0), &catalog);
//!     graph.connect(NodeId::start(), picking.clone())?;
//!
//!     let mut parameters = Parameters::new();
//!     parameters.insert("signal_to_noise".to_string(), ParameterValue::from(3.0));
//!     graph.update_parameters(picking.as_str(), parameters)?;
//!
//!     let steps = graph.resolve()?;
//!     assert_eq!(steps.len(), 2);
//!     assert_eq!(steps[1].step_type, "peak_picking");
//!
//!     let payload = PipelineSubmission::new(steps).to_json()?;
//!     println!("{}", payload);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod prelude;
pub mod resolver;
pub mod session;
pub mod submission;
