//! The editor session: one graph, its catalog, and the backend collaborators.

use crate::catalog::{Catalog, CatalogSource};
use crate::error::{GraphError, ResolveError, SessionError};
use crate::experiment::{ExperimentRecord, ExperimentSource, ProjectId};
use crate::graph::{
    Edge, FILES_PARAMETER, Node, NodeId, ParameterValue, Parameters, PipelineGraph, Position,
};
use crate::resolver::{PipelineResolver, ResolvedStep};
use crate::submission::{PipelineClient, PipelineSubmission, SavedPipeline, SubmissionReceipt};
use std::sync::Arc;

mod builder;

pub use builder::EditorSessionBuilder;

/// Tracing target for session operations.
pub const TRACING_TARGET: &str = "pipegraph::session";

/// Owns the pipeline graph being edited for one project.
///
/// All edits are synchronous and go through `&mut self`. Loading the catalog
/// or experiments and submitting pipelines are async and independent of one
/// another; dropping one of those futures simply discards its result.
pub struct EditorSession {
    project_id: ProjectId,
    client: Arc<dyn PipelineClient>,
    catalog_source: Option<Arc<dyn CatalogSource>>,
    experiment_source: Option<Arc<dyn ExperimentSource>>,
    catalog: Catalog,
    experiments: Vec<ExperimentRecord>,
    graph: PipelineGraph,
    resolver: PipelineResolver,
    pipeline_name: String,
}

impl EditorSession {
    pub fn builder(project_id: ProjectId, client: Arc<dyn PipelineClient>) -> EditorSessionBuilder {
        EditorSessionBuilder::new(project_id, client)
    }

    /// Loads the catalog and the experiment list.
    pub async fn initialize(&mut self) {
        self.load_catalog().await;
        self.load_experiments().await;
    }

    /// (Re)loads the node-type catalog and returns how many types it offers.
    ///
    /// Without a configured source, or when the source fails, the catalog is
    /// left empty. Existing nodes are untouched either way.
    pub async fn load_catalog(&mut self) -> usize {
        self.catalog = match &self.catalog_source {
            Some(source) => Catalog::load(source.as_ref()).await,
            None => {
                tracing::debug!(target: TRACING_TARGET, "No catalog source configured");
                Catalog::empty()
            }
        };
        self.catalog.len()
    }

    /// (Re)loads the experiments selectable in the start node.
    pub async fn load_experiments(&mut self) -> usize {
        let Some(source) = &self.experiment_source else {
            tracing::debug!(target: TRACING_TARGET, "No experiment source configured");
            return 0;
        };

        self.experiments = match source.list_experiments(self.project_id).await {
            Ok(experiments) => experiments,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    project_id = self.project_id,
                    %error,
                    "Failed to load experiments"
                );
                Vec::new()
            }
        };
        self.experiments.len()
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn experiments(&self) -> &[ExperimentRecord] {
        &self.experiments
    }

    pub fn graph(&self) -> &PipelineGraph {
        &self.graph
    }

    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    pub fn set_pipeline_name(&mut self, name: impl Into<String>) {
        self.pipeline_name = name.into();
    }

    pub fn add_node(&mut self, node_type: impl Into<String>, position: Position) -> NodeId {
        self.graph.add_node(node_type, position, &self.catalog)
    }

    pub fn connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Option<Edge>, GraphError> {
        self.graph.connect(source, target)
    }

    pub fn disconnect(&mut self, source: &str) -> Option<Edge> {
        self.graph.disconnect(source)
    }

    pub fn update_parameters(
        &mut self,
        id: &str,
        parameters: Parameters,
    ) -> Result<(), GraphError> {
        self.graph.update_parameters(id, parameters)
    }

    /// Replaces the start node's file selection with the given experiments.
    pub fn select_files(&mut self, experiment_ids: &[u64]) -> Result<(), GraphError> {
        let mut parameters = self
            .graph
            .node(NodeId::START)
            .map(|n| n.parameters.clone())
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::start()))?;
        let files = experiment_ids
            .iter()
            .map(|&id| serde_json::Value::from(id))
            .collect();
        parameters.insert(FILES_PARAMETER.to_string(), ParameterValue::List(files));
        self.graph.update_parameters(NodeId::START, parameters)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        self.graph.remove_node(id)
    }

    pub fn select_node(&mut self, id: &str) -> Result<&Node, GraphError> {
        self.graph.select_node(id)
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.graph.selected_node()
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
    }

    /// Linearizes the current graph. Recomputed on every call.
    pub fn resolve(&self) -> Result<Vec<ResolvedStep>, ResolveError> {
        self.resolver
            .resolve(self.graph.nodes(), self.graph.edges())
    }

    /// Resolves the graph and submits it for execution.
    pub async fn run(&self) -> Result<SubmissionReceipt, SessionError> {
        let submission = PipelineSubmission::new(self.resolve()?);
        tracing::info!(
            target: TRACING_TARGET,
            project_id = self.project_id,
            steps = submission.pipeline.len(),
            "Submitting pipeline for execution"
        );

        self.client
            .process(self.project_id, &submission)
            .await
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET,
                    project_id = self.project_id,
                    %error,
                    "Pipeline run failed"
                );
                error.into()
            })
    }

    /// Resolves the graph and saves it under the session's pipeline name.
    pub async fn save(&self) -> Result<SubmissionReceipt, SessionError> {
        let name = self.pipeline_name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyPipelineName);
        }
        let submission = PipelineSubmission::named(self.resolve()?, name);
        tracing::info!(
            target: TRACING_TARGET,
            project_id = self.project_id,
            name,
            steps = submission.pipeline.len(),
            "Saving pipeline"
        );

        self.client
            .save(self.project_id, &submission)
            .await
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET,
                    project_id = self.project_id,
                    name,
                    %error,
                    "Saving pipeline failed"
                );
                error.into()
            })
    }

    /// Pipelines previously saved for this project.
    pub async fn saved_pipelines(&self) -> Result<Vec<SavedPipeline>, SessionError> {
        Ok(self.client.list(self.project_id).await?)
    }

    pub async fn delete_saved_pipeline(&self, pipeline_id: u64) -> Result<(), SessionError> {
        self.client.delete(self.project_id, pipeline_id).await?;
        tracing::info!(
            target: TRACING_TARGET,
            project_id = self.project_id,
            pipeline_id,
            "Deleted saved pipeline"
        );
        Ok(())
    }
}
