use super::EditorSession;
use crate::catalog::{Catalog, CatalogSource};
use crate::experiment::{ExperimentSource, ProjectId};
use crate::graph::PipelineGraph;
use crate::resolver::PipelineResolver;
use crate::submission::PipelineClient;
use std::sync::Arc;

/// Configures an `EditorSession` before it is created.
pub struct EditorSessionBuilder {
    project_id: ProjectId,
    client: Arc<dyn PipelineClient>,
    catalog_source: Option<Arc<dyn CatalogSource>>,
    experiment_source: Option<Arc<dyn ExperimentSource>>,
    catalog: Catalog,
    graph: PipelineGraph,
    resolver: PipelineResolver,
    pipeline_name: String,
}

impl EditorSessionBuilder {
    pub fn new(project_id: ProjectId, client: Arc<dyn PipelineClient>) -> Self {
        Self {
            project_id,
            client,
            catalog_source: None,
            experiment_source: None,
            catalog: Catalog::empty(),
            graph: PipelineGraph::new(),
            resolver: PipelineResolver::new(),
            pipeline_name: String::new(),
        }
    }

    /// Source queried by `EditorSession::load_catalog`.
    pub fn with_catalog_source(mut self, source: Arc<dyn CatalogSource>) -> Self {
        self.catalog_source = Some(source);
        self
    }

    /// Source queried by `EditorSession::load_experiments`.
    pub fn with_experiment_source(mut self, source: Arc<dyn ExperimentSource>) -> Self {
        self.experiment_source = Some(source);
        self
    }

    /// Starts with an already loaded catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Starts from an existing graph instead of a freshly seeded one.
    pub fn with_graph(mut self, graph: PipelineGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_resolver(mut self, resolver: PipelineResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_pipeline_name(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = name.into();
        self
    }

    pub fn build(self) -> EditorSession {
        EditorSession {
            project_id: self.project_id,
            client: self.client,
            catalog_source: self.catalog_source,
            experiment_source: self.experiment_source,
            catalog: self.catalog,
            experiments: Vec::new(),
            graph: self.graph,
            resolver: self.resolver,
            pipeline_name: self.pipeline_name,
        }
    }
}
