//! Common test utilities: catalogs, graphs and in-memory collaborators.
use pipegraph::prelude::*;
use std::sync::{Arc, Mutex};

/// A catalog with three metabolomics processing steps.
///
/// - `FileConverter`: `output_format` (text)
/// - `FeatureFinderMetabo`: `noise_threshold` (number), `mass_traces` (list)
/// - `AccurateMass`: no parameters
#[allow(dead_code)]
pub fn create_catalog() -> Catalog {
    Catalog::from_definitions(vec![
        NodeTypeDefinition {
            name: "FileConverter".to_string(),
            parameters: vec![ParameterSchema::new(
                "output_format",
                "Output format",
                ParameterKind::Text,
            )],
        },
        NodeTypeDefinition {
            name: "FeatureFinderMetabo".to_string(),
            parameters: vec![
                ParameterSchema::new("noise_threshold", "Noise threshold", ParameterKind::Number),
                ParameterSchema::new("mass_traces", "Mass traces", ParameterKind::List),
            ],
        },
        NodeTypeDefinition {
            name: "AccurateMass".to_string(),
            parameters: vec![],
        },
    ])
    .expect("Fixture catalog has unique names")
}

/// Builds `1 -> a -> b -> ...` from the given node types, returning the graph
/// and the ids of the added nodes in chain order.
#[allow(dead_code)]
pub fn create_chain(node_types: &[&str]) -> (PipelineGraph, Vec<NodeId>) {
    let catalog = create_catalog();
    let mut graph = PipelineGraph::new();
    let mut ids = Vec::new();
    let mut previous = NodeId::start();
    for (i, node_type) in node_types.iter().enumerate() {
        let id = graph.add_node(*node_type, Position::new(0.0, 100.0 * i as f64), &catalog);
        graph
            .connect(previous, id.clone())
            .expect("Chain nodes exist");
        previous = id.clone();
        ids.push(id);
    }
    (graph, ids)
}

/// A bare node without schema or parameters.
#[allow(dead_code)]
pub fn bare_node(id: &str, node_type: &str) -> Node {
    Node::new(NodeId::from(id), node_type, Position::default(), vec![])
}

/// Which endpoint a recorded submission went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Endpoint {
    Process,
    Save,
}

/// Records every call and optionally rejects submissions.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingClient {
    pub submissions: Mutex<Vec<(Endpoint, ProjectId, PipelineSubmission)>>,
    pub deleted: Mutex<Vec<(ProjectId, u64)>>,
    pub saved: Vec<SavedPipeline>,
    pub reject_with: Option<u16>,
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<(Endpoint, ProjectId, PipelineSubmission)> {
        self.submissions.lock().unwrap().clone()
    }

    fn record(
        &self,
        endpoint: Endpoint,
        project_id: ProjectId,
        submission: &PipelineSubmission,
    ) -> std::result::Result<SubmissionReceipt, SubmissionError> {
        if let Some(status) = self.reject_with {
            return Err(SubmissionError::Rejected {
                status,
                message: "pipeline rejected".to_string(),
            });
        }
        self.submissions
            .lock()
            .unwrap()
            .push((endpoint, project_id, submission.clone()));
        Ok(SubmissionReceipt::ok())
    }
}

#[async_trait::async_trait]
impl PipelineClient for RecordingClient {
    async fn process(
        &self,
        project_id: ProjectId,
        submission: &PipelineSubmission,
    ) -> std::result::Result<SubmissionReceipt, SubmissionError> {
        self.record(Endpoint::Process, project_id, submission)
    }

    async fn save(
        &self,
        project_id: ProjectId,
        submission: &PipelineSubmission,
    ) -> std::result::Result<SubmissionReceipt, SubmissionError> {
        self.record(Endpoint::Save, project_id, submission)
    }

    async fn list(
        &self,
        project_id: ProjectId,
    ) -> std::result::Result<Vec<SavedPipeline>, SubmissionError> {
        Ok(self
            .saved
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete(
        &self,
        project_id: ProjectId,
        pipeline_id: u64,
    ) -> std::result::Result<(), SubmissionError> {
        self.deleted.lock().unwrap().push((project_id, pipeline_id));
        Ok(())
    }
}

/// A catalog source that is always down.
#[allow(dead_code)]
pub struct UnavailableCatalog;

#[async_trait::async_trait]
impl CatalogSource for UnavailableCatalog {
    async fn load_definitions(
        &self,
    ) -> std::result::Result<Vec<NodeTypeDefinition>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }
}

/// Serves a fixed experiment list for project 7 and fails for any other.
#[allow(dead_code)]
pub struct FixedExperiments;

#[async_trait::async_trait]
impl ExperimentSource for FixedExperiments {
    async fn list_experiments(
        &self,
        project_id: ProjectId,
    ) -> std::result::Result<Vec<ExperimentRecord>, SubmissionError> {
        if project_id == 7 {
            Ok(vec![
                ExperimentRecord::new(10, "plasma_run_a"),
                ExperimentRecord::new(11, "plasma_run_b"),
            ])
        } else {
            Err(SubmissionError::Unreachable("no such project".to_string()))
        }
    }
}

/// A session for project 7 backed by the fixture catalog and experiments.
#[allow(dead_code)]
pub fn create_session(client: Arc<RecordingClient>) -> EditorSession {
    EditorSession::builder(7, client)
        .with_catalog_source(Arc::new(StaticCatalog::new(
            create_catalog().iter().cloned().collect(),
        )))
        .with_experiment_source(Arc::new(FixedExperiments))
        .build()
}
