//! Payloads and client interface for handing pipelines to the backend.
//!
//! The crate ships no HTTP implementation; implement [`PipelineClient`] on
//! top of whichever client your application already uses.

use crate::error::SubmissionError;
use crate::experiment::ProjectId;
use crate::graph::Parameters;
use crate::resolver::ResolvedStep;
use serde::{Deserialize, Serialize};

/// Tracing target for submission.
pub const TRACING_TARGET: &str = "pipegraph::submission";

/// Body posted to the run and save endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSubmission {
    pub pipeline: Vec<ResolvedStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PipelineSubmission {
    pub fn new(pipeline: Vec<ResolvedStep>) -> Self {
        Self {
            pipeline,
            name: None,
        }
    }

    pub fn named(pipeline: Vec<ResolvedStep>, name: impl Into<String>) -> Self {
        Self {
            pipeline,
            name: Some(name.into()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Acknowledgement of an accepted submission.
///
/// Only the status is interpreted; the body is kept verbatim for callers that want it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl SubmissionReceipt {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }
}

/// One step of a pipeline as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStep {
    pub name: String,
    #[serde(default)]
    pub parameters: Parameters,
}

/// A pipeline previously saved for a project.
///
/// Reads the backend record `{progressive_id, project_id, name, task_id,
/// status, pipeline_data: {pipeline: {steps}}}`. The project id may arrive as
/// a number or as the route string, and steps are also found under
/// `pipeline.steps` or a top-level `steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SavedPipelineRecord", into = "SavedPipelineRecord")]
pub struct SavedPipeline {
    pub progressive_id: u64,
    pub project_id: ProjectId,
    pub name: String,
    pub task_id: Option<String>,
    pub status: Option<String>,
    pub steps: Vec<SavedStep>,
}

impl SavedPipeline {
    pub fn new(progressive_id: u64, project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            progressive_id,
            project_id,
            name: name.into(),
            task_id: None,
            status: None,
            steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ProjectIdField {
    Number(ProjectId),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StepList {
    #[serde(default)]
    steps: Vec<SavedStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PipelineData {
    #[serde(default)]
    pipeline: StepList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedPipelineRecord {
    progressive_id: u64,
    project_id: ProjectIdField,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pipeline_data: Option<PipelineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pipeline: Option<StepList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<SavedStep>>,
}

impl TryFrom<SavedPipelineRecord> for SavedPipeline {
    type Error = String;

    fn try_from(record: SavedPipelineRecord) -> Result<Self, Self::Error> {
        let project_id = match record.project_id {
            ProjectIdField::Number(id) => id,
            ProjectIdField::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("invalid project id '{}'", text))?,
        };
        let steps = record
            .pipeline_data
            .map(|data| data.pipeline.steps)
            .or(record.pipeline.map(|pipeline| pipeline.steps))
            .or(record.steps)
            .unwrap_or_default();

        Ok(Self {
            progressive_id: record.progressive_id,
            project_id,
            name: record.name.unwrap_or_default(),
            task_id: record.task_id,
            status: record.status,
            steps,
        })
    }
}

impl From<SavedPipeline> for SavedPipelineRecord {
    fn from(saved: SavedPipeline) -> Self {
        Self {
            progressive_id: saved.progressive_id,
            project_id: ProjectIdField::Number(saved.project_id),
            name: Some(saved.name),
            task_id: saved.task_id,
            status: saved.status,
            pipeline_data: Some(PipelineData {
                pipeline: StepList { steps: saved.steps },
            }),
            pipeline: None,
            steps: None,
        }
    }
}

/// Backend endpoints for running, saving and managing pipelines.
#[async_trait::async_trait]
pub trait PipelineClient: Send + Sync {
    /// Submits a pipeline for immediate execution.
    async fn process(
        &self,
        project_id: ProjectId,
        submission: &PipelineSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError>;

    /// Stores a named pipeline for later use.
    async fn save(
        &self,
        project_id: ProjectId,
        submission: &PipelineSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError>;

    async fn list(&self, project_id: ProjectId) -> Result<Vec<SavedPipeline>, SubmissionError>;

    async fn delete(&self, project_id: ProjectId, pipeline_id: u64) -> Result<(), SubmissionError>;
}
