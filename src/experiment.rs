//! Experiment listings that feed the start node's file selection.

use crate::error::SubmissionError;
use serde::{Deserialize, Serialize};

/// Project identifier as used by the backend routes.
pub type ProjectId = u64;

/// A selectable input (for example one uploaded metabolomics run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub progressive_id: u64,
    #[serde(alias = "metabolomics_experiment_name")]
    pub name: String,
}

impl ExperimentRecord {
    pub fn new(progressive_id: u64, name: impl Into<String>) -> Self {
        Self {
            progressive_id,
            name: name.into(),
        }
    }

    /// The value stored in the start node's `files` list when this record is picked.
    pub fn file_value(&self) -> serde_json::Value {
        serde_json::Value::from(self.progressive_id)
    }
}

/// Lists the experiments of a project.
#[async_trait::async_trait]
pub trait ExperimentSource: Send + Sync {
    async fn list_experiments(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ExperimentRecord>, SubmissionError>;
}
