use crate::graph::{Node, NodeId, Parameters};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::sanitize::strip_numeric_keys;

/// One entry of a linearized pipeline, ready to hand to an executor.
///
/// Serializes in the shape the processing backends read:
/// `{"id", "type", "index", "data": {"label", "parameters"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireStep", into = "WireStep")]
pub struct ResolvedStep {
    /// 1-based position in the pipeline.
    pub index: usize,
    pub id: NodeId,
    pub step_type: String,
    pub label: String,
    pub parameters: Parameters,
}

impl ResolvedStep {
    pub(crate) fn from_node(index: usize, node: &Node) -> Self {
        Self {
            index,
            id: node.id.clone(),
            step_type: node.node_type.clone(),
            label: node.label.clone(),
            parameters: strip_numeric_keys(&node.parameters),
        }
    }
}

impl fmt::Display for ResolvedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} [{}]", self.index, self.label, self.step_type)?;
        if !self.parameters.is_empty() {
            let params = self
                .parameters
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .join(", ");
            write!(f, " ({})", params)?;
        }
        Ok(())
    }
}

/// Renders the step types of a pipeline as `a -> b -> c`.
pub fn format_chain(steps: &[ResolvedStep]) -> String {
    steps.iter().map(|s| s.step_type.as_str()).join(" -> ")
}

#[derive(Serialize, Deserialize)]
struct WireStep {
    id: NodeId,
    #[serde(rename = "type")]
    step_type: String,
    index: usize,
    data: WireStepData,
}

#[derive(Serialize, Deserialize)]
struct WireStepData {
    label: String,
    #[serde(default)]
    parameters: Parameters,
}

impl From<WireStep> for ResolvedStep {
    fn from(wire: WireStep) -> Self {
        Self {
            index: wire.index,
            id: wire.id,
            step_type: wire.step_type,
            label: wire.data.label,
            parameters: wire.data.parameters,
        }
    }
}

impl From<ResolvedStep> for WireStep {
    fn from(step: ResolvedStep) -> Self {
        Self {
            id: step.id,
            step_type: step.step_type,
            index: step.index,
            data: WireStepData {
                label: step.label,
                parameters: step.parameters,
            },
        }
    }
}
