//! Turns a pipeline graph into an ordered list of executable steps.
//!
//! Resolution starts at the start node and repeatedly follows the single
//! outgoing edge of the current node. Each visited node becomes one
//! [`ResolvedStep`] with its parameters sanitized. The walk ends at a node
//! without a successor, or whose successor does not exist. Reaching a node
//! twice is a cycle and, by default, an error.

use crate::error::ResolveError;
use crate::graph::{Edge, Node, NodeId};
use ahash::{AHashMap, AHashSet};

pub mod sanitize;
mod step;

pub use step::*;

/// Tracing target for resolution.
pub const TRACING_TARGET: &str = "pipegraph::resolver";

/// What the resolver does when the successor chain loops back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Return `ResolveError::CycleDetected`.
    #[default]
    Fail,
    /// Stop before the revisited node and return the steps resolved so far.
    Truncate,
}

/// Linearizes node graphs. Cheap to build; holds only options.
#[derive(Debug, Clone)]
pub struct PipelineResolver {
    start: NodeId,
    cycle_policy: CyclePolicy,
}

impl Default for PipelineResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineResolver {
    pub fn new() -> Self {
        Self {
            start: NodeId::start(),
            cycle_policy: CyclePolicy::default(),
        }
    }

    /// Starts traversal at `start` instead of the start node.
    pub fn with_start(mut self, start: impl Into<NodeId>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Resolves `nodes` and `edges` into pipeline steps.
    ///
    /// Nodes sharing an id and edges sharing a source are both resolved in
    /// favour of the one that appears last. A missing start node yields an
    /// empty pipeline.
    pub fn resolve(
        &self,
        nodes: &[Node],
        edges: &[Edge],
    ) -> Result<Vec<ResolvedStep>, ResolveError> {
        let node_map: AHashMap<&str, &Node> =
            nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        let successors: AHashMap<&str, &NodeId> = edges
            .iter()
            .map(|e| (e.source.as_str(), &e.target))
            .collect();

        let mut steps = Vec::new();
        let mut visited = AHashSet::new();
        let mut current = node_map.get(self.start.as_str()).copied();
        if current.is_none() {
            tracing::debug!(
                target: TRACING_TARGET,
                start = %self.start,
                "Start node not present, resolving to an empty pipeline"
            );
        }

        while let Some(node) = current {
            if !visited.insert(node.id.as_str()) {
                match self.cycle_policy {
                    CyclePolicy::Fail => {
                        return Err(ResolveError::CycleDetected {
                            node_id: node.id.clone(),
                            steps_resolved: steps.len(),
                        });
                    }
                    CyclePolicy::Truncate => {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            node_id = %node.id,
                            steps = steps.len(),
                            "Cycle in pipeline graph, truncating before revisited node"
                        );
                        break;
                    }
                }
            }

            steps.push(ResolvedStep::from_node(steps.len() + 1, node));

            current = successors.get(node.id.as_str()).and_then(|next| {
                let found = node_map.get(next.as_str()).copied();
                if found.is_none() {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        source = %node.id,
                        successor = %next,
                        "Successor not found, ending pipeline"
                    );
                }
                found
            });
        }

        tracing::debug!(
            target: TRACING_TARGET,
            steps = steps.len(),
            chain = %format_chain(&steps),
            "Pipeline resolved"
        );
        Ok(steps)
    }
}

/// Resolves with the default options: start at `"1"`, fail on cycles.
pub fn resolve(nodes: &[Node], edges: &[Edge]) -> Result<Vec<ResolvedStep>, ResolveError> {
    PipelineResolver::new().resolve(nodes, edges)
}
