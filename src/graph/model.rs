use super::id::IdAllocator;
use super::{Edge, Node, NodeId, Parameters, Position, TRACING_TARGET, default_label};
use crate::catalog::Catalog;
use crate::error::{GraphError, ResolveError};
use crate::resolver::{PipelineResolver, ResolvedStep};
use serde::{Deserialize, Serialize};

/// The mutable node graph of one editing session.
///
/// The start node (`"1"`, type `select_files`) exists from construction and
/// can not be removed. Every node has at most one outgoing edge: connecting a
/// node that already has a successor replaces the old edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct PipelineGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected: Option<NodeId>,
    ids: IdAllocator,
}

/// Serialized form of a graph: just its nodes and edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Default for PipelineGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineGraph {
    /// A graph holding only the seeded start node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::start()],
            edges: Vec::new(),
            selected: None,
            ids: IdAllocator::new(),
        }
    }

    /// Rebuilds a graph from exported nodes and edges.
    ///
    /// The start node is seeded if missing, empty labels are derived from the
    /// node type, and the id counter is moved past every numeric id present.
    /// Edges are replayed through `connect` semantics, so for a source with
    /// several edges only the last one is kept; edges naming unknown nodes are
    /// dropped.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(nodes.len() + 1),
            edges: Vec::with_capacity(edges.len()),
            selected: None,
            ids: IdAllocator::new(),
        };

        for mut node in nodes {
            if node.label.is_empty() {
                node.label = default_label(&node.node_type);
            }
            graph.ids.observe(&node.id);
            match graph.position_of(node.id.as_str()) {
                Some(index) => graph.nodes[index] = node,
                None => graph.nodes.push(node),
            }
        }
        if graph.node(NodeId::START).is_none() {
            graph.nodes.insert(0, Node::start());
        }

        for edge in edges {
            if let Err(error) = graph.connect(edge.source.clone(), edge.target.clone()) {
                tracing::debug!(
                    target: TRACING_TARGET,
                    source = %edge.source,
                    target_node = %edge.target,
                    %error,
                    "Dropping edge with unknown endpoint"
                );
            }
        }
        graph
    }

    /// Adds a node of `node_type` at `position` and returns its new id.
    ///
    /// Parameters are initialized from the catalog entry. A type the catalog
    /// does not know still produces a node, just without parameters.
    pub fn add_node(
        &mut self,
        node_type: impl Into<String>,
        position: Position,
        catalog: &Catalog,
    ) -> NodeId {
        let node_type = node_type.into();
        let schema = match catalog.get(&node_type) {
            Some(definition) => definition.parameters.clone(),
            None => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    node_type = %node_type,
                    "Node type not in catalog, creating node without parameters"
                );
                Vec::new()
            }
        };

        let nodes = &self.nodes;
        let id = self.ids.next_id(|id| nodes.iter().any(|node| node.id == *id));
        self.nodes
            .push(Node::new(id.clone(), node_type, position, schema));
        id
    }

    /// Connects `source` to `target`, returning the edge it replaced, if any.
    pub fn connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<Option<Edge>, GraphError> {
        let source = source.into();
        let target = target.into();
        self.require(&source)?;
        self.require(&target)?;

        let replaced = self.disconnect(source.as_str());
        if let Some(old) = &replaced {
            tracing::debug!(
                target: TRACING_TARGET,
                source = %source,
                previous = %old.target,
                next = %target,
                "Replacing outgoing edge"
            );
        }
        self.edges.push(Edge { source, target });
        Ok(replaced)
    }

    /// Removes the outgoing edge of `source`, if it has one.
    pub fn disconnect(&mut self, source: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.source.as_str() == source)?;
        Some(self.edges.remove(index))
    }

    /// Replaces the parameter mapping of a node.
    ///
    /// Values for parameters declared in the node's schema must have the
    /// declared shape (list or scalar). Undeclared keys are stored as given.
    pub fn update_parameters(
        &mut self,
        id: &str,
        parameters: Parameters,
    ) -> Result<(), GraphError> {
        let index = self
            .position_of(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;
        let node = &mut self.nodes[index];

        for (name, value) in &parameters {
            if let Some(field) = node.schema_for(name) {
                if field.kind.is_list() != value.is_list() {
                    return Err(GraphError::ParameterKindMismatch {
                        node_id: node.id.clone(),
                        parameter: name.clone(),
                        expected: if field.kind.is_list() { "list" } else { "scalar" },
                    });
                }
            }
        }

        node.parameters = parameters;
        Ok(())
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        if id == NodeId::START {
            return Err(GraphError::StartNodeRemoval);
        }
        let index = self
            .position_of(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;

        self.edges
            .retain(|e| e.source.as_str() != id && e.target.as_str() != id);
        if self.selected.as_ref().is_some_and(|s| s.as_str() == id) {
            self.selected = None;
        }
        Ok(self.nodes.remove(index))
    }

    /// Marks a node as the target of the parameter editor.
    pub fn select_node(&mut self, id: &str) -> Result<&Node, GraphError> {
        let index = self
            .position_of(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;
        self.selected = Some(self.nodes[index].id.clone());
        Ok(&self.nodes[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected
            .as_ref()
            .and_then(|id| self.node(id.as_str()))
    }

    /// Linearizes the graph with the default resolver.
    pub fn resolve(&self) -> Result<Vec<ResolvedStep>, ResolveError> {
        PipelineResolver::new().resolve(&self.nodes, &self.edges)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// The node `id` feeds into, if connected.
    pub fn successor(&self, id: &str) -> Option<&NodeId> {
        self.edges
            .iter()
            .find(|e| e.source.as_str() == id)
            .map(|e| &e.target)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the start node can not be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_str() == id)
    }

    fn require(&self, id: &NodeId) -> Result<(), GraphError> {
        match self.position_of(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(GraphError::NodeNotFound(id.clone())),
        }
    }
}

impl From<GraphSnapshot> for PipelineGraph {
    fn from(snapshot: GraphSnapshot) -> Self {
        Self::from_parts(snapshot.nodes, snapshot.edges)
    }
}

impl From<PipelineGraph> for GraphSnapshot {
    fn from(graph: PipelineGraph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}
