use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a node within one pipeline graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// The id reserved for the seeded start node.
    pub const START: &'static str = "1";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id of the start node.
    pub fn start() -> Self {
        Self(Self::START.to_string())
    }

    pub fn is_start(&self) -> bool {
        self.0 == Self::START
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of the id, if it is one. Generated ids always are.
    pub(crate) fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hands out node ids from a counter that only ever moves forward.
///
/// Ids are never derived from the current node count, so removing a node and
/// adding another can not produce a duplicate.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// A fresh allocator; `1` is taken by the start node.
    pub(crate) fn new() -> Self {
        Self { next: 2 }
    }

    /// Hands out the next id for which `in_use` is false.
    ///
    /// Only an imported id near `u64::MAX` can exhaust the counter; it then
    /// restarts at 2 and skips the ids still present.
    pub(crate) fn next_id(&mut self, in_use: impl Fn(&NodeId) -> bool) -> NodeId {
        loop {
            let id = NodeId(self.next.to_string());
            self.next = self.next.checked_add(1).unwrap_or(2);
            if !in_use(&id) {
                return id;
            }
        }
    }

    /// Moves the counter past `id` if `id` is numeric and not yet covered.
    pub(crate) fn observe(&mut self, id: &NodeId) {
        if let Some(n) = id.as_number() {
            self.next = self.next.max(n.saturating_add(1));
        }
    }
}
