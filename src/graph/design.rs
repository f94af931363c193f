//! Design graph structure.
//!
//! Nodes and edges here are fully defaulted: every optional or malformed field
//! of the source document has already been resolved by [`crate::document`].

use super::types::{Category, Handle, NodeId};

/// Label used when a node has none, or an edge endpoint cannot be resolved.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A hardware component in the design.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier used by edges to reference this node
    pub id: NodeId,
    /// Component category
    pub category: Category,
    /// Human-readable name
    pub label: String,
    /// Declared power draw in watts (always finite)
    pub power_w: f64,
}

impl Node {
    /// Create a node.
    pub fn new(id: impl Into<String>, category: Category, label: impl Into<String>, power_w: f64) -> Self {
        Self {
            id: NodeId::new(id),
            category,
            label: label.into(),
            power_w,
        }
    }
}

/// A directed connection between two node ports.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Source node (may be dangling)
    pub source: NodeId,
    /// Target node (may be dangling)
    pub target: NodeId,
    /// Port on the source node
    pub source_handle: Option<Handle>,
    /// Port on the target node
    pub target_handle: Option<Handle>,
}

impl Edge {
    /// Create an edge.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_handle: Option<&str>,
        target_handle: Option<&str>,
    ) -> Self {
        Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
            source_handle: Handle::from_raw(source_handle.map(str::to_string)),
            target_handle: Handle::from_raw(target_handle.map(str::to_string)),
        }
    }

    /// Both handles, if and only if both are present.
    pub fn handles(&self) -> Option<(&Handle, &Handle)> {
        match (&self.source_handle, &self.target_handle) {
            (Some(src), Some(tgt)) => Some((src, tgt)),
            _ => None,
        }
    }
}

/// A complete design ready for rule checking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignGraph {
    /// All nodes in document order (duplicates kept)
    pub nodes: Vec<Node>,
    /// All edges in document order
    pub edges: Vec<Edge>,
}

impl DesignGraph {
    /// Create a graph from node and edge collections.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Number of nodes, counting duplicate IDs separately.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
