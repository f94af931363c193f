//! Node lookup by identifier.

use std::collections::HashMap;

use super::design::{Node, UNKNOWN_LABEL};

/// Lookup from node identifier to node record.
///
/// Built once per run. Repeated identifiers overwrite earlier entries, so the
/// last node with a given ID wins.
#[derive(Debug, Default)]
pub struct GraphIndex<'a> {
    nodes: HashMap<&'a str, &'a Node>,
}

impl<'a> GraphIndex<'a> {
    /// Index a node sequence.
    pub fn build(nodes: &'a [Node]) -> Self {
        let mut map = HashMap::with_capacity(nodes.len());
        for node in nodes {
            map.insert(node.id.as_str(), node);
        }
        Self { nodes: map }
    }

    /// Look up a node by ID.
    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    /// Resolve a display label, falling back to `"Unknown"` for dangling IDs.
    pub fn label(&self, id: &str) -> &'a str {
        self.get(id).map_or(UNKNOWN_LABEL, |node| node.label.as_str())
    }

    /// Number of distinct IDs.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
