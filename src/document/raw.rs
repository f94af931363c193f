//! Raw document types, deserialized as-is from the graph JSON.
//!
//! Field values that the checker treats leniently are kept as
//! [`serde_json::Value`] so a malformed attribute never fails deserialization.

use serde::Deserialize;
use serde_json::Value;

/// Top-level graph document: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    /// Node records
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// Edge records
    #[serde(default)]
    pub edges: Vec<RawEdge>,
}

/// A node record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Node identifier (string, or a number rendered as text)
    pub id: Value,
    /// Component attributes
    #[serde(default)]
    pub data: Option<RawNodeData>,
}

/// Component attributes carried by a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNodeData {
    /// Category tag (e.g. `"PMIC"`, `"SoC"`)
    #[serde(default)]
    pub category: Option<Value>,
    /// Display label
    #[serde(default)]
    pub label: Option<Value>,
    /// Thermal design power in watts
    #[serde(default)]
    pub tdp_w: Option<Value>,
}

/// An edge record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEdge {
    /// Source node identifier
    #[serde(default)]
    pub source: Option<Value>,
    /// Target node identifier
    #[serde(default)]
    pub target: Option<Value>,
    /// Port on the source node
    #[serde(default)]
    pub source_handle: Option<Value>,
    /// Port on the target node
    #[serde(default)]
    pub target_handle: Option<Value>,
}
