//! Normalization of raw document records into the design graph.
//!
//! All defaulting policy lives here. Once a [`DesignGraph`] exists, no rule
//! needs to care about missing labels, bad power values or absent handles.

use serde_json::Value;
use tracing::trace;

use super::raw::{RawDocument, RawEdge, RawNode};
use crate::error::{DrcError, Result};
use crate::graph::{Category, DesignGraph, Edge, Handle, Node, NodeId, UNKNOWN_LABEL};

/// Normalize a whole document.
///
/// Fails only when a node has no usable identifier; every other malformed
/// field falls back to its default.
pub fn normalize_document(doc: RawDocument) -> Result<DesignGraph> {
    let nodes = doc
        .nodes
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| normalize_node(idx, raw))
        .collect::<Result<Vec<_>>>()?;

    let edges = doc.edges.into_iter().map(normalize_edge).collect();

    Ok(DesignGraph::new(nodes, edges))
}

/// Normalize one node record.
pub fn normalize_node(idx: usize, raw: RawNode) -> Result<Node> {
    let id = match &raw.id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(DrcError::invalid_document(format!(
                "node at index {idx} has an unusable id: {other}"
            )))
        }
    };

    let data = raw.data.unwrap_or_default();

    let category = match &data.category {
        Some(Value::String(tag)) => Category::from_tag(tag),
        _ => Category::default(),
    };

    let label = match data.label {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => UNKNOWN_LABEL.to_string(),
        Some(other) => other.to_string(),
    };

    let power_w = lenient_power(data.tdp_w.as_ref());
    if power_w == 0.0 && data.tdp_w.as_ref().is_some_and(|v| !v.is_null()) {
        trace!(node = %id, raw = ?data.tdp_w, "power draw defaulted to 0 W");
    }

    Ok(Node {
        id: NodeId(id),
        category,
        label,
        power_w,
    })
}

/// Normalize one edge record. Edges never fail to normalize.
pub fn normalize_edge(raw: RawEdge) -> Edge {
    Edge {
        source: NodeId(endpoint_id(raw.source)),
        target: NodeId(endpoint_id(raw.target)),
        source_handle: Handle::from_raw(string_value(raw.source_handle)),
        target_handle: Handle::from_raw(string_value(raw.target_handle)),
    }
}

/// Interpret a power attribute in watts.
///
/// Accepts JSON numbers and numeric strings, negative values included.
/// Anything else, including values outside the `f64` range, counts as 0.0.
pub fn lenient_power(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(watts) if watts.is_finite() => watts,
        _ => 0.0,
    }
}

fn endpoint_id(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        // Anything else can never match a node and resolves as dangling
        _ => String::new(),
    }
}

fn string_value(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}
