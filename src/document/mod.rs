//! Graph document reader.
//!
//! Design tools hand the checker a React-Flow style JSON document. This module
//! turns that document into a [`DesignGraph`](crate::graph::DesignGraph), applying
//! every field default in one place.
//!
//! # Document Format
//!
//! ```text
//! {
//!   "nodes": [
//!     { "id": "1", "data": { "category": "SoC", "label": "Jetson Orin NX", "tdp_w": 15 } }
//!   ],
//!   "edges": [
//!     { "source": "2", "target": "1", "sourceHandle": "pwr-out", "targetHandle": "pwr-in" }
//!   ]
//! }
//! ```
//!
//! # Field Defaults
//!
//! | Field | Missing or malformed |
//! |-------|----------------------|
//! | `nodes`, `edges` | empty collection |
//! | `data.category` | empty tag |
//! | `data.label` | `"Unknown"` |
//! | `data.tdp_w` | `0.0` (numeric strings are accepted) |
//! | `source`, `target` | dangling endpoint |
//! | `sourceHandle`, `targetHandle` | absent (empty string counts as absent) |
//!
//! Only a document that cannot be read or parsed at all is an error.

mod normalize;
mod raw;

pub use normalize::{lenient_power, normalize_document, normalize_edge, normalize_node};
pub use raw::{RawDocument, RawEdge, RawNode, RawNodeData};

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{DrcError, Result};
use crate::graph::DesignGraph;

/// Parse a graph document from a JSON string.
pub fn parse(input: &str) -> Result<DesignGraph> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Parse a graph document from any reader (e.g. stdin).
pub fn parse_reader(mut reader: impl Read) -> Result<DesignGraph> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| DrcError::InputReadError { source })?;
    parse(&content)
}

/// Parse a graph document file.
pub fn parse_file(path: &Path) -> Result<DesignGraph> {
    let content = std::fs::read_to_string(path).map_err(|e| DrcError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Build a graph from an already-decoded JSON value.
pub fn from_value(value: Value) -> Result<DesignGraph> {
    if !value.is_object() {
        return Err(DrcError::invalid_document(
            "top-level value must be an object with 'nodes' and 'edges'",
        ));
    }

    let doc: RawDocument = serde_json::from_value(value)?;
    debug!(nodes = doc.nodes.len(), edges = doc.edges.len(), "graph document decoded");
    normalize_document(doc)
}
