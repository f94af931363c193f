//! Design graph representation.
//!
//! This module provides the internal representation of a hardware design after
//! the source document has been normalized. The [`DesignGraph`] holds every
//! node and edge in document order, and [`GraphIndex`] resolves edge endpoints
//! back to nodes.

mod design;
mod index;
mod types;

pub use design::{DesignGraph, Edge, Node, UNKNOWN_LABEL};
pub use index::GraphIndex;
pub use types::*;
