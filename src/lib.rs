//! # AHA DRC
//!
//! Power budget and design-rule checking for hardware interconnect designs.
//!
//! This library provides:
//! - A reader for React-Flow style graph documents (nodes + edges)
//! - Power aggregation across components
//! - Connectivity rules on edge ports (power wired into data, and back)
//! - Structural rules on the whole system (e.g. an SoC with no PMIC)
//! - A classified report with status, ordered issues and aggregate data
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`document`] - Graph document parsing and field normalization
//! - [`graph`] - Normalized design graph and node index
//! - [`drc`] - Rule engine, power aggregation and issues
//! - [`report`] - Report assembly and serialization
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! aha-drc design.json
//! cat design.json | aha-drc - --pretty --breakdown
//! ```
//!
//! ### Library
//!
//! ```
//! use aha_drc::{DrcEngine, Status};
//!
//! let report = DrcEngine::default().check_document(r#"{"nodes":[{"id":"1","data":{"category":"SoC"}}]}"#);
//! assert_eq!(report.status(), Status::Warning);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { validate_graph_json } from 'aha_drc';
//!
//! const report = JSON.parse(validate_graph_json(JSON.stringify({ nodes, edges })));
//! ```
//!
//! ## Report Classification
//!
//! Every run yields a report, never a bare error:
//!
//! 1. `error` if any issue is fatal
//! 2. `warning` if any issue exists
//! 3. `success` otherwise
//!
//! If the document cannot be read or parsed at all, the report is a single
//! `Simulation Engine Crash` issue with empty report data.

pub mod document;
pub mod drc;
pub mod error;
pub mod graph;
pub mod report;

// Re-export main types for convenience
pub use drc::{DrcConfig, DrcEngine, Issue, Severity};
pub use error::{DrcError, Result};
pub use graph::DesignGraph;
pub use report::{SimulationReport, Status};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::validate_graph_json;
