//! WASM bindings for AHA DRC.
//!
//! This module exposes the checker to browser-based design tools, which hold
//! the graph as React-Flow nodes and edges.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { validate_graph_json, validate_graph_json_with } from 'aha_drc';
//!
//! await init();
//!
//! const report = JSON.parse(validate_graph_json(JSON.stringify({ nodes, edges })));
//! if (report.status === 'error') {
//!   report.issues.forEach((issue) => console.warn(issue));
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::drc::{DrcConfig, DrcEngine};
use crate::report::SimulationReport;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Check a graph document with the default configuration.
///
/// # Arguments
/// * `graph_json` - The graph as a JSON string (`{ "nodes": [...], "edges": [...] }`)
///
/// # Returns
/// The report as a JSON string. Unparsable input yields the crash report,
/// never a thrown exception.
#[wasm_bindgen]
pub fn validate_graph_json(graph_json: &str) -> String {
    render(&DrcEngine::default().check_document(graph_json))
}

/// Check a graph document with custom handle markers and an optional power breakdown.
///
/// # Arguments
/// * `graph_json` - The graph as a JSON string
/// * `power_marker` - Substring marking a power handle (default: "pwr")
/// * `data_marker` - Substring marking a data handle (default: "data")
/// * `power_breakdown` - Attach per-category and top-consumer power data
#[wasm_bindgen]
pub fn validate_graph_json_with(
    graph_json: &str,
    power_marker: &str,
    data_marker: &str,
    power_breakdown: bool,
) -> String {
    let config = DrcConfig::new()
        .with_power_marker(power_marker)
        .with_data_marker(data_marker)
        .with_power_breakdown(power_breakdown);
    render(&DrcEngine::new(config).check_document(graph_json))
}

fn render(report: &SimulationReport) -> String {
    match report.to_json(false) {
        Ok(json) => json,
        Err(err) => {
            let crash = SimulationReport::crash(&err);
            crash
                .to_json(false)
                .unwrap_or_else(|_| r#"{"status":"error","issues":[],"report_data":{}}"#.to_string())
        }
    }
}
