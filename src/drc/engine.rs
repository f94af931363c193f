//! Main DRC engine interface.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::connectivity::{check_edges, DataIntoPower, EdgeRule, HandleMarkers, PowerIntoData};
use super::power::{aggregate, PowerBreakdown};
use super::structural::{check_facts, MissingPmic, StructuralRule};
use super::{
    DEFAULT_DATA_MARKER, DEFAULT_HIGH_POWER_THRESHOLD_W, DEFAULT_POWER_MARKER,
    DEFAULT_TOP_CONSUMER_COUNT,
};
use crate::document;
use crate::error::Result;
use crate::graph::{DesignGraph, GraphIndex};
use crate::report::SimulationReport;

/// Configuration for the DRC engine.
#[derive(Debug, Clone)]
pub struct DrcConfig {
    /// Substring marking a handle as a power port.
    pub power_marker: String,
    /// Substring marking a handle as a data port.
    pub data_marker: String,
    /// Attach a [`PowerBreakdown`] to every report.
    pub power_breakdown: bool,
    /// Nodes drawing at least this many watts count as high-power.
    pub high_power_threshold_w: f64,
    /// How many top consumers the breakdown lists.
    pub top_consumer_count: usize,
}

impl Default for DrcConfig {
    fn default() -> Self {
        Self {
            power_marker: DEFAULT_POWER_MARKER.to_string(),
            data_marker: DEFAULT_DATA_MARKER.to_string(),
            power_breakdown: false,
            high_power_threshold_w: DEFAULT_HIGH_POWER_THRESHOLD_W,
            top_consumer_count: DEFAULT_TOP_CONSUMER_COUNT,
        }
    }
}

impl DrcConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the power handle marker.
    pub fn with_power_marker(mut self, marker: impl Into<String>) -> Self {
        self.power_marker = marker.into();
        self
    }

    /// Set the data handle marker.
    pub fn with_data_marker(mut self, marker: impl Into<String>) -> Self {
        self.data_marker = marker.into();
        self
    }

    /// Enable or disable the power breakdown section.
    pub fn with_power_breakdown(mut self, enabled: bool) -> Self {
        self.power_breakdown = enabled;
        self
    }

    /// Set the high-power threshold (in watts).
    pub fn with_high_power_threshold(mut self, watts: f64) -> Self {
        self.high_power_threshold_w = watts;
        self
    }

    /// Set how many top consumers the breakdown lists.
    pub fn with_top_consumer_count(mut self, count: usize) -> Self {
        self.top_consumer_count = count;
        self
    }
}

/// The design-rule checker.
///
/// Holds an ordered list of edge rules and an ordered list of structural
/// rules. The built-in rules always run first; extra rules run after them in
/// the order they were added.
pub struct DrcEngine {
    config: DrcConfig,
    edge_rules: Vec<Box<dyn EdgeRule>>,
    structural_rules: Vec<Box<dyn StructuralRule>>,
}

impl DrcEngine {
    /// Create an engine with the built-in rule set.
    pub fn new(config: DrcConfig) -> Self {
        let markers = HandleMarkers::new(&config.power_marker, &config.data_marker);
        let edge_rules: Vec<Box<dyn EdgeRule>> = vec![
            Box::new(PowerIntoData::new(markers.clone())),
            Box::new(DataIntoPower::new(markers)),
        ];
        let structural_rules: Vec<Box<dyn StructuralRule>> = vec![Box::new(MissingPmic)];

        Self {
            config,
            edge_rules,
            structural_rules,
        }
    }

    /// Append an edge rule.
    pub fn with_edge_rule(mut self, rule: impl EdgeRule + 'static) -> Self {
        self.edge_rules.push(Box::new(rule));
        self
    }

    /// Append a structural rule.
    pub fn with_structural_rule(mut self, rule: impl StructuralRule + 'static) -> Self {
        self.structural_rules.push(Box::new(rule));
        self
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &DrcConfig {
        &self.config
    }

    /// Names of all edge rules, in evaluation order.
    pub fn edge_rule_names(&self) -> Vec<&'static str> {
        self.edge_rules.iter().map(|r| r.name()).collect()
    }

    /// Names of all structural rules, in evaluation order.
    pub fn structural_rule_names(&self) -> Vec<&'static str> {
        self.structural_rules.iter().map(|r| r.name()).collect()
    }

    /// Check a normalized design graph.
    pub fn check(&self, graph: &DesignGraph) -> SimulationReport {
        let index = GraphIndex::build(&graph.nodes);
        let facts = aggregate(&graph.nodes);
        debug!(
            nodes = facts.node_count,
            distinct_ids = index.len(),
            total_power_w = facts.total_power_w,
            pmic = facts.pmic_count,
            soc = facts.soc_count,
            "power aggregated"
        );

        let connectivity = check_edges(&graph.edges, &index, &self.edge_rules);
        let structural = check_facts(&facts, &self.structural_rules);

        let mut report = SimulationReport::build(connectivity, structural, &facts);
        if self.config.power_breakdown {
            report = report.with_power_breakdown(PowerBreakdown::compute(
                &graph.nodes,
                self.config.high_power_threshold_w,
                self.config.top_consumer_count,
            ));
        }

        info!(
            status = ?report.status(),
            issues = report.issues().len(),
            "design rule check complete"
        );
        report
    }

    /// Check the outcome of loading a graph, turning a load failure into the crash report.
    pub fn check_loaded(&self, loaded: Result<DesignGraph>) -> SimulationReport {
        match loaded {
            Ok(graph) => self.check(&graph),
            Err(err) => {
                warn!(error = %err, "graph could not be loaded");
                SimulationReport::crash(&err)
            }
        }
    }

    /// Check a graph document given as a JSON string.
    pub fn check_document(&self, input: &str) -> SimulationReport {
        self.check_loaded(document::parse(input))
    }

    /// Check a graph document read from a stream.
    pub fn check_reader(&self, reader: impl Read) -> SimulationReport {
        self.check_loaded(document::parse_reader(reader))
    }

    /// Check a graph document file.
    pub fn check_file(&self, path: &Path) -> SimulationReport {
        self.check_loaded(document::parse_file(path))
    }
}

impl Default for DrcEngine {
    fn default() -> Self {
        Self::new(DrcConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drc::{AggregateFacts, Issue, Severity};
    use crate::graph::{Category, Edge, Node};
    use crate::report::Status;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_pmic_and_soc_success() {
        let graph = DesignGraph::new(
            vec![
                Node::new("1", Category::Pmic, "PMIC", 5.0),
                Node::new("2", Category::Soc, "SoC", 10.0),
            ],
            Vec::new(),
        );
        let report = DrcEngine::default().check(&graph);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "status": "success",
                "issues": [],
                "report_data": {
                    "nodes_analyzed": 2,
                    "total_power_w": 15.0,
                    "drc_checks_passed": true
                }
            })
        );
    }

    #[test]
    fn test_soc_only_warns() {
        let graph = DesignGraph::new(vec![Node::new("1", Category::Soc, "SoC", 10.0)], Vec::new());
        let report = DrcEngine::default().check(&graph);
        assert_eq!(report.status(), Status::Warning);
        let messages: Vec<&str> = report.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["DRC Warning: System contains an SoC but lacks a dedicated PMIC for power delivery."]
        );
        assert!(!report.report_data().unwrap().drc_checks_passed());
    }

    #[test]
    fn test_power_into_data_is_error() {
        let report = DrcEngine::default().check_document(
            r#"{
                "nodes": [
                    {"id": "A", "data": {"label": "Battery"}},
                    {"id": "B", "data": {"label": "Sensor"}}
                ],
                "edges": [
                    {"source": "A", "target": "B", "sourceHandle": "pwr_out", "targetHandle": "data_in"}
                ]
            }"#,
        );
        assert_eq!(report.status(), Status::Error);
        assert_eq!(report.issues().len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.severity, Severity::Fatal);
        assert!(issue.message.contains("'Battery'"));
        assert!(issue.message.contains("'Sensor'"));
    }

    #[test]
    fn test_missing_handle_never_reports() {
        let engine = DrcEngine::default();
        for (src, tgt) in [
            (Some("pwr_out"), None),
            (None, Some("data_in")),
            (Some("data_out"), None),
            (None, Some("pwr_in")),
        ] {
            let graph = DesignGraph::new(
                vec![
                    Node::new("a", Category::Pmic, "A", 1.0),
                    Node::new("b", Category::Pmic, "B", 1.0),
                ],
                vec![Edge::new("a", "b", src, tgt)],
            );
            let report = engine.check(&graph);
            assert!(report.issues().is_empty(), "{src:?} -> {tgt:?}");
            assert_eq!(report.status(), Status::Success);
        }
    }

    #[test]
    fn test_non_numeric_power_is_ignored() {
        let report = DrcEngine::default().check_document(
            r#"{"nodes": [
                {"id": "1", "data": {"category": "PMIC", "tdp_w": 4.5}},
                {"id": "2", "data": {"category": "Sensor", "tdp_w": "lots"}}
            ]}"#,
        );
        assert_eq!(report.status(), Status::Success);
        assert!(report.issues().is_empty());
        let data = report.report_data().unwrap();
        assert_eq!(data.nodes_analyzed(), 2);
        assert_relative_eq!(data.total_power_w(), 4.5);
    }

    #[test]
    fn test_out_of_range_power_does_not_crash() {
        let report = DrcEngine::default().check_document(
            r#"{"nodes":[{"id":"a","data":{"category":"SoC","tdp_w":5.0}},{"id":"b","data":{"tdp_w":1e400}}]}"#,
        );
        assert!(!report.is_crash());
        assert_ne!(report.status(), Status::Error);
        let data = report.report_data().unwrap();
        assert_eq!(data.nodes_analyzed(), 2);
        assert_relative_eq!(data.total_power_w(), 5.0);
    }

    #[test]
    fn test_negative_power_is_summed() {
        let report = DrcEngine::default().check_document(
            r#"{"nodes":[{"id":"a","data":{"tdp_w":5.0}},{"id":"b","data":{"tdp_w":-3.0}}]}"#,
        );
        assert_relative_eq!(report.report_data().unwrap().total_power_w(), 2.0);
    }

    #[test]
    fn test_overflowing_total_stays_a_number() {
        let report = DrcEngine::new(DrcConfig::new().with_power_breakdown(true)).check_document(
            r#"{"nodes":[{"id":"a","data":{"tdp_w":1e308}},{"id":"b","data":{"tdp_w":1e308}}]}"#,
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["report_data"]["total_power_w"].as_f64(), Some(f64::MAX));
        assert!(value["power_breakdown"]["average_power_w"].is_number());
        assert!(value["power_breakdown"]["distribution"][0]["power_w"].is_number());
    }

    #[test]
    fn test_unparsable_input_crashes() {
        let report = DrcEngine::default().check_document("{ not json");
        assert_eq!(report.status(), Status::Error);
        assert!(report.is_crash());
        assert_eq!(report.issues().len(), 1);
        assert!(report.issues()[0]
            .message
            .starts_with("Simulation Engine Crash: "));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["report_data"], json!({}));
        assert_eq!(value["status"], json!("error"));
    }

    #[test]
    fn test_unreadable_file_crashes() {
        let report = DrcEngine::default().check_file(Path::new("/no/such/dir/graph.json"));
        assert!(report.is_crash());
        assert!(report.issues()[0].message.contains("graph.json"));
    }

    #[test]
    fn test_connectivity_before_structural() {
        let graph = DesignGraph::new(
            vec![
                Node::new("soc", Category::Soc, "Jetson", 15.0),
                Node::new("cam", Category::from_tag("Sensor"), "Camera", 1.0),
            ],
            vec![Edge::new("cam", "soc", Some("data-out"), Some("pwr-in"))],
        );
        let report = DrcEngine::default().check(&graph);
        let rules: Vec<&str> = report.issues().iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec!["data-into-power", "missing-pmic"]);
        assert_eq!(report.status(), Status::Error);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let input = r#"{
            "nodes": [
                {"id": "1", "data": {"category": "SoC", "label": "Jetson Orin NX", "tdp_w": 15}},
                {"id": "2", "data": {"category": "Sensor", "label": "IMX219 Camera", "tdp_w": 1.2}},
                {"id": "3", "data": {"category": "Sensor", "label": "IMX219 Camera", "tdp_w": 1.2}}
            ],
            "edges": [
                {"source": "1", "target": "2", "sourceHandle": "pwr-out", "targetHandle": "data-in"},
                {"source": "3", "target": "1", "sourceHandle": "data-out", "targetHandle": "pwr-in"},
                {"source": "9", "target": "1", "sourceHandle": "pwr_data", "targetHandle": "pwr_data"}
            ]
        }"#;
        let engine = DrcEngine::new(DrcConfig::new().with_power_breakdown(true));
        let first = engine.check_document(input).to_json(false).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.check_document(input).to_json(false).unwrap(), first);
        }
    }

    #[test]
    fn test_status_and_passed_flag_consistency() {
        let graphs = vec![
            DesignGraph::default(),
            DesignGraph::new(vec![Node::new("s", Category::Soc, "S", 1.0)], Vec::new()),
            DesignGraph::new(
                vec![
                    Node::new("p", Category::Pmic, "P", 1.0),
                    Node::new("s", Category::Soc, "S", 1.0),
                ],
                vec![Edge::new("p", "s", Some("pwr"), Some("data"))],
            ),
            DesignGraph::new(
                vec![Node::new("s", Category::Soc, "S", 1.0)],
                vec![Edge::new("s", "x", Some("data"), Some("pwr"))],
            ),
        ];

        for graph in &graphs {
            let report = DrcEngine::default().check(graph);
            let data = report.report_data().unwrap();
            assert_eq!(data.drc_checks_passed(), report.issues().is_empty());

            let any_fatal = report.issues().iter().any(Issue::is_fatal);
            let expected = if any_fatal {
                Status::Error
            } else if report.issues().is_empty() {
                Status::Success
            } else {
                Status::Warning
            };
            assert_eq!(report.status(), expected);
        }
    }

    struct PowerBudget(f64);

    impl StructuralRule for PowerBudget {
        fn name(&self) -> &'static str {
            "power-budget"
        }

        fn check(&self, facts: &AggregateFacts) -> Option<Issue> {
            (facts.total_power_w > self.0).then(|| {
                Issue::warning(self.name(), format!("DRC Warning: {:.1} W exceeds budget", facts.total_power_w))
            })
        }
    }

    #[test]
    fn test_extra_rules_run_after_builtins() {
        let engine = DrcEngine::default().with_structural_rule(PowerBudget(5.0));
        assert_eq!(engine.structural_rule_names(), vec!["missing-pmic", "power-budget"]);
        assert_eq!(engine.edge_rule_names(), vec!["power-into-data", "data-into-power"]);

        let graph = DesignGraph::new(vec![Node::new("s", Category::Soc, "S", 10.0)], Vec::new());
        let report = engine.check(&graph);
        let rules: Vec<&str> = report.issues().iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec!["missing-pmic", "power-budget"]);
        assert_eq!(report.status(), Status::Warning);
    }

    #[test]
    fn test_breakdown_is_opt_in() {
        let graph = DesignGraph::new(vec![Node::new("s", Category::Soc, "S", 12.0)], Vec::new());

        let plain = serde_json::to_value(DrcEngine::default().check(&graph)).unwrap();
        assert!(plain.get("power_breakdown").is_none());

        let engine = DrcEngine::new(
            DrcConfig::new()
                .with_power_breakdown(true)
                .with_high_power_threshold(20.0)
                .with_top_consumer_count(1),
        );
        let report = engine.check(&graph);
        let breakdown = report.power_breakdown().unwrap();
        assert_eq!(breakdown.high_power_nodes, 0);
        assert_eq!(breakdown.top_consumers.len(), 1);
    }

    #[test]
    fn test_custom_markers_from_config() {
        let engine = DrcEngine::new(DrcConfig::new().with_power_marker("vcc").with_data_marker("sig"));
        let graph = DesignGraph::new(
            vec![
                Node::new("p", Category::Pmic, "P", 1.0),
                Node::new("q", Category::Pmic, "Q", 1.0),
            ],
            vec![
                Edge::new("p", "q", Some("pwr-out"), Some("data-in")),
                Edge::new("p", "q", Some("vcc-out"), Some("sig-in")),
            ],
        );
        let report = engine.check(&graph);
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.issues()[0].rule, "power-into-data");
    }
}
