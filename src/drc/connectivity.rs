//! Connectivity rules: checks on individual edges.
//!
//! Each rule looks at one edge at a time, using the [`GraphIndex`] only to
//! turn endpoint IDs into labels for the message. An edge is checked only when
//! both of its handles are present; otherwise it is skipped entirely.
//!
//! Handle roles are inferred by substring markers, so a handle such as
//! `"pwr_data_mux"` carries both roles and may trigger more than one rule on
//! the same edge. Rules are not mutually exclusive.

use tracing::debug;

use super::issue::Issue;
use crate::graph::{Edge, GraphIndex};

/// Default marker identifying a power port.
pub const DEFAULT_POWER_MARKER: &str = "pwr";

/// Default marker identifying a data port.
pub const DEFAULT_DATA_MARKER: &str = "data";

/// A check over a single edge.
pub trait EdgeRule: Send + Sync {
    /// Stable rule name, attached to every issue it emits.
    fn name(&self) -> &'static str;

    /// Check one edge. Only called for edges with both handles present.
    fn check(&self, edge: &Edge, index: &GraphIndex<'_>) -> Option<Issue>;
}

/// Substring markers used to infer the role of a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleMarkers {
    /// Marks a power port
    pub power: String,
    /// Marks a data port
    pub data: String,
}

impl HandleMarkers {
    pub fn new(power: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            power: power.into(),
            data: data.into(),
        }
    }
}

impl Default for HandleMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_POWER_MARKER, DEFAULT_DATA_MARKER)
    }
}

/// Endpoint labels of an edge whose source handle carries `out` and whose
/// target handle carries `into`.
fn crossed<'a>(edge: &Edge, index: &GraphIndex<'a>, out: &str, into: &str) -> Option<(&'a str, &'a str)> {
    let (src, tgt) = edge.handles()?;
    (src.carries(out) && tgt.carries(into))
        .then(|| (index.label(edge.source.as_str()), index.label(edge.target.as_str())))
}

/// Power output wired into a data input.
#[derive(Debug, Clone, Default)]
pub struct PowerIntoData {
    markers: HandleMarkers,
}

impl PowerIntoData {
    pub fn new(markers: HandleMarkers) -> Self {
        Self { markers }
    }
}

impl EdgeRule for PowerIntoData {
    fn name(&self) -> &'static str {
        "power-into-data"
    }

    fn check(&self, edge: &Edge, index: &GraphIndex<'_>) -> Option<Issue> {
        let (src, tgt) = crossed(edge, index, &self.markers.power, &self.markers.data)?;
        Some(Issue::fatal(
            self.name(),
            format!("DRC Violation (Fatal): Power output from '{src}' connected to Data input on '{tgt}'."),
        ))
    }
}

/// Data output wired into a power input.
#[derive(Debug, Clone, Default)]
pub struct DataIntoPower {
    markers: HandleMarkers,
}

impl DataIntoPower {
    pub fn new(markers: HandleMarkers) -> Self {
        Self { markers }
    }
}

impl EdgeRule for DataIntoPower {
    fn name(&self) -> &'static str {
        "data-into-power"
    }

    fn check(&self, edge: &Edge, index: &GraphIndex<'_>) -> Option<Issue> {
        let (src, tgt) = crossed(edge, index, &self.markers.data, &self.markers.power)?;
        Some(Issue::fatal(
            self.name(),
            format!("DRC Violation (Fatal): Data output from '{src}' connected to Power input on '{tgt}'."),
        ))
    }
}

/// Run every rule over every edge.
///
/// Issues come out in edge order, and within one edge in rule order.
pub fn check_edges(edges: &[Edge], index: &GraphIndex<'_>, rules: &[Box<dyn EdgeRule>]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, edge) in edges.iter().enumerate() {
        if edge.handles().is_none() {
            continue;
        }
        for rule in rules {
            if let Some(issue) = rule.check(edge, index) {
                debug!(edge = idx, rule = rule.name(), source = %edge.source, target = %edge.target, "connectivity violation");
                issues.push(issue);
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drc::Severity;
    use crate::graph::{Category, Node};

    fn default_rules() -> Vec<Box<dyn EdgeRule>> {
        vec![Box::new(PowerIntoData::default()), Box::new(DataIntoPower::default())]
    }

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("a", Category::Pmic, "Battery", 5.0),
            Node::new("b", Category::from_tag("Sensor"), "Sensor", 0.3),
        ]
    }

    #[test]
    fn test_power_into_data() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![Edge::new("a", "b", Some("pwr_out"), Some("data_in"))];

        let issues = check_edges(&edges, &index, &default_rules());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Fatal);
        assert_eq!(issues[0].rule, "power-into-data");
        assert_eq!(
            issues[0].message,
            "DRC Violation (Fatal): Power output from 'Battery' connected to Data input on 'Sensor'."
        );
    }

    #[test]
    fn test_data_into_power() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![Edge::new("b", "a", Some("data-out"), Some("pwr-in"))];

        let issues = check_edges(&edges, &index, &default_rules());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "DRC Violation (Fatal): Data output from 'Sensor' connected to Power input on 'Battery'."
        );
    }

    #[test]
    fn test_matching_roles_pass() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![
            Edge::new("a", "b", Some("pwr-out"), Some("pwr-in")),
            Edge::new("b", "a", Some("data-out"), Some("data-in")),
        ];
        assert!(check_edges(&edges, &index, &default_rules()).is_empty());
    }

    #[test]
    fn test_missing_handle_skips_edge() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![
            Edge::new("a", "b", Some("pwr_out"), None),
            Edge::new("a", "b", None, Some("data_in")),
            Edge::new("a", "b", None, None),
            Edge::new("a", "b", Some(""), Some("data_in")),
        ];
        assert!(check_edges(&edges, &index, &default_rules()).is_empty());
    }

    #[test]
    fn test_ambiguous_handles_fire_both_rules() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![Edge::new("a", "b", Some("pwr_data_mux"), Some("pwr_data_mux"))];

        let issues = check_edges(&edges, &index, &default_rules());
        let rules: Vec<&str> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec!["power-into-data", "data-into-power"]);
    }

    #[test]
    fn test_dangling_endpoints_use_unknown_label() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![Edge::new("ghost", "b", Some("pwr"), Some("data"))];

        let issues = check_edges(&edges, &index, &default_rules());
        assert_eq!(
            issues[0].message,
            "DRC Violation (Fatal): Power output from 'Unknown' connected to Data input on 'Sensor'."
        );
    }

    #[test]
    fn test_issues_follow_edge_order() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let edges = vec![
            Edge::new("b", "a", Some("data-out"), Some("pwr-in")),
            Edge::new("a", "b", Some("pwr-out"), Some("pwr-in")),
            Edge::new("a", "b", Some("pwr-out"), Some("data-in")),
        ];

        let issues = check_edges(&edges, &index, &default_rules());
        let rules: Vec<&str> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec!["data-into-power", "power-into-data"]);
    }

    #[test]
    fn test_shared_markers_drive_both_rules() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let markers = HandleMarkers::new("vcc", "sig");
        let rules: Vec<Box<dyn EdgeRule>> = vec![
            Box::new(PowerIntoData::new(markers.clone())),
            Box::new(DataIntoPower::new(markers)),
        ];
        let edges = vec![
            Edge::new("a", "b", Some("vcc-out"), Some("sig-in")),
            Edge::new("b", "a", Some("sig-out"), Some("vcc-in")),
            Edge::new("a", "b", Some("pwr-out"), Some("data-in")),
        ];

        let issues = check_edges(&edges, &index, &rules);
        let names: Vec<&str> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(names, vec!["power-into-data", "data-into-power"]);
        assert_eq!(HandleMarkers::default(), HandleMarkers::new("pwr", "data"));
    }

    #[test]
    fn test_custom_markers() {
        let nodes = nodes();
        let index = GraphIndex::build(&nodes);
        let rules: Vec<Box<dyn EdgeRule>> = vec![Box::new(PowerIntoData::new(HandleMarkers::new("vcc", "sig")))];
        let edges = vec![
            Edge::new("a", "b", Some("vcc-out"), Some("sig-in")),
            Edge::new("a", "b", Some("pwr-out"), Some("data-in")),
        ];
        assert_eq!(check_edges(&edges, &index, &rules).len(), 1);
    }
}
