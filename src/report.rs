//! Simulation report: the single value a DRC run hands back to its caller.
//!
//! A report is either the normal classified result of a run, or the crash
//! report produced when the graph document could not be read or parsed.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::drc::{AggregateFacts, Issue, PowerBreakdown, Severity};
use crate::error::{DrcError, Result};

/// Prefix of the single issue carried by a crash report.
pub const CRASH_PREFIX: &str = "Simulation Engine Crash";

/// Rule name attached to the crash issue.
const CRASH_RULE: &str = "engine";

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Error,
}

impl Status {
    /// Classify a list of issues.
    ///
    /// `Error` if any issue is fatal, `Warning` if any issue exists at all,
    /// `Success` otherwise.
    pub fn classify(issues: &[Issue]) -> Self {
        match issues.iter().map(|i| i.severity).max() {
            None => Status::Success,
            Some(Severity::Fatal) => Status::Error,
            Some(_) => Status::Warning,
        }
    }
}

/// Aggregate numbers reported for a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    nodes_analyzed: usize,
    total_power_w: f64,
    drc_checks_passed: bool,
}

impl ReportData {
    pub fn nodes_analyzed(&self) -> usize {
        self.nodes_analyzed
    }

    pub fn total_power_w(&self) -> f64 {
        self.total_power_w
    }

    pub fn drc_checks_passed(&self) -> bool {
        self.drc_checks_passed
    }
}

/// The complete result of a DRC run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    status: Status,
    issues: Vec<Issue>,
    #[serde(serialize_with = "serialize_report_data")]
    report_data: Option<ReportData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    power_breakdown: Option<PowerBreakdown>,
}

impl SimulationReport {
    /// Build a report from the rule engines' output.
    ///
    /// Connectivity issues come first, then structural ones. Status and the
    /// passed flag are derived from the merged list.
    pub fn build(connectivity: Vec<Issue>, structural: Vec<Issue>, facts: &AggregateFacts) -> Self {
        let mut issues = connectivity;
        issues.extend(structural);

        let report_data = ReportData {
            nodes_analyzed: facts.node_count,
            total_power_w: facts.total_power_w,
            drc_checks_passed: issues.is_empty(),
        };

        Self {
            status: Status::classify(&issues),
            issues,
            report_data: Some(report_data),
            power_breakdown: None,
        }
    }

    /// The distinguished report for a run whose input could not be obtained.
    pub fn crash(err: &DrcError) -> Self {
        Self {
            status: Status::Error,
            issues: vec![Issue::fatal(CRASH_RULE, format!("{CRASH_PREFIX}: {err}"))],
            report_data: None,
            power_breakdown: None,
        }
    }

    /// Attach a power breakdown. Ignored on crash reports.
    pub fn with_power_breakdown(mut self, breakdown: PowerBreakdown) -> Self {
        if self.report_data.is_some() {
            self.power_breakdown = Some(breakdown);
        }
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// `None` for crash reports.
    pub fn report_data(&self) -> Option<&ReportData> {
        self.report_data.as_ref()
    }

    pub fn power_breakdown(&self) -> Option<&PowerBreakdown> {
        self.power_breakdown.as_ref()
    }

    /// Whether this is a crash report.
    pub fn is_crash(&self) -> bool {
        self.report_data.is_none()
    }

    /// Serialize to JSON, compact or indented.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| DrcError::output(e.to_string()))
    }
}

fn serialize_report_data<S: Serializer>(
    data: &Option<ReportData>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match data {
        Some(data) => data.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
