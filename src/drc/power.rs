//! Power aggregation over the node collection.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::{Category, Node, UNKNOWN_LABEL};

/// Aggregate facts about a design, consumed by structural rules and the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateFacts {
    /// Number of nodes analyzed (duplicates counted)
    pub node_count: usize,
    /// Sum of all node power draws in watts
    pub total_power_w: f64,
    /// Number of power-management IC nodes
    pub pmic_count: usize,
    /// Number of system-on-chip nodes
    pub soc_count: usize,
}

/// Sum power and count categories in a single pass.
///
/// Cannot fail: malformed power values were already normalized to 0.0.
pub fn aggregate(nodes: &[Node]) -> AggregateFacts {
    let mut facts = AggregateFacts {
        node_count: nodes.len(),
        ..AggregateFacts::default()
    };

    for node in nodes {
        match node.category {
            Category::Pmic => facts.pmic_count += 1,
            Category::Soc => facts.soc_count += 1,
            Category::Other(_) => {}
        }
        facts.total_power_w += node.power_w;
    }
    facts.total_power_w = finite_watts(facts.total_power_w);

    facts
}

/// Clamp a power figure to the finite `f64` range.
///
/// Sums of finite inputs can still overflow, and a non-finite float would
/// serialize as `null`.
pub fn finite_watts(watts: f64) -> f64 {
    if watts.is_nan() {
        0.0
    } else {
        watts.clamp(-f64::MAX, f64::MAX)
    }
}

/// Power drawn by one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub power_w: f64,
    /// Percentage of total power (0-100)
    pub ratio_pct: f64,
}

/// One of the largest power consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consumer {
    pub id: String,
    pub label: String,
    pub category: String,
    pub power_w: f64,
}

/// Per-category and per-node power overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerBreakdown {
    pub average_power_w: f64,
    /// Nodes at or above the high-power threshold
    pub high_power_nodes: usize,
    /// Sorted by power, largest first
    pub distribution: Vec<CategoryShare>,
    /// Largest consumers, largest first
    pub top_consumers: Vec<Consumer>,
}

impl PowerBreakdown {
    /// Compute the breakdown for a node collection.
    pub fn compute(nodes: &[Node], high_power_threshold_w: f64, top_consumer_count: usize) -> Self {
        let total = finite_watts(nodes.iter().map(|n| n.power_w).sum());
        let average_power_w = if nodes.is_empty() {
            0.0
        } else {
            total / nodes.len() as f64
        };

        let high_power_nodes = nodes
            .iter()
            .filter(|n| n.power_w >= high_power_threshold_w)
            .count();

        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for node in nodes {
            *by_category.entry(display_category(&node.category)).or_insert(0.0) += node.power_w;
        }

        // BTreeMap order gives name-ascending ties after the stable sort
        let mut distribution: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, power_w)| CategoryShare {
                category: category.to_string(),
                power_w: finite_watts(power_w),
                ratio_pct: if total > 0.0 {
                    finite_watts(power_w / total * 100.0)
                } else {
                    0.0
                },
            })
            .collect();
        distribution.sort_by(|a, b| descending(a.power_w, b.power_w));

        let mut ranked: Vec<&Node> = nodes.iter().collect();
        ranked.sort_by(|a, b| descending(a.power_w, b.power_w));
        let top_consumers = ranked
            .into_iter()
            .take(top_consumer_count)
            .map(|node| Consumer {
                id: node.id.to_string(),
                label: node.label.clone(),
                category: display_category(&node.category).to_string(),
                power_w: node.power_w,
            })
            .collect();

        Self {
            average_power_w,
            high_power_nodes,
            distribution,
            top_consumers,
        }
    }
}

fn display_category(category: &Category) -> &str {
    match category.tag() {
        "" => UNKNOWN_LABEL,
        tag => tag,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
