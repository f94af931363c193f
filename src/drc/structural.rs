//! Structural rules: system-level policy checks over aggregate facts.

use tracing::debug;

use super::issue::Issue;
use super::power::AggregateFacts;

/// A check over the design's aggregate facts.
pub trait StructuralRule: Send + Sync {
    /// Stable rule name, attached to every issue it emits.
    fn name(&self) -> &'static str;

    fn check(&self, facts: &AggregateFacts) -> Option<Issue>;
}

/// An SoC with no PMIC to feed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingPmic;

impl StructuralRule for MissingPmic {
    fn name(&self) -> &'static str {
        "missing-pmic"
    }

    fn check(&self, facts: &AggregateFacts) -> Option<Issue> {
        if facts.soc_count > 0 && facts.pmic_count == 0 {
            Some(Issue::warning(
                self.name(),
                "DRC Warning: System contains an SoC but lacks a dedicated PMIC for power delivery.",
            ))
        } else {
            None
        }
    }
}

/// Run every structural rule in order.
pub fn check_facts(facts: &AggregateFacts, rules: &[Box<dyn StructuralRule>]) -> Vec<Issue> {
    rules
        .iter()
        .filter_map(|rule| {
            let issue = rule.check(facts)?;
            debug!(rule = rule.name(), "structural violation");
            Some(issue)
        })
        .collect()
}
