//! Design-rule checking engine.
//!
//! A run is a fixed pipeline over one [`DesignGraph`](crate::graph::DesignGraph):
//!
//! 1. Index nodes by ID ([`GraphIndex`](crate::graph::GraphIndex))
//! 2. Aggregate power and count categories ([`aggregate`])
//! 3. Run edge rules over every edge, in edge order ([`check_edges`])
//! 4. Run structural rules over the aggregate facts ([`check_facts`])
//! 5. Merge everything into a [`SimulationReport`](crate::report::SimulationReport)
//!
//! ## Rules
//!
//! | Rule | Tier | Severity | Fires when |
//! |------|------|----------|------------|
//! | `power-into-data` | edge | Fatal | source handle has the power marker, target handle the data marker |
//! | `data-into-power` | edge | Fatal | source handle has the data marker, target handle the power marker |
//! | `missing-pmic` | structural | Warning | at least one SoC and no PMIC |
//!
//! New rules implement [`EdgeRule`] or [`StructuralRule`] and are appended to
//! a [`DrcEngine`].

mod connectivity;
mod engine;
mod issue;
mod power;
mod structural;

pub use connectivity::{check_edges, DataIntoPower, EdgeRule, HandleMarkers, PowerIntoData};
pub use engine::{DrcConfig, DrcEngine};
pub use issue::{Issue, Severity};
pub use power::{aggregate, finite_watts, AggregateFacts, CategoryShare, Consumer, PowerBreakdown};
pub use structural::{check_facts, MissingPmic, StructuralRule};

pub use connectivity::{DEFAULT_DATA_MARKER, DEFAULT_POWER_MARKER};

/// Default power level (W) at or above which a node counts as high-power.
pub const DEFAULT_HIGH_POWER_THRESHOLD_W: f64 = 10.0;

/// Default number of nodes listed as top consumers.
pub const DEFAULT_TOP_CONSUMER_COUNT: usize = 3;
