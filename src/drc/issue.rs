//! Rule findings.

use std::fmt;

use serde::{Serialize, Serializer};

/// Severity of a rule finding.
///
/// Variants are ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Noteworthy, not a violation
    Info,
    /// Policy violation that does not block the design
    Warning,
    /// Electrical violation; the report status becomes `error`
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// A single finding emitted by a rule.
///
/// The severity is structured data; the message is for humans only and is
/// never inspected to classify a report. Serializes as the bare message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// How bad the finding is
    pub severity: Severity,
    /// Name of the rule that produced it
    pub rule: &'static str,
    /// Human-readable description
    pub message: String,
}

impl Issue {
    /// Create an issue.
    pub fn new(severity: Severity, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule,
            message: message.into(),
        }
    }

    /// Create a fatal issue
    pub fn fatal(rule: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, rule, message)
    }

    /// Create a warning issue
    pub fn warning(rule: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, rule, message)
    }

    /// Create an informational issue
    pub fn info(rule: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, rule, message)
    }

    /// Check if this issue makes the report an error.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}
