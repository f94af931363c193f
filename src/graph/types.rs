//! Core value types for design graph representation.

use std::borrow::Borrow;
use std::fmt;

/// Category tag for power-management ICs.
pub const PMIC_TAG: &str = "PMIC";

/// Category tag for systems-on-chip.
pub const SOC_TAG: &str = "SoC";

/// An opaque node identifier as it appears in the design document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Component category of a node.
///
/// Matching is exact and case-sensitive: `"pmic"` is not a PMIC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Power-management IC
    Pmic,
    /// System-on-chip
    Soc,
    /// Any other tag, including the empty tag for uncategorized nodes
    Other(String),
}

impl Category {
    /// Classify a raw category tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            PMIC_TAG => Category::Pmic,
            SOC_TAG => Category::Soc,
            other => Category::Other(other.to_string()),
        }
    }

    /// The raw tag this category was read from.
    pub fn tag(&self) -> &str {
        match self {
            Category::Pmic => PMIC_TAG,
            Category::Soc => SOC_TAG,
            Category::Other(tag) => tag,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A free-form port identifier on one end of an edge (e.g. `"pwr-out"`, `"data_in"`).
///
/// The role of a handle is inferred by substring markers, not parsed into a
/// closed set, so a handle may carry both a power and a data marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(pub String);

impl Handle {
    /// Build a handle from an optional raw value. Empty strings count as absent.
    pub fn from_raw(raw: Option<String>) -> Option<Self> {
        raw.filter(|s| !s.is_empty()).map(Handle)
    }

    /// Check whether the handle contains the given role marker.
    pub fn carries(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }

    /// The handle text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_exact_match() {
        assert_eq!(Category::from_tag("PMIC"), Category::Pmic);
        assert_eq!(Category::from_tag("SoC"), Category::Soc);
        assert_eq!(Category::from_tag("soc"), Category::Other("soc".to_string()));
        assert_eq!(Category::from_tag("pmic"), Category::Other("pmic".to_string()));
        assert_eq!(Category::from_tag(""), Category::default());
    }

    #[test]
    fn test_category_tag_roundtrips_raw_text() {
        assert_eq!(Category::from_tag("Sensor").tag(), "Sensor");
        assert_eq!(Category::Soc.to_string(), "SoC");
    }

    #[test]
    fn test_empty_handle_is_absent() {
        assert_eq!(Handle::from_raw(Some(String::new())), None);
        assert_eq!(Handle::from_raw(None), None);
        assert_eq!(
            Handle::from_raw(Some("pwr-out".to_string())),
            Some(Handle("pwr-out".to_string()))
        );
    }

    #[test]
    fn test_handle_marker_is_substring() {
        let handle = Handle("pwr_data_mux".to_string());
        assert!(handle.carries("pwr"));
        assert!(handle.carries("data"));
        assert!(!handle.carries("PWR"));
    }
}
