//! Hierarchy module - the level a layer operates at

use serde::{Deserialize, Serialize};

/// Hierarchy level of a layer
///
/// Levels are serialized with their capitalized names, matching profile
/// documents (`Micro`, `Meso`, `Macro`, `Meta`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HierarchyLevel {
    /// Individual-scale signals
    Micro,

    /// Group or team-scale signals
    Meso,

    /// Organization or system-scale signals
    Macro,

    /// Signals about the measurement itself
    Meta,
}

impl HierarchyLevel {
    /// Get the level name as written in profile documents
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyLevel::Micro => "Micro",
            HierarchyLevel::Meso => "Meso",
            HierarchyLevel::Macro => "Macro",
            HierarchyLevel::Meta => "Meta",
        }
    }

    /// Parse a level name. Matching is exact; `micro` is not `Micro`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Micro" => Some(HierarchyLevel::Micro),
            "Meso" => Some(HierarchyLevel::Meso),
            "Macro" => Some(HierarchyLevel::Macro),
            "Meta" => Some(HierarchyLevel::Meta),
            _ => None,
        }
    }
}

impl std::str::FromStr for HierarchyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid hierarchy level: {}", s))
    }
}

impl std::fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
