//! Temporal kernel families

use serde::{Deserialize, Serialize};

/// A temporal decay/growth function family
///
/// Profiles restrict which of these callers may request through
/// `temporal_config.kernel_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelType {
    /// Exponential decay or growth
    Exponential,
    /// Linear ramp
    Linear,
    /// Logistic saturation
    Logistic,
    /// Sigmoid-shaped transition
    SCurve,
    /// Power-law decay
    PowerLaw,
    /// Periodic signal
    Oscillatory,
    /// Long-memory accumulation
    Memory,
}

impl KernelType {
    /// Get the kernel name as written in profile documents
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelType::Exponential => "exponential",
            KernelType::Linear => "linear",
            KernelType::Logistic => "logistic",
            KernelType::SCurve => "s_curve",
            KernelType::PowerLaw => "power_law",
            KernelType::Oscillatory => "oscillatory",
            KernelType::Memory => "memory",
        }
    }

    /// Parse a kernel name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exponential" => Some(KernelType::Exponential),
            "linear" => Some(KernelType::Linear),
            "logistic" => Some(KernelType::Logistic),
            "s_curve" => Some(KernelType::SCurve),
            "power_law" => Some(KernelType::PowerLaw),
            "oscillatory" => Some(KernelType::Oscillatory),
            "memory" => Some(KernelType::Memory),
            _ => None,
        }
    }

    /// Default allowlist for profiles that do not declare one
    pub fn default_allowlist() -> Vec<KernelType> {
        vec![KernelType::Linear, KernelType::Memory]
    }
}

impl std::str::FromStr for KernelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid kernel type: {}", s))
    }
}

impl std::fmt::Display for KernelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALLOWED_KERNEL_TYPES;

    #[test]
    fn test_allowed_kernels_parse() {
        for name in ALLOWED_KERNEL_TYPES {
            assert_eq!(KernelType::parse(name).unwrap().as_str(), name);
        }
        assert_eq!(KernelType::parse("warp_drive"), None);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&KernelType::PowerLaw).unwrap();
        assert_eq!(json, "\"power_law\"");
        let parsed: KernelType = serde_json::from_str("\"s_curve\"").unwrap();
        assert_eq!(parsed, KernelType::SCurve);
    }
}
