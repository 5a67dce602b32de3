//! Mode enumerations shared by profiles and detection requests

use serde::{Deserialize, Serialize};

/// Which kind of signal a detection run looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Divergence between layers
    Friction,
    /// Alignment between layers
    Emergence,
}

impl DetectionMode {
    /// Get the mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Friction => "friction",
            DetectionMode::Emergence => "emergence",
        }
    }

    /// Parse a mode name. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "friction" => Some(DetectionMode::Friction),
            "emergence" => Some(DetectionMode::Emergence),
            _ => None,
        }
    }
}

/// How interaction coefficients are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Coefficients adapt to layer values
    #[default]
    Dynamic,
    /// Fixed base coefficients
    Base,
}

impl InteractionMode {
    /// Get the mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Dynamic => "dynamic",
            InteractionMode::Base => "base",
        }
    }

    /// Parse a mode name. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dynamic" => Some(InteractionMode::Dynamic),
            "base" => Some(InteractionMode::Base),
            _ => None,
        }
    }
}

/// How a caller-supplied interaction override combines with the coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionOverrideMode {
    /// Multiply the coefficients
    #[default]
    Scale,
    /// Replace the coefficients
    Replace,
}

impl InteractionOverrideMode {
    /// Get the mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionOverrideMode::Scale => "scale",
            InteractionOverrideMode::Replace => "replace",
        }
    }

    /// Parse a mode name. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scale" => Some(InteractionOverrideMode::Scale),
            "replace" => Some(InteractionOverrideMode::Replace),
            _ => None,
        }
    }
}

macro_rules! impl_mode_traits {
    ($ty:ident, $label:literal) => {
        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| format!(concat!("Invalid ", $label, ": {}"), s))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_mode_traits!(DetectionMode, "mode");
impl_mode_traits!(InteractionMode, "interaction mode");
impl_mode_traits!(InteractionOverrideMode, "interaction override mode");
