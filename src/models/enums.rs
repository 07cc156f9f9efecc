use serde::{Deserialize, Serialize};

/// Triage risk level, ordered by severity.
///
/// The derived `Ord` follows declaration order, so
/// `Green < Yellow < Red` and the most severe match can be picked with
/// plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = ParseRiskLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Green" => Ok(Self::Green),
            "Yellow" => Ok(Self::Yellow),
            "Red" => Ok(Self::Red),
            _ => Err(ParseRiskLevelError(s.into())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown risk level: {0}")]
pub struct ParseRiskLevelError(String);
