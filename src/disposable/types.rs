use std::fmt;

/// Coarse throwaway-risk banding derived from the detection confidence.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
            Self::VeryHigh => f.write_str("very-high"),
        }
    }
}

/// Outcome of the disposable-address check.
///
/// `confidence` is 0-100. Exact list hits score 95, heuristic hits 70,
/// clean addresses 0. False negatives are expected; the signal is advisory.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposableResult {
    pub is_disposable: bool,
    pub confidence: u8,
    pub risk_tier: RiskTier,
    /// Name of the rule that fired: `exact:<domain>` for list hits, the
    /// heuristic's name otherwise. `None` when nothing matched.
    pub matched_rule: Option<String>,
}

impl DisposableResult {
    pub(crate) fn exact(domain: &str) -> Self {
        Self {
            is_disposable: true,
            confidence: 95,
            risk_tier: RiskTier::VeryHigh,
            matched_rule: Some(format!("exact:{domain}")),
        }
    }

    pub(crate) fn heuristic(rule_name: &'static str) -> Self {
        Self {
            is_disposable: true,
            confidence: 70,
            risk_tier: RiskTier::High,
            matched_rule: Some(rule_name.to_string()),
        }
    }

    pub(crate) fn clean() -> Self {
        Self {
            is_disposable: false,
            confidence: 0,
            risk_tier: RiskTier::Low,
            matched_rule: None,
        }
    }
}
