use std::time::{Duration, SystemTime};

use crate::corrector::CorrectionResult;
use crate::disposable::{DisposableResult, RiskTier};
use crate::mx::RoutabilityResult;
use crate::scoring::{QualityTier, Recommendation, ScoreDelta};

/// What went wrong for one address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The input is not an e-mail address; the result is invalid but the
    /// call (and any surrounding batch) carries on.
    MalformedAddress,
    /// Unexpected failure inside a check; the result carries score 0.
    Internal,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::MalformedAddress,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Internal,
            message: message.into(),
        }
    }
}

/// Per-check evidence attached to a result. A `None` field means the
/// check was switched off for the call (or never ran because parsing
/// failed).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub correction: Option<CorrectionResult>,
    pub disposable: Option<DisposableResult>,
    pub routability: Option<RoutabilityResult>,
}

impl Signals {
    pub(crate) fn none() -> Self {
        Self {
            correction: None,
            disposable: None,
            routability: None,
        }
    }
}

/// Final verdict for one address. Immutable once produced; cached copies
/// differ only in `served_from_cache`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Normalized address, or the raw input when parsing failed.
    pub address: String,
    pub is_valid: bool,
    pub score: u8,
    pub quality_tier: QualityTier,
    pub recommendation: Recommendation,
    pub risk_tier: RiskTier,
    pub signals: Signals,
    pub breakdown: Vec<ScoreDelta>,
    pub error: Option<ValidationIssue>,
    pub took_millis: u64,
    pub computed_at: SystemTime,
    pub served_from_cache: bool,
}

impl ValidationResult {
    pub(crate) fn invalid(address: &str, issue: ValidationIssue, took: Duration) -> Self {
        Self {
            address: address.to_string(),
            is_valid: false,
            score: 0,
            quality_tier: QualityTier::Poor,
            recommendation: Recommendation::Review,
            risk_tier: RiskTier::High,
            signals: Signals::none(),
            breakdown: Vec::new(),
            error: Some(issue),
            took_millis: took.as_millis() as u64,
            computed_at: SystemTime::now(),
            served_from_cache: false,
        }
    }

    /// True when the scoring policy recommends accepting the address.
    pub fn accepted(&self) -> bool {
        matches!(self.recommendation, Recommendation::Accept)
    }
}

/// Point-in-time counters for monitoring.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Entries currently held by the result cache.
    pub cache_size: usize,
    /// Exact disposable domains plus heuristic rules.
    pub disposable_rule_count: usize,
    /// Known typos, TLD repairs, and trusted domains combined.
    pub correction_rule_count: usize,
}
