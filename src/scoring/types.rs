use std::fmt;

/// Score band assigned to a validated address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityTier {
    /// Band thresholds: 80 Excellent, 60 Good, 40 Fair, below that Poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => f.write_str("excellent"),
            Self::Good => f.write_str("good"),
            Self::Fair => f.write_str("fair"),
            Self::Poor => f.write_str("poor"),
        }
    }
}

/// Downstream routing decision derived from the score.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Accept,
    Review,
}

impl Recommendation {
    pub fn from_score(score: u8) -> Self {
        if score >= 60 { Self::Accept } else { Self::Review }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("accept"),
            Self::Review => f.write_str("review"),
        }
    }
}

/// One line of the score breakdown.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDelta {
    pub category: String,
    pub points: i32,
    pub reason: String,
}

impl ScoreDelta {
    pub(crate) fn new(
        category: impl Into<String>,
        points: i32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            points,
            reason: reason.into(),
        }
    }
}

/// Aggregated score with its full derivation.
///
/// `breakdown` is ordered as applied, base first; its points sum to the
/// pre-clamp score.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: u8,
    pub quality_tier: QualityTier,
    pub recommendation: Recommendation,
    pub breakdown: Vec<ScoreDelta>,
}
