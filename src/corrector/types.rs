/// Which correction stage produced the suggestion.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionKind {
    /// Exact hit in the curated typo table.
    KnownTypo,
    /// Final label replaced from the malformed-TLD table.
    TldRepair,
    /// Bounded edit distance against the trusted domain list.
    SimilarityMatch,
    /// No correction applied.
    None,
}

/// Outcome of a single domain correction.
///
/// `confidence` is in `[0, 1]`: 1.0 for table hits, 0.9 for TLD repairs,
/// 0.85/0.7 for similarity matches at distance 1/2, 0.0 when unchanged.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionResult {
    pub original_domain: String,
    pub corrected_domain: String,
    pub was_corrected: bool,
    pub kind: CorrectionKind,
    pub confidence: f64,
}

impl CorrectionResult {
    pub(crate) fn unchanged(domain: &str) -> Self {
        Self {
            original_domain: domain.to_string(),
            corrected_domain: domain.to_string(),
            was_corrected: false,
            kind: CorrectionKind::None,
            confidence: 0.0,
        }
    }

    pub(crate) fn corrected(
        original: &str,
        corrected: impl Into<String>,
        kind: CorrectionKind,
        confidence: f64,
    ) -> Self {
        Self {
            original_domain: original.to_string(),
            corrected_domain: corrected.into(),
            was_corrected: true,
            kind,
            confidence,
        }
    }

    /// Domain the downstream checks should use: the corrected one when a
    /// correction fired, the original otherwise.
    pub fn effective_domain(&self) -> &str {
        &self.corrected_domain
    }
}

/// A full-address correction produced by [`DomainCorrector::correct_email`].
///
/// The local part is never altered; only the domain side of the rebuilt
/// address can differ from the (normalized) input.
///
/// [`DomainCorrector::correct_email`]: crate::corrector::DomainCorrector::correct_email
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EmailCorrection {
    pub original: String,
    pub corrected: String,
    pub was_corrected: bool,
    /// `None` when the input could not be parsed and passed through untouched.
    pub correction: Option<CorrectionResult>,
}
