//! Domain typo correction.
//!
//! Three stages, first match wins: exact lookup in a curated typo table,
//! malformed-TLD repair, then bounded Levenshtein distance against a trusted
//! provider list. Results are memoized per lowercased domain.

mod distance;
mod tables;
mod types;

pub use distance::levenshtein;
pub use types::{CorrectionKind, CorrectionResult, EmailCorrection};

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::parser::parse_address;

/// Similarity matches beyond this edit distance are discarded.
const MAX_EDIT_DISTANCE: usize = 2;

/// The memo is capped, not evicted; past this size corrections are simply
/// recomputed.
const MEMO_CAPACITY: usize = 8_192;

/// Stateful corrector with a process-local memo.
///
/// Correction is idempotent: feeding a corrected domain back in returns it
/// unchanged.
pub struct DomainCorrector {
    memo: RwLock<HashMap<String, CorrectionResult>>,
}

impl DomainCorrector {
    pub fn new() -> Self {
        Self {
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Suggest a correction for `domain`.
    ///
    /// The input is trimmed and lowercased before lookup; the returned
    /// `original_domain` reflects that normalized form.
    pub fn correct_domain(&self, domain: &str) -> CorrectionResult {
        let key = domain.trim().to_lowercase();

        if let Ok(memo) = self.memo.read() {
            if let Some(hit) = memo.get(&key) {
                return hit.clone();
            }
        }

        let result = correct(&key);
        if result.was_corrected {
            debug!(
                domain = %result.original_domain,
                corrected = %result.corrected_domain,
                kind = ?result.kind,
                "domain correction applied"
            );
        }

        if let Ok(mut memo) = self.memo.write() {
            if memo.len() < MEMO_CAPACITY {
                memo.insert(key, result.clone());
            }
        }

        result
    }

    /// Correct the domain side of a full address and rebuild it.
    ///
    /// Unparseable input passes through untouched with `correction: None`.
    pub fn correct_email(&self, address: &str) -> EmailCorrection {
        match parse_address(address) {
            Ok(parsed) => {
                let correction = self.correct_domain(&parsed.domain);
                let corrected = if correction.was_corrected {
                    format!("{}@{}", parsed.local, correction.corrected_domain)
                } else {
                    parsed.full
                };
                EmailCorrection {
                    original: address.to_string(),
                    was_corrected: correction.was_corrected,
                    corrected,
                    correction: Some(correction),
                }
            }
            Err(_) => EmailCorrection {
                original: address.to_string(),
                corrected: address.to_string(),
                was_corrected: false,
                correction: None,
            },
        }
    }

    /// Map [`Self::correct_email`] over a slice, one result per input, order
    /// preserved.
    pub fn correct_email_batch<S: AsRef<str>>(&self, addresses: &[S]) -> Vec<EmailCorrection> {
        addresses
            .iter()
            .map(|address| self.correct_email(address.as_ref()))
            .collect()
    }

    /// Number of correction rules carried: known typos, TLD repairs and
    /// trusted similarity targets.
    pub fn rule_count(&self) -> usize {
        tables::KNOWN_TYPOS.len() + tables::TLD_REPAIRS.len() + tables::TRUSTED_DOMAINS.len()
    }
}

impl Default for DomainCorrector {
    fn default() -> Self {
        Self::new()
    }
}

fn correct(domain: &str) -> CorrectionResult {
    if let Some(fixed) = tables::KNOWN_TYPOS.get(domain) {
        return CorrectionResult::corrected(domain, *fixed, CorrectionKind::KnownTypo, 1.0);
    }

    if let Some((head, tail)) = domain.split_once('.') {
        if !head.is_empty() {
            if let Some(fixed_tld) = tables::TLD_REPAIRS.get(tail) {
                return CorrectionResult::corrected(
                    domain,
                    format!("{head}.{fixed_tld}"),
                    CorrectionKind::TldRepair,
                    0.9,
                );
            }
        }
    }

    let mut best: Option<(usize, &'static str)> = None;
    for candidate in tables::TRUSTED_DOMAINS {
        let d = levenshtein(domain, candidate);
        if d == 0 {
            // Already a trusted domain; never "correct" it.
            return CorrectionResult::unchanged(domain);
        }
        if d <= MAX_EDIT_DISTANCE && best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, candidate));
        }
    }

    match best {
        Some((d, candidate)) => {
            let confidence = 1.0 - (d as f64 / MAX_EDIT_DISTANCE as f64) * 0.3;
            CorrectionResult::corrected(domain, candidate, CorrectionKind::SimilarityMatch, confidence)
        }
        None => CorrectionResult::unchanged(domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_typo_maps_exactly() {
        let corrector = DomainCorrector::new();
        for (typo, fixed) in tables::KNOWN_TYPOS.entries() {
            let result = corrector.correct_domain(typo);
            assert!(result.was_corrected, "{typo} should be corrected");
            assert_eq!(result.corrected_domain, *fixed);
            assert_eq!(result.kind, CorrectionKind::KnownTypo);
            assert_eq!(result.confidence, 1.0);
        }
    }

    #[test]
    fn known_typo_beats_later_stages() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("gmial.com");
        assert_eq!(result.corrected_domain, "gmail.com");
        assert_eq!(result.kind, CorrectionKind::KnownTypo);
    }

    #[test]
    fn repairs_malformed_tld() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("outlook.con");
        assert!(result.was_corrected);
        assert_eq!(result.corrected_domain, "outlook.com");
        assert_eq!(result.kind, CorrectionKind::TldRepair);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn tld_repair_keeps_subdomains_intact() {
        let corrector = DomainCorrector::new();
        // Split happens on the first dot only, so multi-label domains with a
        // broken final label fall through to the similarity stage.
        let result = corrector.correct_domain("mail.example.con");
        assert_ne!(result.kind, CorrectionKind::TldRepair);
    }

    #[test]
    fn valid_cctld_is_not_repaired() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("acme.co");
        assert!(!result.was_corrected);
        assert_eq!(result.kind, CorrectionKind::None);
    }

    #[test]
    fn similarity_match_distance_one() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("gmaol.com");
        assert!(result.was_corrected);
        assert_eq!(result.corrected_domain, "gmail.com");
        assert_eq!(result.kind, CorrectionKind::SimilarityMatch);
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn similarity_match_distance_two() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("yandax.cam");
        assert!(result.was_corrected);
        assert_eq!(result.corrected_domain, "yandex.com");
        assert_eq!(result.kind, CorrectionKind::SimilarityMatch);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn distant_domains_pass_through() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_domain("my-company-mail.example");
        assert!(!result.was_corrected);
        assert_eq!(result.kind, CorrectionKind::None);
        assert_eq!(result.corrected_domain, "my-company-mail.example");
    }

    #[test]
    fn trusted_domain_is_never_corrected() {
        let corrector = DomainCorrector::new();
        for candidate in tables::TRUSTED_DOMAINS {
            let result = corrector.correct_domain(candidate);
            assert!(!result.was_corrected, "{candidate} must pass through");
        }
    }

    #[test]
    fn correction_is_idempotent() {
        let corrector = DomainCorrector::new();
        for input in ["gmai.com", "outlook.con", "gmaol.com", "unrelated.example"] {
            let once = corrector.correct_domain(input);
            let twice = corrector.correct_domain(&once.corrected_domain);
            assert!(!twice.was_corrected, "{input}: second pass must be a no-op");
            assert_eq!(twice.corrected_domain, once.corrected_domain);
        }
    }

    #[test]
    fn memoized_result_is_stable() {
        let corrector = DomainCorrector::new();
        let first = corrector.correct_domain("Gmai.COM");
        let second = corrector.correct_domain("gmai.com");
        assert_eq!(first, second);
        assert_eq!(first.original_domain, "gmai.com");
    }

    #[test]
    fn correct_email_rewrites_domain_only() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_email("Alice+Tag@gmai.com");
        assert!(result.was_corrected);
        assert_eq!(result.corrected, "alice+tag@gmail.com");
        let correction = result.correction.expect("parseable input carries detail");
        assert_eq!(correction.kind, CorrectionKind::KnownTypo);
    }

    #[test]
    fn correct_email_passes_malformed_through() {
        let corrector = DomainCorrector::new();
        let result = corrector.correct_email("not-an-address");
        assert!(!result.was_corrected);
        assert_eq!(result.corrected, "not-an-address");
        assert!(result.correction.is_none());
    }

    #[test]
    fn batch_preserves_order_and_arity() {
        let corrector = DomainCorrector::new();
        let inputs = ["a@gmai.com", "broken", "b@example.org"];
        let out = corrector.correct_email_batch(&inputs);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].corrected, "a@gmail.com");
        assert_eq!(out[1].corrected, "broken");
        assert_eq!(out[2].corrected, "b@example.org");
    }

    #[test]
    fn rule_count_reflects_tables() {
        let corrector = DomainCorrector::new();
        assert_eq!(
            corrector.rule_count(),
            tables::KNOWN_TYPOS.len() + tables::TLD_REPAIRS.len() + tables::TRUSTED_DOMAINS.len()
        );
    }
}
