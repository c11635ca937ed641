//! Score aggregation.
//!
//! Pure and deterministic: the same signals always produce the same
//! outcome. Skipped checks contribute nothing, so a parse-only run still
//! yields a usable (if uninformative) score.

mod types;

pub use types::{QualityTier, Recommendation, ScoreDelta, ScoreOutcome};

use phf::phf_set;

use crate::corrector::CorrectionResult;
use crate::disposable::DisposableResult;
use crate::mx::RoutabilityResult;
use crate::parser::ParsedAddress;

/// Established mailbox providers; hosting one of these domains is worth a
/// small bonus on top of the network signals.
static KNOWN_PROVIDERS: phf::Set<&'static str> = phf_set! {
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    "icloud.com",
    "me.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "gmx.com",
    "gmx.de",
    "zoho.com",
    "fastmail.com",
    "mail.com",
    "yandex.com",
};

const BASE_SCORE: i32 = 50;
const ROUTABLE_BONUS: i32 = 25;
const UNROUTABLE_PENALTY: i32 = -15;
const DISPOSABLE_PENALTY: i32 = -40;
const CLEAN_BONUS: i32 = 15;
const PROVIDER_BONUS: i32 = 10;

/// Combines per-check signals into a final score, tier, and
/// recommendation. Pass `None` for checks that did not run; their deltas
/// are simply absent from the breakdown.
pub fn aggregate(
    parsed: &ParsedAddress,
    correction: Option<&CorrectionResult>,
    disposable: Option<&DisposableResult>,
    routability: Option<&RoutabilityResult>,
) -> ScoreOutcome {
    let mut breakdown = vec![ScoreDelta::new(
        "base",
        BASE_SCORE,
        "every address starts at the midpoint",
    )];

    if let Some(routability) = routability {
        if routability.routable {
            breakdown.push(ScoreDelta::new(
                "routability",
                ROUTABLE_BONUS,
                format!("{} publishes mail exchangers", routability.domain),
            ));
        } else {
            breakdown.push(ScoreDelta::new(
                "routability",
                UNROUTABLE_PENALTY,
                format!("{} accepts no mail", routability.domain),
            ));
        }
    }

    if let Some(disposable) = disposable {
        if disposable.is_disposable {
            let rule = disposable.matched_rule.as_deref().unwrap_or("unnamed");
            breakdown.push(ScoreDelta::new(
                "disposable",
                DISPOSABLE_PENALTY,
                format!("throwaway marker matched ({rule})"),
            ));
        } else {
            breakdown.push(ScoreDelta::new(
                "disposable",
                CLEAN_BONUS,
                "no throwaway marker",
            ));
        }
    }

    // The bonus follows the domain the correction settled on, applied at
    // most once.
    let effective_domain = correction
        .map(CorrectionResult::effective_domain)
        .unwrap_or(parsed.domain.as_str());
    if KNOWN_PROVIDERS.contains(effective_domain) {
        breakdown.push(ScoreDelta::new(
            "provider",
            PROVIDER_BONUS,
            format!("{effective_domain} is an established mailbox provider"),
        ));
    }

    let total: i32 = breakdown.iter().map(|delta| delta.points).sum();
    let score = total.clamp(0, 100) as u8;
    ScoreOutcome {
        score,
        quality_tier: QualityTier::from_score(score),
        recommendation: Recommendation::from_score(score),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrector::DomainCorrector;
    use crate::disposable::{DisposableResult, RiskTier};
    use crate::mx::{MxHost, RoutabilityErrorKind, RoutabilityResult};
    use crate::parser::parse_address;

    fn parsed(address: &str) -> ParsedAddress {
        parse_address(address).expect("test address parses")
    }

    fn routable(domain: &str) -> RoutabilityResult {
        RoutabilityResult::records(domain, vec![MxHost::new(10, format!("mx.{domain}"))])
    }

    fn unroutable(domain: &str) -> RoutabilityResult {
        RoutabilityResult::no_records(domain)
    }

    fn disposable_hit() -> DisposableResult {
        DisposableResult {
            is_disposable: true,
            confidence: 95,
            risk_tier: RiskTier::VeryHigh,
            matched_rule: Some("exact:mailinator.com".to_string()),
        }
    }

    fn clean() -> DisposableResult {
        DisposableResult {
            is_disposable: false,
            confidence: 0,
            risk_tier: RiskTier::Low,
            matched_rule: None,
        }
    }

    #[test]
    fn all_positive_signals_reach_one_hundred() {
        let parsed = parsed("alice@gmail.com");
        let outcome = aggregate(
            &parsed,
            None,
            Some(&clean()),
            Some(&routable("gmail.com")),
        );
        // 50 + 25 + 15 + 10
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.quality_tier, QualityTier::Excellent);
        assert_eq!(outcome.recommendation, Recommendation::Accept);
    }

    #[test]
    fn negative_signals_clamp_at_zero() {
        let parsed = parsed("x@nowhere.invalid");
        let outcome = aggregate(
            &parsed,
            None,
            Some(&disposable_hit()),
            Some(&unroutable("nowhere.invalid")),
        );
        // 50 - 15 - 40 = -5, clamped
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.quality_tier, QualityTier::Poor);
        assert_eq!(outcome.recommendation, Recommendation::Review);
        let total: i32 = outcome.breakdown.iter().map(|delta| delta.points).sum();
        assert_eq!(total, -5);
    }

    #[test]
    fn skipped_checks_leave_no_deltas() {
        let parsed = parsed("bob@unknownhost.example");
        let outcome = aggregate(&parsed, None, None, None);
        assert_eq!(outcome.score, 50);
        assert_eq!(outcome.breakdown.len(), 1);
        assert_eq!(outcome.breakdown[0].category, "base");
    }

    #[test]
    fn breakdown_is_ordered_base_first() {
        let parsed = parsed("alice@gmail.com");
        let outcome = aggregate(
            &parsed,
            None,
            Some(&clean()),
            Some(&routable("gmail.com")),
        );
        let categories: Vec<_> = outcome
            .breakdown
            .iter()
            .map(|delta| delta.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec!["base", "routability", "disposable", "provider"]
        );
    }

    #[test]
    fn provider_bonus_follows_the_corrected_domain() {
        let corrector = DomainCorrector::new();
        let correction = corrector.correct_domain("gmai.com");
        assert!(correction.was_corrected);

        let parsed = parsed("alice@gmai.com");
        let outcome = aggregate(&parsed, Some(&correction), None, None);
        assert_eq!(outcome.score, 60);
        assert!(
            outcome
                .breakdown
                .iter()
                .any(|delta| delta.category == "provider")
        );
    }

    #[test]
    fn unknown_domain_gets_no_provider_bonus() {
        let parsed = parsed("bob@unknownhost.example");
        let outcome = aggregate(&parsed, None, Some(&clean()), None);
        assert_eq!(outcome.score, 65);
        assert!(
            outcome
                .breakdown
                .iter()
                .all(|delta| delta.category != "provider")
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let parsed = parsed("alice@gmail.com");
        let routability = routable("gmail.com");
        let first = aggregate(&parsed, None, Some(&clean()), Some(&routability));
        let second = aggregate(&parsed, None, Some(&clean()), Some(&routability));
        assert_eq!(first, second);
    }

    #[test]
    fn tier_thresholds_are_exact() {
        assert_eq!(QualityTier::from_score(80), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(79), QualityTier::Good);
        assert_eq!(QualityTier::from_score(60), QualityTier::Good);
        assert_eq!(QualityTier::from_score(59), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(40), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(39), QualityTier::Poor);
        assert_eq!(QualityTier::from_score(0), QualityTier::Poor);
    }

    #[test]
    fn recommendation_threshold_is_sixty() {
        assert_eq!(Recommendation::from_score(60), Recommendation::Accept);
        assert_eq!(Recommendation::from_score(59), Recommendation::Review);
    }

    #[test]
    fn routability_timeout_counts_as_unroutable() {
        let parsed = parsed("bob@slowhost.example");
        let degraded = RoutabilityResult::unreachable(
            "slowhost.example",
            RoutabilityErrorKind::Timeout,
        );
        let outcome = aggregate(&parsed, None, None, Some(&degraded));
        // 50 - 15: the degraded signal still counts against the address.
        assert_eq!(outcome.score, 35);
        assert_eq!(outcome.quality_tier, QualityTier::Poor);
    }
}
