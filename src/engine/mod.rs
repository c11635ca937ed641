//! Validation orchestrator.
//!
//! One flow per address: parse, correct the domain, run the network and
//! intelligence checks concurrently, aggregate, cache. Per-address
//! failures become typed results; nothing short of construction ever
//! returns an error to the caller, and a bad address never aborts a
//! batch.

mod error;
mod options;
mod types;

pub use error::EngineError;
pub use options::{EngineConfig, ValidationOptions};
pub use types::{EngineStats, IssueKind, Signals, ValidationIssue, ValidationResult};

use std::time::{Instant, SystemTime};

use futures_util::future::join_all;
use trust_dns_resolver::TokioAsyncResolver;

use crate::cache::TtlCache;
use crate::corrector::DomainCorrector;
use crate::disposable::{DisposableDetector, RiskTier};
use crate::mx::{LookupMx, RoutabilityChecker, RoutabilityErrorKind, RoutabilityResult};
use crate::parser::{self, ParsedAddress};
use crate::scoring;

pub struct Engine<R = TokioAsyncResolver> {
    corrector: DomainCorrector,
    disposable: DisposableDetector,
    routability: RoutabilityChecker<R>,
    results: TtlCache<ValidationResult>,
}

impl Engine {
    /// Builds an engine over the system resolver configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let routability =
            RoutabilityChecker::from_system_conf(config.routability_ttl(), config.dns_timeout())
                .map_err(EngineError::resolver_init)?;
        Self::with_checker(routability, &config)
    }
}

impl<R: LookupMx> Engine<R> {
    pub(crate) fn with_checker(
        routability: RoutabilityChecker<R>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let disposable = DisposableDetector::new().map_err(EngineError::disposable_rules)?;
        Ok(Self {
            corrector: DomainCorrector::new(),
            disposable,
            routability,
            results: TtlCache::new(config.result_cache_capacity, config.result_cache_ttl()),
        })
    }

    /// Validates one address. Total at the call site: malformed input
    /// yields an invalid result carrying the issue, never an error.
    pub async fn validate(&self, address: &str, options: &ValidationOptions) -> ValidationResult {
        let started = Instant::now();

        let parsed = match parser::parse_address(address) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(address, error = %err, "address failed to parse");
                return ValidationResult::invalid(
                    address,
                    ValidationIssue::malformed(err.to_string()),
                    started.elapsed(),
                );
            }
        };

        // Keyed by the normalized address, so casing and whitespace
        // variants of the same mailbox share one entry.
        if options.use_cache {
            if let Some(mut hit) = self.results.get(&parsed.full).await {
                tracing::debug!(address = parsed.full.as_str(), "served from result cache");
                hit.served_from_cache = true;
                return hit;
            }
        }

        let result = self.run_checks(&parsed, options, started).await;
        if options.use_cache {
            self.results.insert(parsed.full.clone(), result.clone()).await;
        }
        result
    }

    /// Validates a batch in fixed-size chunks. Chunks run sequentially;
    /// addresses within a chunk run concurrently. Output order equals
    /// input order, one result per input.
    pub async fn validate_batch<S: AsRef<str>>(
        &self,
        addresses: &[S],
        options: &ValidationOptions,
    ) -> Vec<ValidationResult> {
        let mut results = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(options.chunk_size()) {
            let in_flight = chunk
                .iter()
                .map(|address| self.validate(address.as_ref(), options));
            results.extend(join_all(in_flight).await);
        }
        results
    }

    /// Units a batch will consume; quota callers pre-authorize with this
    /// before submitting.
    pub fn batch_cost<S: AsRef<str>>(&self, addresses: &[S]) -> usize {
        addresses.len()
    }

    pub async fn stats(&self) -> EngineStats {
        EngineStats {
            cache_size: self.results.len().await,
            disposable_rule_count: self.disposable.rule_count(),
            correction_rule_count: self.corrector.rule_count(),
        }
    }

    async fn run_checks(
        &self,
        parsed: &ParsedAddress,
        options: &ValidationOptions,
        started: Instant,
    ) -> ValidationResult {
        let correction = self.corrector.correct_domain(&parsed.domain);
        // Both checks see the domain the correction settled on, so a typo
        // does not drag an otherwise fine mailbox down.
        let domain = correction.effective_domain().to_string();

        let routability_check = async {
            if !options.check_routability {
                return None;
            }
            match self.routability.check(&domain).await {
                Ok(result) => Some(result),
                Err(err) => {
                    tracing::warn!(domain = domain.as_str(), error = %err, "routability check unusable");
                    Some(RoutabilityResult::unreachable(
                        &domain,
                        RoutabilityErrorKind::ResolutionFailed,
                    ))
                }
            }
        };
        let disposable_check = async {
            options
                .check_disposable
                .then(|| self.disposable.check(&domain, &parsed.local))
        };
        let (routability, disposable) = tokio::join!(routability_check, disposable_check);

        let outcome = scoring::aggregate(
            parsed,
            Some(&correction),
            disposable.as_ref(),
            routability.as_ref(),
        );
        let risk_tier = disposable
            .as_ref()
            .map(|check| check.risk_tier)
            .unwrap_or(RiskTier::Low);

        ValidationResult {
            address: parsed.full.clone(),
            is_valid: true,
            score: outcome.score,
            quality_tier: outcome.quality_tier,
            recommendation: outcome.recommendation,
            risk_tier,
            signals: Signals {
                correction: Some(correction),
                disposable,
                routability,
            },
            breakdown: outcome.breakdown,
            error: None,
            took_millis: started.elapsed().as_millis() as u64,
            computed_at: SystemTime::now(),
            served_from_cache: false,
        }
    }
}
