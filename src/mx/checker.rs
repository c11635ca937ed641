use std::time::Duration;

use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::ResolveErrorKind;

use crate::cache::{CacheStats, TtlCache};
use crate::mx::resolver::{self, LookupMx, is_no_records};

use super::{Error, RoutabilityErrorKind, RoutabilityResult};

/// Distinct domains cached per process; oldest entries give way beyond this.
const CACHE_CAPACITY: usize = 4_096;

/// MX routability checks with a per-domain answer cache.
///
/// Answers — records, or an authoritative empty set — are cached for the
/// configured TTL. Transport failures are returned but never cached, so a
/// transient outage does not stick to a domain until the TTL runs out.
pub struct RoutabilityChecker<R = TokioAsyncResolver> {
    resolver: R,
    cache: TtlCache<RoutabilityResult>,
    timeout: Duration,
}

impl RoutabilityChecker {
    /// Builds a checker over the system resolver configuration.
    pub fn from_system_conf(cache_ttl: Duration, timeout: Duration) -> Result<Self, Error> {
        let resolver =
            TokioAsyncResolver::tokio_from_system_conf().map_err(Error::resolver_init)?;
        Ok(Self::with_resolver(resolver, cache_ttl, timeout))
    }
}

impl<R: LookupMx> RoutabilityChecker<R> {
    pub(crate) fn with_resolver(resolver: R, cache_ttl: Duration, timeout: Duration) -> Self {
        Self {
            resolver,
            cache: TtlCache::new(CACHE_CAPACITY, cache_ttl),
            timeout,
        }
    }

    /// Looks up `domain`, serving repeat queries from the cache. Lookup
    /// failures degrade to a low-score [`RoutabilityResult`] instead of
    /// erroring; only unusable input reaches the `Err` arm.
    pub async fn check(&self, domain: &str) -> Result<RoutabilityResult, Error> {
        let ascii = resolver::normalize_domain(domain)?;
        if let Some(cached) = self.cache.get(&ascii).await {
            return Ok(cached);
        }

        let result = self.lookup(&ascii).await;
        if !result.lookup_failed() {
            self.cache.insert(ascii, result.clone()).await;
        }
        Ok(result)
    }

    async fn lookup(&self, ascii: &str) -> RoutabilityResult {
        match tokio::time::timeout(self.timeout, self.resolver.lookup_mx(ascii)).await {
            Err(_) => {
                tracing::warn!(domain = ascii, "MX lookup timed out");
                RoutabilityResult::unreachable(ascii, RoutabilityErrorKind::Timeout)
            }
            Ok(Err(err)) if is_no_records(&err) => RoutabilityResult::no_records(ascii),
            Ok(Err(err)) if matches!(err.kind(), ResolveErrorKind::Timeout) => {
                tracing::warn!(domain = ascii, "resolver reported a timeout");
                RoutabilityResult::unreachable(ascii, RoutabilityErrorKind::Timeout)
            }
            Ok(Err(err)) => {
                tracing::warn!(domain = ascii, error = %err, "MX lookup failed");
                RoutabilityResult::unreachable(ascii, RoutabilityErrorKind::ResolutionFailed)
            }
            Ok(Ok(mut hosts)) => {
                hosts.sort();
                hosts.dedup();
                if hosts.is_empty() {
                    RoutabilityResult::no_records(ascii)
                } else {
                    RoutabilityResult::records(ascii, hosts)
                }
            }
        }
    }

    /// Occupancy and hit accounting for the answer cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
