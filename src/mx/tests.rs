use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use super::resolver;
use super::{Error, MxHost, RoutabilityChecker, RoutabilityErrorKind};

type LookupResult = Result<Vec<MxHost>, ResolveError>;
type LookupFn = dyn Fn(&str) -> LookupResult + Send + Sync;

pub(crate) struct StubResolver {
    pub(crate) on_lookup: Box<LookupFn>,
    pub(crate) delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + Send + Sync + 'static,
    {
        Self {
            on_lookup: Box::new(f),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes every lookup sleep first, for timeout tests.
    pub(crate) fn delayed_by(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Clone of the call counter, kept by tests after the stub moves
    /// into a checker.
    pub(crate) fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub(crate) fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn checker(stub: StubResolver) -> RoutabilityChecker<StubResolver> {
    RoutabilityChecker::with_resolver(stub, Duration::from_secs(3600), Duration::from_secs(5))
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("empty domain should fail");
    assert!(matches!(err, Error::EmptyDomain));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}

#[tokio::test]
async fn routable_domain_sorts_and_dedups_exchanges() {
    let checker = checker(StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxHost::new(20, "mx2.example.com"),
            MxHost::new(10, "mx1.example.com"),
            MxHost::new(10, "mx1.example.com"),
            MxHost::new(30, "mx3.example.com"),
        ])
    }));

    let result = checker.check("example.com").await.expect("lookup succeeds");
    assert!(result.routable);
    assert_eq!(result.score, 80);
    assert_eq!(result.error_kind, RoutabilityErrorKind::None);
    assert_eq!(result.mail_exchanges.len(), 3);
    assert_eq!(result.mail_exchanges[0].priority, 10);
    assert_eq!(result.mail_exchanges[0].hostname, "mx1.example.com");
    assert_eq!(result.best_exchange().map(|mx| mx.priority), Some(10));
}

#[tokio::test]
async fn empty_answer_is_not_routable() {
    let checker = checker(StubResolver::new(|_| Ok(Vec::new())));

    let result = checker.check("example.com").await.expect("lookup succeeds");
    assert!(!result.routable);
    assert_eq!(result.score, 20);
    assert_eq!(result.error_kind, RoutabilityErrorKind::NoRecords);
    assert!(result.mail_exchanges.is_empty());
}

#[tokio::test]
async fn resolver_timeout_kind_degrades_to_low_score() {
    let checker = checker(StubResolver::new(|_| {
        Err(ResolveErrorKind::Timeout.into())
    }));

    let result = checker.check("example.com").await.expect("degrades, not errors");
    assert!(!result.routable);
    assert_eq!(result.score, 10);
    assert_eq!(result.error_kind, RoutabilityErrorKind::Timeout);
}

#[tokio::test]
async fn lookup_failure_degrades_to_low_score() {
    let checker = checker(StubResolver::new(|_| {
        Err(ResolveErrorKind::Message("connection refused").into())
    }));

    let result = checker.check("example.com").await.expect("degrades, not errors");
    assert!(!result.routable);
    assert_eq!(result.score, 10);
    assert_eq!(result.error_kind, RoutabilityErrorKind::ResolutionFailed);
}

#[tokio::test(start_paused = true)]
async fn slow_lookup_hits_the_local_timeout() {
    let stub = StubResolver::new(|_| Ok(vec![MxHost::new(10, "mx.example.com")]))
        .delayed_by(Duration::from_secs(30));
    let checker = checker(stub);

    let result = checker.check("example.com").await.expect("degrades, not errors");
    assert_eq!(result.score, 10);
    assert_eq!(result.error_kind, RoutabilityErrorKind::Timeout);
}

#[tokio::test]
async fn repeat_query_is_served_from_cache() {
    let stub = StubResolver::new(|_| Ok(vec![MxHost::new(10, "mx.example.com")]));
    let calls = stub.call_counter();
    let checker = checker(stub);

    let first = checker.check("example.com").await.expect("lookup succeeds");
    let second = checker.check("example.com").await.expect("cache hit");
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cached_answer_expires_after_ttl() {
    let stub = StubResolver::new(|_| Ok(vec![MxHost::new(10, "mx.example.com")]));
    let calls = stub.call_counter();
    let checker = checker(stub);

    checker.check("example.com").await.expect("lookup succeeds");
    tokio::time::advance(Duration::from_secs(3601)).await;
    checker.check("example.com").await.expect("fresh lookup");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn transport_failures_are_not_cached() {
    let stub = StubResolver::new(|_| Err(ResolveErrorKind::Message("flaky").into()));
    let calls = stub.call_counter();
    let checker = checker(stub);

    checker.check("example.com").await.expect("degrades, not errors");
    checker.check("example.com").await.expect("degrades, not errors");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_records_answers_are_cached() {
    let stub = StubResolver::new(|_| Ok(Vec::new()));
    let calls = stub.call_counter();
    let checker = checker(stub);

    checker.check("example.com").await.expect("lookup succeeds");
    checker.check("example.com").await.expect("cache hit");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unicode_domain_is_queried_in_punycode() {
    let checker = checker(StubResolver::new(|domain| {
        assert_eq!(domain, "xn--bcher-kva.example");
        Ok(vec![MxHost::new(10, "mx.example.com")])
    }));

    let result = checker.check("Bücher.example").await.expect("lookup succeeds");
    assert_eq!(result.domain, "xn--bcher-kva.example");
}

#[tokio::test]
async fn empty_domain_is_an_error() {
    let checker = checker(StubResolver::new(|_| Ok(Vec::new())));
    let err = checker.check("   ").await.expect_err("empty domain");
    assert!(matches!(err, Error::EmptyDomain));
}

#[tokio::test]
async fn cache_stats_reflect_usage() {
    let stub = StubResolver::new(|_| Ok(vec![MxHost::new(10, "mx.example.com")]));
    let checker = checker(stub);

    checker.check("example.com").await.expect("lookup succeeds");
    checker.check("example.com").await.expect("cache hit");

    let stats = checker.cache_stats().await;
    assert_eq!(stats.size, 1);
    assert_eq!(stats.hits, 1);
}
