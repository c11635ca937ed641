use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use super::{Error, MxHost};

/// Trims and IDNA-encodes a domain for DNS queries.
pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

/// An authoritative empty answer, as opposed to a failed lookup.
pub(crate) fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, ResolveError>;
}

impl LookupMx for TokioAsyncResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, ResolveError> {
        let lookup = TokioAsyncResolver::mx_lookup(self, domain).await?;
        let mut hosts = Vec::new();
        for mx in lookup.iter() {
            let hostname = normalize_exchange(mx.exchange().to_utf8());
            hosts.push(MxHost::new(mx.preference(), hostname));
        }
        Ok(hosts)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxHost>, ResolveError> {
        self.record_call();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.on_lookup)(domain)
    }
}
