use thiserror::Error;

/// Failures that prevent a probe from starting. Once a dialogue is under
/// way, problems degrade into the report's verdict instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("address cannot be probed")]
    InvalidAddress {
        #[source]
        source: crate::parser::ParseError,
    },
    #[error("domain IDNA conversion failed")]
    Idna {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl ProbeError {
    pub(crate) fn invalid_address(source: crate::parser::ParseError) -> Self {
        Self::InvalidAddress { source }
    }

    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::Idna { source }
    }

    pub(crate) fn resolver_init(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }
}

/// Per-host dialogue failures, absorbed into the transcript by the host
/// loop.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("step timed out")]
    Timeout,
    #[error("protocol error: {0}")]
    Protocol(String),
}
