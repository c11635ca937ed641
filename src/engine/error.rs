use thiserror::Error;

/// Construction-time failures. Per-address problems never surface here;
/// they become typed results instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("resolver initialization failed")]
    ResolverInit {
        #[source]
        source: crate::mx::Error,
    },
    #[error("disposable rule set failed to load")]
    DisposableRules {
        #[source]
        source: crate::disposable::DisposableError,
    },
}

impl EngineError {
    pub(crate) fn resolver_init(source: crate::mx::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn disposable_rules(source: crate::disposable::DisposableError) -> Self {
        Self::DisposableRules { source }
    }
}
