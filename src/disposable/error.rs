use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisposableError {
    /// A heuristic pattern failed to compile. Rules are compiled once at
    /// detector construction, so this surfaces before any check runs.
    #[error("invalid heuristic rule `{name}`")]
    InvalidRule {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The bundled domain list parsed down to zero usable entries.
    #[error("disposable domain list contains no usable entries")]
    EmptyDomainList,
}

impl DisposableError {
    pub(crate) fn invalid_rule(name: &'static str, source: regex::Error) -> Self {
        Self::InvalidRule { name, source }
    }
}
