use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Per-call toggles for [`Engine::validate`] and
/// [`Engine::validate_batch`].
///
/// [`Engine::validate`]: crate::engine::Engine::validate
/// [`Engine::validate_batch`]: crate::engine::Engine::validate_batch
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Resolve MX records for the (corrected) domain.
    pub check_routability: bool,
    /// Run the disposable-address check.
    pub check_disposable: bool,
    /// Serve repeat addresses from the result cache.
    pub use_cache: bool,
    /// Addresses validated concurrently within one batch chunk.
    pub batch_concurrency: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_routability: true,
            check_disposable: true,
            use_cache: true,
            batch_concurrency: 10,
        }
    }
}

impl ValidationOptions {
    /// Chunk width for batch fan-out, never below 1.
    pub(crate) fn chunk_size(&self) -> usize {
        self.batch_concurrency.max(1)
    }
}

/// Construction-time knobs for [`Engine::new`].
///
/// [`Engine::new`]: crate::engine::Engine::new
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deadline for one MX lookup, in milliseconds.
    pub dns_timeout_ms: u64,
    /// How long a domain's MX answer stays cached.
    pub routability_ttl_secs: u64,
    /// Bound on cached validation results.
    pub result_cache_capacity: usize,
    /// How long a cached validation result stays fresh.
    pub result_cache_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dns_timeout_ms: 5_000,
            routability_ttl_secs: 3_600,
            result_cache_capacity: 10_000,
            result_cache_ttl_secs: 600,
        }
    }
}

impl EngineConfig {
    pub(crate) fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    pub(crate) fn routability_ttl(&self) -> Duration {
        Duration::from_secs(self.routability_ttl_secs)
    }

    pub(crate) fn result_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.result_cache_ttl_secs)
    }
}
