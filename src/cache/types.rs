/// Snapshot of a cache's occupancy and hit accounting.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored entries, including expired ones not yet collected.
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}
