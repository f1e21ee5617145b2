/// Point-in-time copy of [`ScoredMetrics`](crate::metrics::metrics_impl::ScoredMetrics).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64, // entries scored across all eviction scans
    pub tie_breaks_access_count: u64,
    pub tie_breaks_insertion_sequence: u64,

    pub context_updates: u64,
    pub clears: u64,

    pub score_query_calls: u64,
    pub score_query_found: u64,
    pub peek_victim_calls: u64,
    pub peek_victim_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl ScoredMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any `get`.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Mean number of entries scored per eviction.
    pub fn mean_scan_len(&self) -> f64 {
        if self.evict_calls == 0 {
            0.0
        } else {
            self.evict_scan_steps as f64 / self.evict_calls as f64
        }
    }
}
