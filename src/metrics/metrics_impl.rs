use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::ScoredMetricsSnapshot;
use crate::metrics::traits::{
    CoreMetricsRecorder, ScoredMetricsReadRecorder, ScoredMetricsRecorder,
};

/// Counters for [`ScoredCache`](crate::policy::scored::ScoredCache).
#[derive(Debug, Default)]
pub struct ScoredMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64,
    pub tie_breaks_access_count: u64,
    pub tie_breaks_insertion_sequence: u64,
    pub context_updates: u64,
    pub clears: u64,
    pub score_query_calls: MetricsCell,
    pub score_query_found: MetricsCell,
    pub peek_victim_calls: MetricsCell,
    pub peek_victim_found: MetricsCell,
}

impl ScoredMetrics {
    /// Copies the counters, adding gauges captured by the caller.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> ScoredMetricsSnapshot {
        ScoredMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            evict_scan_steps: self.evict_scan_steps,
            tie_breaks_access_count: self.tie_breaks_access_count,
            tie_breaks_insertion_sequence: self.tie_breaks_insertion_sequence,
            context_updates: self.context_updates,
            clears: self.clears,
            score_query_calls: self.score_query_calls.get(),
            score_query_found: self.score_query_found.get(),
            peek_victim_calls: self.peek_victim_calls.get(),
            peek_victim_found: self.peek_victim_found.get(),
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for ScoredMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ScoredMetricsRecorder for ScoredMetrics {
    fn record_evict_scan_steps(&mut self, steps: u64) {
        self.evict_scan_steps += steps;
    }
    fn record_tie_break_access_count(&mut self) {
        self.tie_breaks_access_count += 1;
    }
    fn record_tie_break_insertion_sequence(&mut self) {
        self.tie_breaks_insertion_sequence += 1;
    }
    fn record_context_update(&mut self) {
        self.context_updates += 1;
    }
}

impl ScoredMetricsReadRecorder for &ScoredMetrics {
    fn record_score_query_call(&self) {
        self.score_query_calls.incr();
    }
    fn record_score_query_found(&self) {
        self.score_query_found.incr();
    }
    fn record_peek_victim_call(&self) {
        self.peek_victim_calls.incr();
    }
    fn record_peek_victim_found(&self) {
        self.peek_victim_found.incr();
    }
}
