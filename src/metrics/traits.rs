//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* into small traits so
//! monitoring never leaks into eviction logic.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evict/clear                │
//!                 └──────────────┬──────────────┘
//!                                │
//!                                ▼
//!                 ┌─────────────────────────────┐     ┌──────────────────────────────┐
//!                 │    ScoredMetricsRecorder    │     │  ScoredMetricsReadRecorder   │
//!                 │  scan steps, tie-breaks,    │     │  (&self queries: score_of,   │
//!                 │  context updates            │     │   peek_victim)               │
//!                 └─────────────────────────────┘     └──────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics specific to score-based eviction.
pub trait ScoredMetricsRecorder: CoreMetricsRecorder {
    /// Entries scored during one eviction scan.
    fn record_evict_scan_steps(&mut self, steps: u64);
    /// Victim chosen by lower access count among equal scores.
    fn record_tie_break_access_count(&mut self);
    /// Victim chosen by older insertion among equal score and access count.
    fn record_tie_break_insertion_sequence(&mut self);
    /// One or more context providers replaced.
    fn record_context_update(&mut self);
}

/// Read-only scored-cache metrics for `&self` methods (interior mutability).
pub trait ScoredMetricsReadRecorder {
    fn record_score_query_call(&self);
    fn record_score_query_found(&self);
    fn record_peek_victim_call(&self);
    fn record_peek_victim_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
