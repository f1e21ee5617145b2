use std::sync::atomic::{AtomicU64, Ordering};

/// Counter that can be bumped through `&self`.
///
/// Used by read-only cache queries (`score_of`, `peek_victim`) that only
/// hold a shared reference. Relaxed atomics: counters are observational and
/// never order other memory.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
