//! # Context-Scored Cache
//!
//! A bounded cache that evicts the entry with the lowest weighted composite
//! score instead of the least recent or least frequent one.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                         ScoredCache<K, V>                                │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  entries: FxHashMap<K, CacheEntry<V>>                              │ │
//!   │   │                                                                    │ │
//!   │   │  ┌──────┬─────────┬───────┬───────────┬──────────┬──────────────┐  │ │
//!   │   │  │ Key  │ Value   │ Count │ Last t    │ Last loc │ Insert seq   │  │ │
//!   │   │  ├──────┼─────────┼───────┼───────────┼──────────┼──────────────┤  │ │
//!   │   │  │ "A"  │ "Apple" │   3   │   9.0     │ (0, 0)   │      0       │  │ │
//!   │   │  │ "B"  │ "Banana"│   1   │   9.0     │ (0, 0)   │      1       │  │ │
//!   │   │  └──────┴─────────┴───────┴───────────┴──────────┴──────────────┘  │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   weights: ScoreWeights (α β γ δ ε)     providers: ContextProviders      │
//!   │   capacity: usize                       next_sequence: u64               │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Flow
//!
//! ```text
//!   put(key, value, t, loc)
//!     │
//!     ├── key resident? ──yes──► update value, count += 1, time/loc = (t, loc)
//!     │                          (never evicts, never grows)
//!     │
//!     └── no ──► len == capacity? ──yes──► select_victim(t, loc), remove it
//!                       │                        │
//!                       ▼                        ▼
//!                 insert new entry: count = 1, seq = next_sequence++
//!
//!   get(key, t, loc)
//!     ├── hit  ──► count += 1, time/loc = (t, loc), return &value
//!     └── miss ──► None, nothing changes
//! ```
//!
//! ## Core Operations
//!
//! | Method                    | Complexity | Description                              |
//! |---------------------------|------------|------------------------------------------|
//! | `new(capacity, weights)`  | O(1)       | Create cache; zero capacity is an error  |
//! | `put(k, v, t, loc)`       | O(1) / O(n)| O(n) only when a new key evicts          |
//! | `get(&k, t, loc)`         | O(1)       | Hit records an access                    |
//! | `peek(&k)`                | O(1)       | Read without recording an access         |
//! | `score_of(&k, t, loc)`    | O(1)       | Score an entry under a context           |
//! | `peek_victim(t, loc)`     | O(n)       | Which key would be evicted now           |
//! | `set_context_functions`   | O(1)       | Replace any subset of the providers      |
//! | `clear()`                 | O(n)       | Remove all entries                       |
//!
//! ## Example Usage
//!
//! ```
//! use scorecache::entry::Location;
//! use scorecache::policy::scored::ScoredCache;
//! use scorecache::weights::ScoreWeights;
//!
//! let weights = ScoreWeights::frequency_recency(1.0, 1.0).unwrap();
//! let mut cache = ScoredCache::new(2, weights).unwrap();
//! let here = Location::ORIGIN;
//!
//! cache.put("A", "Apple", 9.0, here);
//! cache.put("B", "Banana", 9.0, here);
//!
//! // Both score 1 + 1/2 at t = 10; A was inserted first and is evicted.
//! let evicted = cache.put("C", "Cherry", 10.0, here);
//! assert_eq!(evicted, Some(("A", "Apple")));
//!
//! assert_eq!(cache.get(&"A", 10.0, here), None);
//! assert_eq!(cache.get(&"B", 10.0, here), Some(&"Banana"));
//! assert_eq!(cache.access_count(&"B"), Some(2));
//! ```
//!
//! ## Thread Safety
//!
//! - [`ScoredCache`] is not thread-safe; callers serialize access.
//! - With the `concurrency` feature, [`ConcurrentScoredCache`] serializes
//!   every operation through one `parking_lot::RwLock`.
//!
//! ## Implementation Notes
//!
//! - Context providers run once per resident entry per eviction.
//! - `insertion_sequence` comes from a per-cache counter that keeps counting
//!   across `clear()`, so sequences are never reused.
//! - `put` never walks the store unless it has to evict; the full invariant
//!   check is `check_invariants()`, which tests call explicitly.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::{ContextProviders, ContextSignal, LocationWeight, TimeWeight};
use crate::entry::{CacheEntry, Location, Timestamp};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::eviction::TieBreak;
use crate::eviction::select_victim;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ScoredMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ScoredMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsSnapshotProvider, ScoredMetricsReadRecorder,
    ScoredMetricsRecorder,
};
use crate::score::{ScoreBreakdown, ScoreCalculator};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{ContextualCache, ReadOnlyCache};
use crate::weights::ScoreWeights;

/// Bounded cache evicting the lowest-scored entry.
///
/// See the module-level documentation for details.
pub struct ScoredCache<K, V> {
    entries: FxHashMap<K, CacheEntry<V>>,
    capacity: usize,
    weights: ScoreWeights,
    providers: ContextProviders,
    next_sequence: u64,
    #[cfg(feature = "metrics")]
    metrics: ScoredMetrics,
}

impl<K, V> ScoredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with neutral context providers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use scorecache::policy::scored::ScoredCache;
    /// use scorecache::weights::ScoreWeights;
    ///
    /// let cache: ScoredCache<u64, String> = ScoredCache::new(100, ScoreWeights::default()).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize, weights: ScoreWeights) -> Result<Self, ConfigError> {
        Self::with_providers(capacity, weights, ContextProviders::default())
    }

    /// Creates a cache from a capacity and the five raw coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero or any weight is NaN or
    /// infinite.
    pub fn with_weights(
        capacity: usize,
        alpha: f64,
        beta: f64,
        gamma: f64,
        delta: f64,
        epsilon: f64,
    ) -> Result<Self, ConfigError> {
        let weights = ScoreWeights::try_new(alpha, beta, gamma, delta, epsilon)?;
        Self::new(capacity, weights)
    }

    /// Creates a cache with the given context providers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn with_providers(
        capacity: usize,
        weights: ScoreWeights,
        providers: ContextProviders,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }

        tracing::trace!(
            capacity,
            alpha = weights.alpha(),
            beta = weights.beta(),
            gamma = weights.gamma(),
            delta = weights.delta(),
            epsilon = weights.epsilon(),
            "created scored cache"
        );

        Ok(Self {
            entries: FxHashMap::default(),
            capacity,
            weights,
            providers,
            next_sequence: 0,
            #[cfg(feature = "metrics")]
            metrics: ScoredMetrics::default(),
        })
    }

    /// Inserts or updates `key` under the context `(t, loc)`.
    ///
    /// - Resident key: value replaced, access count incremented, time and
    ///   location recorded. Never evicts.
    /// - New key with room: inserted with access count 1.
    /// - New key at capacity: the lowest-scored entry under `(t, loc)` is
    ///   evicted first and returned.
    pub fn put(&mut self, key: K, value: V, t: Timestamp, loc: Location) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.update(value, t, loc);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            match self.evict(t, loc) {
                Ok(victim) => Some(victim),
                Err(err) => {
                    tracing::error!(error = %err, capacity = self.capacity, "eviction found no victim");
                    return None;
                },
            }
        } else {
            None
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries
            .insert(key, CacheEntry::new(value, t, loc, sequence));

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        debug_assert!(self.entries.len() <= self.capacity);

        evicted
    }

    /// Looks up `key`, recording an access at `(t, loc)` on a hit.
    ///
    /// A miss returns `None` and mutates nothing.
    pub fn get(&mut self, key: &K, t: Timestamp, loc: Location) -> Option<&V> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(t, loc);

                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();

                Some(entry.value())
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();

                None
            },
        }
    }

    /// Reads a value without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(CacheEntry::value)
    }

    /// Returns the metadata of a resident entry.
    pub fn entry(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Returns how many times `key` has been put or hit since insertion.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(CacheEntry::access_count)
    }

    /// Checks if a key is resident without recording an access.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the configured score coefficients.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Returns the configured context providers.
    pub fn providers(&self) -> &ContextProviders {
        &self.providers
    }

    /// Iterates resident keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates resident entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> {
        self.entries.iter()
    }

    /// Replaces any subset of the three context strategies.
    ///
    /// `None` keeps the strategy currently configured (the neutral default if
    /// it was never set).
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use scorecache::entry::Location;
    /// use scorecache::policy::scored::ScoredCache;
    /// use scorecache::weights::ScoreWeights;
    ///
    /// let mut cache: ScoredCache<&str, i32> =
    ///     ScoredCache::with_weights(4, 0.0, 0.0, 0.0, 1.0, 0.0).unwrap();
    /// cache.put("k", 1, 9.0, Location::ORIGIN);
    ///
    /// cache.set_context_functions(
    ///     None,
    ///     Some(Arc::new(|t: f64| if (8.0..=10.0).contains(&t) { 2.0 } else { 0.5 })),
    ///     None,
    /// );
    /// assert_eq!(cache.score_of(&"k", 9.0, Location::ORIGIN), Some(2.0));
    /// ```
    pub fn set_context_functions(
        &mut self,
        context: Option<Arc<dyn ContextSignal>>,
        time: Option<Arc<dyn TimeWeight>>,
        location: Option<Arc<dyn LocationWeight>>,
    ) {
        tracing::trace!(
            context = context.is_some(),
            time = time.is_some(),
            location = location.is_some(),
            "replacing context providers"
        );
        self.providers.replace(context, time, location);

        #[cfg(feature = "metrics")]
        self.metrics.record_context_update();
    }

    /// Replaces the context signal.
    pub fn set_context_signal(&mut self, provider: impl ContextSignal + 'static) {
        self.set_context_functions(Some(Arc::new(provider)), None, None);
    }

    /// Replaces the time weight.
    pub fn set_time_weight(&mut self, provider: impl TimeWeight + 'static) {
        self.set_context_functions(None, Some(Arc::new(provider)), None);
    }

    /// Replaces the location weight.
    pub fn set_location_weight(&mut self, provider: impl LocationWeight + 'static) {
        self.set_context_functions(None, None, Some(Arc::new(provider)));
    }

    /// Scores a resident entry under `(t, loc)` without mutating it.
    pub fn score_of(&self, key: &K, t: Timestamp, loc: Location) -> Option<f64> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_score_query_call();

        let entry = self.entries.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_score_query_found();

        Some(self.calculator().score(entry, t, loc))
    }

    /// Per-term score contributions of a resident entry under `(t, loc)`.
    pub fn score_breakdown(&self, key: &K, t: Timestamp, loc: Location) -> Option<ScoreBreakdown> {
        let entry = self.entries.get(key)?;
        Some(self.calculator().breakdown(entry, t, loc))
    }

    /// Returns the key that would be evicted by a new insertion at `(t, loc)`.
    ///
    /// Returns `None` for an empty cache. Runs the same scan as eviction.
    pub fn peek_victim(&self, t: Timestamp, loc: Location) -> Option<&K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_victim_call();

        let calc = self.calculator();
        let victim = select_victim(&self.entries, &calc, t, loc).ok()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_victim_found();

        Some(victim.key)
    }

    /// Removes all entries. Weights, providers and the sequence counter are kept.
    pub fn clear(&mut self) {
        tracing::trace!(dropped = self.entries.len(), "clearing scored cache");
        self.entries.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Verifies the structural invariants.
    ///
    /// - `len <= capacity`
    /// - every resident entry has `access_count >= 1`
    /// - insertion sequences are unique and below the next sequence
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }

        let mut sequences =
            FxHashSet::with_capacity_and_hasher(self.entries.len(), Default::default());
        for entry in self.entries.values() {
            if entry.access_count() == 0 {
                return Err(InvariantError::new("resident entry with zero access count"));
            }
            let seq = entry.insertion_sequence();
            if seq >= self.next_sequence {
                return Err(InvariantError::new(format!(
                    "insertion sequence {seq} not below next sequence {}",
                    self.next_sequence
                )));
            }
            if !sequences.insert(seq) {
                return Err(InvariantError::new(format!(
                    "duplicate insertion sequence {seq}"
                )));
            }
        }

        Ok(())
    }

    #[cfg(debug_assertions)]
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("scored cache invariant violated: {err}");
        }
    }

    fn calculator(&self) -> ScoreCalculator<'_> {
        ScoreCalculator::new(&self.weights, &self.providers)
    }

    /// Scores every entry under `(t, loc)` and removes the minimum.
    ///
    /// Leaves the store untouched on error.
    fn evict(&mut self, t: Timestamp, loc: Location) -> Result<(K, V), InvariantError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let calc = ScoreCalculator::new(&self.weights, &self.providers);
        let victim = select_victim(&self.entries, &calc, t, loc)?;

        let key = victim.key.clone();
        let rank = victim.rank;
        let tie_break = victim.tie_break;
        let scanned = victim.scanned;

        tracing::debug!(
            score = rank.score,
            access_count = rank.access_count,
            insertion_sequence = rank.insertion_sequence,
            tie_break = ?tie_break,
            scanned,
            t,
            "evicting lowest-scored entry"
        );

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_scan_steps(scanned as u64);
            match tie_break {
                TieBreak::None => {},
                TieBreak::AccessCount => self.metrics.record_tie_break_access_count(),
                TieBreak::InsertionSequence => {
                    self.metrics.record_tie_break_insertion_sequence()
                },
            }
        }
        let (key, entry) = self
            .entries
            .remove_entry(&key)
            .ok_or_else(|| InvariantError::new("selected victim is not resident"))?;

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Ok((key, entry.into_value()))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ScoredCache<K, V> {
    /// Returns the live metrics counters.
    pub fn metrics(&self) -> &ScoredMetrics {
        &self.metrics
    }

    /// Resets all metrics counters to zero.
    pub fn reset_metrics(&mut self) {
        self.metrics = ScoredMetrics::default();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ScoredMetricsSnapshot> for ScoredCache<K, V> {
    fn snapshot(&self) -> ScoredMetricsSnapshot {
        self.metrics.snapshot(self.entries.len(), self.capacity)
    }
}

impl<K, V> ReadOnlyCache<K> for ScoredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        ScoredCache::contains(self, key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> ContextualCache<K, V> for ScoredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V, t: Timestamp, loc: Location) -> Option<(K, V)> {
        ScoredCache::put(self, key, value, t, loc)
    }

    fn get(&mut self, key: &K, t: Timestamp, loc: Location) -> Option<&V> {
        ScoredCache::get(self, key, t, loc)
    }

    fn clear(&mut self) {
        ScoredCache::clear(self)
    }
}

impl<K, V> fmt::Debug for ScoredCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoredCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("weights", &self.weights)
            .field("next_sequence", &self.next_sequence)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentScoredCache
// ---------------------------------------------------------------------------

/// Thread-safe wrapper serializing a [`ScoredCache`] behind one `RwLock`.
///
/// `put`, `get` and context changes take the write lock (a hit mutates access
/// metadata); read-only queries share the read lock. Values are returned by
/// clone.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use std::sync::Arc;
/// use std::thread;
///
/// use scorecache::entry::Location;
/// use scorecache::policy::scored::ConcurrentScoredCache;
/// use scorecache::weights::ScoreWeights;
///
/// let cache = Arc::new(ConcurrentScoredCache::new(64, ScoreWeights::default()).unwrap());
/// let handles: Vec<_> = (0..4u64)
///     .map(|i| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             cache.put(i, i * 10, i as f64, Location::ORIGIN);
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(cache.len(), 4);
/// # }
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentScoredCache<K, V> {
    inner: RwLock<ScoredCache<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentScoredCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache with neutral context providers.
    pub fn new(capacity: usize, weights: ScoreWeights) -> Result<Self, ConfigError> {
        Ok(Self::from_cache(ScoredCache::new(capacity, weights)?))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: ScoredCache<K, V>) -> Self {
        Self {
            inner: RwLock::new(cache),
        }
    }

    /// See [`ScoredCache::put`].
    pub fn put(&self, key: K, value: V, t: Timestamp, loc: Location) -> Option<(K, V)> {
        self.inner.write().put(key, value, t, loc)
    }

    /// See [`ScoredCache::get`]; returns a clone of the value.
    pub fn get(&self, key: &K, t: Timestamp, loc: Location) -> Option<V>
    where
        V: Clone,
    {
        self.inner.write().get(key, t, loc).cloned()
    }

    /// See [`ScoredCache::peek`]; returns a clone of the value.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    /// See [`ScoredCache::access_count`].
    pub fn access_count(&self, key: &K) -> Option<u64> {
        self.inner.read().access_count(key)
    }

    /// See [`ScoredCache::score_of`].
    pub fn score_of(&self, key: &K, t: Timestamp, loc: Location) -> Option<f64> {
        self.inner.read().score_of(key, t, loc)
    }

    /// See [`ScoredCache::peek_victim`]; returns a clone of the key.
    pub fn peek_victim(&self, t: Timestamp, loc: Location) -> Option<K> {
        self.inner.read().peek_victim(t, loc).cloned()
    }

    /// See [`ScoredCache::set_context_functions`].
    pub fn set_context_functions(
        &self,
        context: Option<Arc<dyn ContextSignal>>,
        time: Option<Arc<dyn TimeWeight>>,
        location: Option<Arc<dyn LocationWeight>>,
    ) {
        self.inner
            .write()
            .set_context_functions(context, time, location);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Verifies invariants under the read lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> ScoredCache<K, V> {
        self.inner.into_inner()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V> MetricsSnapshotProvider<ScoredMetricsSnapshot> for ConcurrentScoredCache<K, V> {
    fn snapshot(&self) -> ScoredMetricsSnapshot {
        self.inner.read().snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentScoredCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentScoredCache<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentScoredCache")
            .field("inner", &*self.inner.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Location = Location::ORIGIN;

    fn fr_cache(capacity: usize) -> ScoredCache<&'static str, &'static str> {
        ScoredCache::new(capacity, ScoreWeights::frequency_recency(1.0, 1.0).unwrap()).unwrap()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ScoredCache::<u32, u32>::new(0, ScoreWeights::default()).unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn with_weights_rejects_non_finite() {
        assert!(ScoredCache::<u32, u32>::with_weights(2, 1.0, f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(ScoredCache::<u32, u32>::with_weights(2, 1.0, 1.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = fr_cache(3);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut cache = fr_cache(2);
        assert_eq!(cache.put("k", "v", 1.0, HERE), None);
        assert_eq!(cache.get(&"k", 1.0, HERE), Some(&"v"));
    }

    #[test]
    fn miss_does_not_mutate() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        assert_eq!(cache.get(&"zzz", 5.0, HERE), None);
        assert_eq!(cache.len(), 1);
        let e = cache.entry(&"a").unwrap();
        assert_eq!(e.access_count(), 1);
        assert_eq!(e.last_access_time(), 0.0);
    }

    #[test]
    fn get_hit_records_access() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        cache.get(&"a", 4.0, Location::new(1.0, 2.0));

        let e = cache.entry(&"a").unwrap();
        assert_eq!(e.access_count(), 2);
        assert_eq!(e.last_access_time(), 4.0);
        assert_eq!(e.last_location(), Location::new(1.0, 2.0));
    }

    #[test]
    fn update_does_not_grow_or_evict() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        cache.put("b", "2", 0.0, HERE);

        assert_eq!(cache.put("a", "one", 3.0, HERE), None);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"b"));
        assert_eq!(cache.peek(&"a"), Some(&"one"));
        assert_eq!(cache.access_count(&"a"), Some(2));
        #[cfg(debug_assertions)]
        cache.debug_validate_invariants();
    }

    #[test]
    fn update_keeps_insertion_sequence() {
        let mut cache = fr_cache(3);
        cache.put("a", "1", 0.0, HERE);
        cache.put("b", "2", 0.0, HERE);
        let seq = cache.entry(&"a").unwrap().insertion_sequence();

        cache.put("a", "3", 1.0, HERE);
        cache.get(&"a", 2.0, HERE);
        assert_eq!(cache.entry(&"a").unwrap().insertion_sequence(), seq);
    }

    #[test]
    fn peek_does_not_record_access() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        assert_eq!(cache.peek(&"a"), Some(&"1"));
        assert_eq!(cache.access_count(&"a"), Some(1));
    }

    #[test]
    fn equal_scores_evict_first_inserted() {
        let mut cache = fr_cache(2);
        cache.put("A", "Apple", 9.0, HERE);
        cache.put("B", "Banana", 9.0, HERE);

        assert_eq!(cache.score_of(&"A", 10.0, HERE), Some(1.5));
        assert_eq!(cache.score_of(&"B", 10.0, HERE), Some(1.5));
        assert_eq!(cache.peek_victim(10.0, HERE), Some(&"A"));

        assert_eq!(cache.put("C", "Cherry", 10.0, HERE), Some(("A", "Apple")));
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get(&"A", 10.0, HERE), None);
        assert_eq!(cache.get(&"B", 10.0, HERE), Some(&"Banana"));
        assert_eq!(cache.access_count(&"B"), Some(2));
    }

    #[test]
    fn frequent_entry_survives() {
        let mut cache = fr_cache(2);
        cache.put("hot", "h", 0.0, HERE);
        cache.put("cold", "c", 0.0, HERE);
        for t in 1..5 {
            cache.get(&"hot", t as f64, HERE);
        }

        assert_eq!(cache.put("new", "n", 5.0, HERE), Some(("cold", "c")));
        assert!(cache.contains(&"hot"));
    }

    #[test]
    fn recent_entry_survives_equal_frequency() {
        let mut cache = fr_cache(2);
        cache.put("old", "o", 0.0, HERE);
        cache.put("recent", "r", 8.0, HERE);

        // old: 1 + 1/11, recent: 1 + 1/3
        assert_eq!(cache.put("new", "n", 10.0, HERE), Some(("old", "o")));
    }

    #[test]
    fn equal_score_prefers_evicting_fewer_accesses() {
        // Only the context term is weighted: every score is equal.
        let mut cache: ScoredCache<u32, u32> =
            ScoredCache::with_weights(3, 0.0, 0.0, 1.0, 0.0, 0.0).unwrap();
        cache.put(1, 1, 0.0, HERE);
        cache.put(2, 2, 0.0, HERE);
        cache.put(3, 3, 0.0, HERE);
        cache.get(&1, 0.0, HERE);
        cache.get(&3, 0.0, HERE);

        assert_eq!(cache.put(4, 4, 1.0, HERE), Some((2, 2)));
    }

    #[test]
    fn context_signal_shifts_scores_uniformly() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        cache.put("b", "2", 5.0, HERE);
        let before = cache.peek_victim(6.0, HERE).copied();

        let mut shifted: ScoredCache<&str, &str> =
            ScoredCache::with_weights(2, 1.0, 1.0, 100.0, 0.0, 0.0).unwrap();
        shifted.set_context_signal(|| 42.0);
        shifted.put("a", "1", 0.0, HERE);
        shifted.put("b", "2", 5.0, HERE);

        assert_eq!(shifted.peek_victim(6.0, HERE).copied(), before);
        assert_eq!(before, Some("a"));
    }

    #[test]
    fn set_context_functions_keeps_omitted() {
        let mut cache: ScoredCache<&str, i32> =
            ScoredCache::with_weights(2, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
        cache.put("k", 0, 0.0, HERE);
        assert_eq!(cache.score_of(&"k", 0.0, HERE), Some(3.0));

        cache.set_context_functions(None, Some(Arc::new(|_t: f64| 5.0)), None);
        assert_eq!(cache.score_of(&"k", 0.0, HERE), Some(7.0));

        cache.set_context_functions(Some(Arc::new(|| 0.0)), None, None);
        assert_eq!(cache.score_of(&"k", 0.0, HERE), Some(6.0));
    }

    #[test]
    fn score_breakdown_sums_to_score() {
        let mut cache: ScoredCache<&str, i32> =
            ScoredCache::with_weights(2, 2.0, 3.0, 1.0, 1.0, 1.0).unwrap();
        cache.put("k", 0, 0.0, HERE);
        let b = cache.score_breakdown(&"k", 1.0, HERE).unwrap();
        assert_eq!(b.frequency, 2.0);
        assert_eq!(b.recency, 1.5);
        assert_eq!(Some(b.total()), cache.score_of(&"k", 1.0, HERE));
        assert!(cache.score_breakdown(&"missing", 1.0, HERE).is_none());
    }

    #[test]
    fn clear_keeps_sequence_monotonic() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        cache.put("b", "2", 0.0, HERE);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek_victim(0.0, HERE), None);

        cache.put("c", "3", 0.0, HERE);
        assert_eq!(cache.entry(&"c").unwrap().insertion_sequence(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn capacity_one_always_replaces() {
        let mut cache = fr_cache(1);
        cache.put("a", "1", 0.0, HERE);
        assert_eq!(cache.put("b", "2", 1.0, HERE), Some(("a", "1")));
        assert_eq!(cache.put("c", "3", 2.0, HERE), Some(("b", "2")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn update_and_insert_do_not_revalidate_the_store() {
        let mut cache: ScoredCache<u32, u32> =
            ScoredCache::new(2_000, ScoreWeights::default()).unwrap();
        for i in 0..1_000 {
            cache.put(i, i, 0.0, HERE);
        }
        // Break a store-wide invariant that only a full walk can detect.
        cache.next_sequence = 0;
        assert!(cache.check_invariants().is_err());

        assert_eq!(cache.put(7, 70, 1.0, HERE), None);
        assert_eq!(cache.get(&7, 2.0, HERE), Some(&70));
        assert_eq!(cache.put(5_000, 1, 3.0, HERE), None);
        assert_eq!(cache.len(), 1_001);
    }

    #[test]
    fn failed_eviction_leaves_store_untouched() {
        let mut cache = fr_cache(1);
        let err = cache.evict(0.0, HERE).unwrap_err();
        assert!(err.message().contains("empty store"));

        // A zero capacity cannot be constructed; force it to reach the error path.
        cache.capacity = 0;
        assert_eq!(cache.put("k", "v", 0.0, HERE), None);
        assert!(cache.is_empty());
        assert_eq!(cache.next_sequence, 0);
    }

    #[test]
    fn evict_returns_lowest_scored_entry() {
        let mut cache = fr_cache(2);
        cache.put("old", "o", 0.0, HERE);
        cache.put("new", "n", 5.0, HERE);
        assert_eq!(cache.evict(5.0, HERE).unwrap(), ("old", "o"));
        assert_eq!(cache.len(), 1);
        #[cfg(debug_assertions)]
        cache.debug_validate_invariants();
    }

    #[test]
    fn keys_lists_residents() {
        let mut cache = fr_cache(3);
        cache.put("x", "1", 0.0, HERE);
        cache.put("y", "2", 0.0, HERE);
        let mut keys: Vec<_> = cache.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(cache.iter().count(), 2);
    }

    #[test]
    fn contextual_cache_trait_dispatch() {
        fn fill<C: ContextualCache<u32, u32>>(cache: &mut C) {
            for i in 0..5 {
                cache.put(i, i, i as f64, Location::ORIGIN);
            }
        }
        let mut cache: ScoredCache<u32, u32> = ScoredCache::new(3, ScoreWeights::default()).unwrap();
        fill(&mut cache);
        assert_eq!(ReadOnlyCache::len(&cache), 3);
        assert!(!ReadOnlyCache::is_empty(&cache));
        ContextualCache::clear(&mut cache);
        assert!(ReadOnlyCache::is_empty(&cache));
    }

    #[test]
    fn debug_format() {
        let mut cache = fr_cache(2);
        cache.put("a", "1", 0.0, HERE);
        let dbg = format!("{:?}", cache);
        assert!(dbg.contains("ScoredCache"));
        assert!(dbg.contains("capacity: 2"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_tie_breaks() {
        let mut cache = fr_cache(2);
        cache.put("A", "Apple", 9.0, HERE);
        cache.put("B", "Banana", 9.0, HERE);
        cache.put("C", "Cherry", 10.0, HERE);
        cache.get(&"A", 10.0, HERE);
        cache.get(&"B", 10.0, HERE);
        cache.put("B", "Blueberry", 11.0, HERE);

        let s = cache.snapshot();
        assert_eq!(s.insert_calls, 4);
        assert_eq!(s.insert_new, 3);
        assert_eq!(s.insert_updates, 1);
        assert_eq!(s.evict_calls, 1);
        assert_eq!(s.evicted_entries, 1);
        assert_eq!(s.evict_scan_steps, 2);
        assert_eq!(s.tie_breaks_insertion_sequence, 1);
        assert_eq!(s.get_hits, 1);
        assert_eq!(s.get_misses, 1);
        assert_eq!(s.cache_len, 2);

        let _ = cache.score_of(&"B", 11.0, HERE);
        assert_eq!(cache.snapshot().score_query_calls, 1);

        cache.reset_metrics();
        let s = cache.snapshot();
        assert_eq!(s.insert_calls, 0);
        assert_eq!(s.score_query_calls, 0);
        assert_eq!(s.cache_len, 2);
    }
}
