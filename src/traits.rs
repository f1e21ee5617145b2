//! # Cache Traits
//!
//! Trait surface for caches whose operations carry the caller's current
//! context (time `t` and location `loc`).
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            ReadOnlyCache<K>             │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │         ContextualCache<K, V>           │
//!   │                                         │
//!   │  put(&mut, K, V, t, loc) → evicted      │
//!   │  get(&mut, &K, t, loc) → Option<&V>     │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//!
//!   ConcurrentCache: marker (Send + Sync) for lock-wrapped implementations
//! ```
//!
//! ## Why `put`/`get` take context
//!
//! Eviction scores are computed against the context of the operation that
//! triggers them, and accesses record the time and location they happened
//! at. A context-free `insert(k, v)` would have to invent both.
//!
//! ## Thread Safety
//!
//! - [`ScoredCache`](crate::policy::scored::ScoredCache) is **NOT** thread-safe;
//!   callers serialize `put`/`get`/`set_context_functions` themselves.
//! - With the `concurrency` feature,
//!   `ConcurrentScoredCache` wraps it in a single `RwLock` and implements
//!   [`ConcurrentCache`].

use crate::entry::{Location, Timestamp};

/// Read-only queries that never touch access metadata.
pub trait ReadOnlyCache<K> {
    /// Checks if a key is resident without counting an access.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;
}

/// Context-carrying cache operations.
///
/// # Example
///
/// ```
/// use scorecache::entry::Location;
/// use scorecache::policy::scored::ScoredCache;
/// use scorecache::traits::{ContextualCache, ReadOnlyCache};
/// use scorecache::weights::ScoreWeights;
///
/// fn warm<C: ContextualCache<u64, String>>(cache: &mut C, data: &[(u64, &str)], t: f64) {
///     for (key, value) in data {
///         cache.put(*key, value.to_string(), t, Location::ORIGIN);
///     }
/// }
///
/// let mut cache = ScoredCache::new(8, ScoreWeights::default()).unwrap();
/// warm(&mut cache, &[(1, "one"), (2, "two")], 0.0);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait ContextualCache<K, V>: ReadOnlyCache<K> {
    /// Inserts or updates `key` at `(t, loc)`.
    ///
    /// Updating a resident key never evicts. Inserting a new key into a full
    /// cache evicts exactly one entry first and returns it.
    fn put(&mut self, key: K, value: V, t: Timestamp, loc: Location) -> Option<(K, V)>;

    /// Looks up `key`, recording an access at `(t, loc)` on a hit.
    ///
    /// A miss returns `None` and changes nothing.
    fn get(&mut self, key: &K, t: Timestamp, loc: Location) -> Option<&V>;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Marker trait for caches that are safe to share across threads.
///
/// ```text
///   fn use_cache<C: ConcurrentCache>(cache: &C)
/// ```
pub trait ConcurrentCache: Send + Sync {}
