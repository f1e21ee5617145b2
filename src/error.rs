//! Error types for the scorecache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is constructed with invalid
//!   parameters (zero capacity, non-finite score weights).
//! - [`InvariantError`]: Returned when internal invariants are violated,
//!   including eviction invoked on an empty store. These indicate a bug in
//!   the caller or the library, never a normal runtime condition.
//!
//! A cache miss is not an error: [`ScoredCache::get`] returns `None`.
//!
//! ## Example Usage
//!
//! ```
//! use scorecache::error::ConfigError;
//! use scorecache::policy::scored::ScoredCache;
//! use scorecache::weights::ScoreWeights;
//!
//! let cache: Result<ScoredCache<&str, i32>, ConfigError> =
//!     ScoredCache::new(16, ScoreWeights::default());
//! assert!(cache.is_ok());
//!
//! // Zero capacity is rejected without panicking
//! let bad = ScoredCache::<&str, i32>::new(0, ScoreWeights::default());
//! assert!(bad.is_err());
//! ```
//!
//! [`ScoredCache::get`]: crate::policy::scored::ScoredCache::get

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`ScoredCache::new`](crate::policy::scored::ScoredCache::new),
/// [`ScoreWeights::try_new`](crate::weights::ScoreWeights::try_new) and
/// [`ScoredCacheBuilder::try_build`](crate::builder::ScoredCacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use scorecache::policy::scored::ScoredCache;
/// use scorecache::weights::ScoreWeights;
///
/// let err = ScoredCache::<u64, u64>::new(0, ScoreWeights::default()).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Error for a zero capacity.
    pub(crate) fn zero_capacity() -> Self {
        Self::new("invalid configuration: capacity must be > 0")
    }

    /// Error for a NaN or infinite weight coefficient.
    pub(crate) fn non_finite_weight(name: &str, value: f64) -> Self {
        Self(format!(
            "invalid configuration: weight {name} must be finite, got {value}"
        ))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`select_victim`](crate::eviction::select_victim) when asked
/// to pick a victim from an empty store, and by
/// [`ScoredCache::check_invariants`](crate::policy::scored::ScoredCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Eviction was requested while no entries are resident.
    pub(crate) fn empty_store_eviction() -> Self {
        Self::new("empty store eviction: no resident entry to evict")
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
