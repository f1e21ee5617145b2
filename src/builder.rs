//! Builder for scored caches.
//!
//! Collects capacity, coefficients and context providers, then validates
//! everything at once in [`ScoredCacheBuilder::try_build`].
//!
//! ## Example
//!
//! ```rust
//! use scorecache::builder::ScoredCacheBuilder;
//! use scorecache::entry::Location;
//!
//! let mut cache = ScoredCacheBuilder::new(100)
//!     .alpha(1.0)
//!     .beta(2.0)
//!     .gamma(0.0)
//!     .time_weight(|t: f64| if (7.0..=9.0).contains(&t) { 2.0 } else { 1.0 })
//!     .try_build::<u64, String>()
//!     .unwrap();
//!
//! cache.put(1, "hello".to_string(), 8.0, Location::ORIGIN);
//! assert_eq!(cache.get(&1, 8.5, Location::ORIGIN), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::context::{ContextProviders, ContextSignal, LocationWeight, TimeWeight};
use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::scored::ConcurrentScoredCache;
use crate::policy::scored::ScoredCache;
use crate::weights::ScoreWeights;

/// Builder for [`ScoredCache`].
///
/// Unset coefficients default to `1.0`; unset providers are neutral.
#[derive(Debug, Clone)]
pub struct ScoredCacheBuilder {
    capacity: usize,
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
    epsilon: f64,
    providers: ContextProviders,
}

impl ScoredCacheBuilder {
    /// Create a new builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        let w = ScoreWeights::default();
        Self {
            capacity,
            alpha: w.alpha(),
            beta: w.beta(),
            gamma: w.gamma(),
            delta: w.delta(),
            epsilon: w.epsilon(),
            providers: ContextProviders::default(),
        }
    }

    /// Sets all five coefficients from validated weights.
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.alpha = weights.alpha();
        self.beta = weights.beta();
        self.gamma = weights.gamma();
        self.delta = weights.delta();
        self.epsilon = weights.epsilon();
        self
    }

    /// Frequency coefficient.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Recency coefficient.
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Context-signal coefficient.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Time-weight coefficient.
    pub fn delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Location-weight coefficient.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn context_signal(mut self, provider: impl ContextSignal + 'static) -> Self {
        self.providers = self.providers.with_context_signal(provider);
        self
    }

    pub fn time_weight(mut self, provider: impl TimeWeight + 'static) -> Self {
        self.providers = self.providers.with_time_weight(provider);
        self
    }

    pub fn location_weight(mut self, provider: impl LocationWeight + 'static) -> Self {
        self.providers = self.providers.with_location_weight(provider);
        self
    }

    /// Replaces all three providers at once.
    pub fn providers(mut self, providers: ContextProviders) -> Self {
        self.providers = providers;
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero or a coefficient is
    /// NaN or infinite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scorecache::builder::ScoredCacheBuilder;
    ///
    /// assert!(ScoredCacheBuilder::new(0).try_build::<u64, u64>().is_err());
    /// assert!(ScoredCacheBuilder::new(4).beta(f64::NAN).try_build::<u64, u64>().is_err());
    /// assert!(ScoredCacheBuilder::new(4).try_build::<u64, u64>().is_ok());
    /// ```
    pub fn try_build<K, V>(self) -> Result<ScoredCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let weights =
            ScoreWeights::try_new(self.alpha, self.beta, self.gamma, self.delta, self.epsilon)?;
        ScoredCache::with_providers(self.capacity, weights, self.providers)
    }

    /// Builds a lock-wrapped cache shareable across threads.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentScoredCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build().map(ConcurrentScoredCache::from_cache)
    }
}
