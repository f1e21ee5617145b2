//! Composite score calculation.
//!
//! ```text
//!   score = α·freq + β·(1 / recency) + γ·context + δ·time_weight(t) + ε·location_weight(loc)
//!
//!   freq     = entry.access_count
//!   recency  = max(t - entry.last_access_time, 0) + 1        (always >= 1)
//! ```
//!
//! Lower scores are less valuable and are evicted first. A just-touched entry
//! gets the full recency reward `β / 1`; the reward shrinks as time passes.
//! `t` earlier than the entry's last access (clock skew, out-of-order
//! callers) clamps to zero elapsed time.
//!
//! The context term is global: every entry receives the same `γ·context`
//! contribution, so it shifts all scores uniformly. The time and location
//! terms are evaluated at the query-time `(t, loc)`, not the entry's stored
//! location, so they too are uniform across entries within one eviction.

use crate::context::ContextProviders;
use crate::entry::{CacheEntry, Location, Timestamp};
use crate::weights::ScoreWeights;

/// Weighted contribution of each term to one entry's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub frequency: f64,
    pub recency: f64,
    pub context: f64,
    pub time: f64,
    pub location: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms; equal to [`ScoreCalculator::score`].
    #[inline]
    pub fn total(&self) -> f64 {
        self.frequency + self.recency + self.context + self.time + self.location
    }
}

/// Borrowing view over the weights and providers needed to score entries.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator<'a> {
    weights: &'a ScoreWeights,
    providers: &'a ContextProviders,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(weights: &'a ScoreWeights, providers: &'a ContextProviders) -> Self {
        Self { weights, providers }
    }

    /// Recency denominator: elapsed time plus one, never below one.
    #[inline]
    pub fn recency(last_access_time: Timestamp, t: Timestamp) -> f64 {
        (t - last_access_time).max(0.0) + 1.0
    }

    /// Computes the score of `entry` under the context `(t, loc)`.
    #[inline]
    pub fn score<V>(&self, entry: &CacheEntry<V>, t: Timestamp, loc: Location) -> f64 {
        self.breakdown(entry, t, loc).total()
    }

    /// Computes each weighted term separately.
    pub fn breakdown<V>(&self, entry: &CacheEntry<V>, t: Timestamp, loc: Location) -> ScoreBreakdown {
        let w = self.weights;
        let freq = entry.access_count() as f64;
        let recency = Self::recency(entry.last_access_time(), t);

        ScoreBreakdown {
            frequency: w.alpha() * freq,
            recency: w.beta() * (1.0 / recency),
            context: w.gamma() * self.providers.context_value(),
            time: w.delta() * self.providers.time_weight(t),
            location: w.epsilon() * self.providers.location_weight(loc),
        }
    }
}
