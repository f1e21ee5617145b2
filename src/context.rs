//! Pluggable context providers for the eviction score.
//!
//! Three independent strategies feed the score calculator:
//!
//! ```text
//!   ContextSignal    context_value()        -> f64   ambient, entry-independent
//!   TimeWeight       time_weight(t)         -> f64   importance of time t
//!   LocationWeight   location_weight(x, y)  -> f64   importance of a coordinate
//! ```
//!
//! Each defaults to [`Neutral`], which returns [`NEUTRAL_WEIGHT`] for every
//! input. An unset provider therefore adds the same constant to every entry's
//! score and never changes which entry is evicted.
//!
//! Plain closures implement the traits directly:
//!
//! ```
//! use scorecache::context::{ContextProviders, TimeWeight};
//!
//! let rush_hour = |t: f64| if (8.0..=10.0).contains(&t) { 2.0 } else { 0.5 };
//! assert_eq!(rush_hour.time_weight(9.0), 2.0);
//!
//! let providers = ContextProviders::default().with_time_weight(rush_hour);
//! assert_eq!(providers.time_weight(22.0), 0.5);
//! ```
//!
//! ## Invocation count
//!
//! Providers are expected to be pure. The eviction selector scores every
//! resident entry, so during one eviction each provider runs once per resident
//! entry, not once per eviction. Providers with side effects observe that.

use std::fmt;
use std::sync::Arc;

use crate::entry::{Location, Timestamp};

/// Value returned by the neutral default providers.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Ambient context signal, independent of any particular entry
/// (e.g. device power mode, system load).
pub trait ContextSignal: Send + Sync {
    fn context_value(&self) -> f64;
}

/// Maps a time value to an importance weight.
pub trait TimeWeight: Send + Sync {
    fn time_weight(&self, t: Timestamp) -> f64;
}

/// Maps a coordinate pair to an importance weight.
pub trait LocationWeight: Send + Sync {
    fn location_weight(&self, x: f64, y: f64) -> f64;
}

impl<F> ContextSignal for F
where
    F: Fn() -> f64 + Send + Sync,
{
    #[inline]
    fn context_value(&self) -> f64 {
        self()
    }
}

impl<F> TimeWeight for F
where
    F: Fn(Timestamp) -> f64 + Send + Sync,
{
    #[inline]
    fn time_weight(&self, t: Timestamp) -> f64 {
        self(t)
    }
}

impl<F> LocationWeight for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn location_weight(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Stateless provider returning [`NEUTRAL_WEIGHT`] for every input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neutral;

impl ContextSignal for Neutral {
    #[inline]
    fn context_value(&self) -> f64 {
        NEUTRAL_WEIGHT
    }
}

impl TimeWeight for Neutral {
    #[inline]
    fn time_weight(&self, _t: Timestamp) -> f64 {
        NEUTRAL_WEIGHT
    }
}

impl LocationWeight for Neutral {
    #[inline]
    fn location_weight(&self, _x: f64, _y: f64) -> f64 {
        NEUTRAL_WEIGHT
    }
}

/// The three configured strategies, each independently replaceable.
///
/// Providers are held behind `Arc` so a bundle can be cloned and shared
/// between caches without re-boxing.
#[derive(Clone)]
pub struct ContextProviders {
    context: Arc<dyn ContextSignal>,
    time: Arc<dyn TimeWeight>,
    location: Arc<dyn LocationWeight>,
}

impl ContextProviders {
    /// Replaces the context signal.
    pub fn with_context_signal(mut self, provider: impl ContextSignal + 'static) -> Self {
        self.context = Arc::new(provider);
        self
    }

    /// Replaces the time weight.
    pub fn with_time_weight(mut self, provider: impl TimeWeight + 'static) -> Self {
        self.time = Arc::new(provider);
        self
    }

    /// Replaces the location weight.
    pub fn with_location_weight(mut self, provider: impl LocationWeight + 'static) -> Self {
        self.location = Arc::new(provider);
        self
    }

    /// Replaces any subset of the three strategies; `None` keeps the current one.
    pub fn replace(
        &mut self,
        context: Option<Arc<dyn ContextSignal>>,
        time: Option<Arc<dyn TimeWeight>>,
        location: Option<Arc<dyn LocationWeight>>,
    ) {
        if let Some(context) = context {
            self.context = context;
        }
        if let Some(time) = time {
            self.time = time;
        }
        if let Some(location) = location {
            self.location = location;
        }
    }

    #[inline]
    pub fn context_value(&self) -> f64 {
        self.context.context_value()
    }

    #[inline]
    pub fn time_weight(&self, t: Timestamp) -> f64 {
        self.time.time_weight(t)
    }

    #[inline]
    pub fn location_weight(&self, loc: Location) -> f64 {
        self.location.location_weight(loc.x, loc.y)
    }
}

impl Default for ContextProviders {
    fn default() -> Self {
        Self {
            context: Arc::new(Neutral),
            time: Arc::new(Neutral),
            location: Arc::new(Neutral),
        }
    }
}

impl fmt::Debug for ContextProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextProviders").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_returns_constant_for_any_input() {
        assert_eq!(Neutral.context_value(), NEUTRAL_WEIGHT);
        for t in [-5.0, 0.0, 9.0, 1e9] {
            assert_eq!(Neutral.time_weight(t), NEUTRAL_WEIGHT);
        }
        for (x, y) in [(0.0, 0.0), (37.77, -122.42), (-1e6, 1e6)] {
            assert_eq!(Neutral.location_weight(x, y), NEUTRAL_WEIGHT);
        }
    }

    #[test]
    fn default_bundle_is_neutral() {
        let p = ContextProviders::default();
        assert_eq!(p.context_value(), NEUTRAL_WEIGHT);
        assert_eq!(p.time_weight(13.0), NEUTRAL_WEIGHT);
        assert_eq!(p.location_weight(Location::new(4.0, 2.0)), NEUTRAL_WEIGHT);
    }

    #[test]
    fn closures_act_as_providers() {
        let p = ContextProviders::default()
            .with_context_signal(|| 0.25)
            .with_time_weight(|t: f64| t * 2.0)
            .with_location_weight(|x: f64, y: f64| x + y);

        assert_eq!(p.context_value(), 0.25);
        assert_eq!(p.time_weight(3.0), 6.0);
        assert_eq!(p.location_weight(Location::new(1.0, 2.0)), 3.0);
    }

    #[test]
    fn replace_keeps_omitted_strategies() {
        let mut p = ContextProviders::default().with_time_weight(|_t: f64| 7.0);
        p.replace(Some(Arc::new(|| 3.0)), None, None);

        assert_eq!(p.context_value(), 3.0);
        assert_eq!(p.time_weight(0.0), 7.0);
        assert_eq!(p.location_weight(Location::ORIGIN), NEUTRAL_WEIGHT);
    }

    #[test]
    fn cloned_bundle_shares_providers() {
        let p = ContextProviders::default().with_context_signal(|| 9.0);
        let q = p.clone();
        assert_eq!(q.context_value(), 9.0);
    }
}
