//! Weight configuration for the composite eviction score.
//!
//! Five coefficients scale the five additive terms of the score:
//!
//! | Field     | Symbol | Term scaled                          |
//! |-----------|--------|--------------------------------------|
//! | `alpha`   | α      | access frequency                     |
//! | `beta`    | β      | reciprocal recency                   |
//! | `gamma`   | γ      | global context signal                |
//! | `delta`   | δ      | time-of-day weight                   |
//! | `epsilon` | ε      | location weight                      |
//!
//! No normalization is applied. Callers pick weights whose relative
//! magnitudes make sense for the unit scales of their signals.

use crate::error::ConfigError;

/// Immutable set of score coefficients (α..ε).
///
/// `Default` sets every coefficient to `1.0`.
///
/// # Example
///
/// ```
/// use scorecache::weights::ScoreWeights;
///
/// let w = ScoreWeights::try_new(2.0, 3.0, 1.0, 1.0, 1.0).unwrap();
/// assert_eq!(w.alpha(), 2.0);
/// assert!(ScoreWeights::try_new(f64::NAN, 0.0, 0.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
    epsilon: f64,
}

impl ScoreWeights {
    /// Creates a weight set, rejecting NaN or infinite coefficients.
    pub fn try_new(
        alpha: f64,
        beta: f64,
        gamma: f64,
        delta: f64,
        epsilon: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("alpha", alpha),
            ("beta", beta),
            ("gamma", gamma),
            ("delta", delta),
            ("epsilon", epsilon),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::non_finite_weight(name, value));
            }
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            delta,
            epsilon,
        })
    }

    /// Weights that score on frequency and recency only (γ = δ = ε = 0).
    pub fn frequency_recency(alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        Self::try_new(alpha, beta, 0.0, 0.0, 0.0)
    }

    /// Frequency coefficient (α).
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Recency coefficient (β).
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Context coefficient (γ).
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Time-of-day coefficient (δ).
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Location coefficient (ε).
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
            delta: 1.0,
            epsilon: 1.0,
        }
    }
}
