pub use crate::builder::ScoredCacheBuilder;
pub use crate::context::{
    ContextProviders, ContextSignal, LocationWeight, NEUTRAL_WEIGHT, Neutral, TimeWeight,
};
pub use crate::entry::{CacheEntry, Location, Timestamp};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ScoredMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
pub use crate::policy::scored::ConcurrentScoredCache;
pub use crate::policy::scored::ScoredCache;
pub use crate::score::ScoreBreakdown;
pub use crate::traits::{ConcurrentCache, ContextualCache, ReadOnlyCache};
pub use crate::weights::ScoreWeights;
