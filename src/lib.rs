//! scorecache: a bounded cache that evicts by weighted composite score.
//!
//! Each resident entry is scored under the caller's current context:
//!
//! ```text
//!   score = α·freq + β·(1 / recency) + γ·context + δ·time_weight(t) + ε·location_weight(loc)
//! ```
//!
//! When a new key arrives at a full cache, the lowest-scored entry is
//! evicted. Ties go to the entry with fewer accesses, then to the one
//! inserted first.
//!
//! ## Modules
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`weights`]  | [`ScoreWeights`](weights::ScoreWeights) coefficients  |
//! | [`context`]  | Pluggable context, time and location strategies       |
//! | [`entry`]    | Per-entry metadata, `Timestamp`, `Location`           |
//! | [`score`]    | Score calculator and per-term breakdown               |
//! | [`eviction`] | Victim selection with deterministic tie-breaking      |
//! | [`policy`]   | [`ScoredCache`](policy::scored::ScoredCache)          |
//! | [`builder`]  | Validating builder                                    |
//! | `metrics`    | Counters and Prometheus export (`metrics` feature)    |
//!
//! ## Features
//!
//! - `metrics`: operation counters, snapshots and a Prometheus text exporter.
//! - `concurrency`: `ConcurrentScoredCache`, a `parking_lot::RwLock` wrapper.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Evictions log at `debug`, configuration changes at `trace`.

pub mod builder;
pub mod context;
pub mod entry;
pub mod error;
pub mod eviction;
pub mod policy;
pub mod score;
pub mod weights;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
