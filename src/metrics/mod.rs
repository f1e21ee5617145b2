//! Cache metrics (feature `metrics`).
//!
//! - [`traits`]: recorder, snapshot-provider and exporter traits.
//! - [`metrics_impl`]: [`ScoredMetrics`](metrics_impl::ScoredMetrics) counters.
//! - [`snapshot`]: plain-data copies for tests and benches.
//! - [`exporter`]: Prometheus text exporter.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
