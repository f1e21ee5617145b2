use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use crate::metrics::snapshot::ScoredMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
///
/// ```
/// use scorecache::metrics::exporter::PrometheusTextExporter;
/// use scorecache::metrics::snapshot::ScoredMetricsSnapshot;
/// use scorecache::metrics::traits::MetricsExporter;
///
/// let exporter = PrometheusTextExporter::new("scorecache", Vec::new());
/// exporter.export(&ScoredMetricsSnapshot::default());
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("scorecache_get_hits_total 0"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // A panic mid-write leaves at most a truncated line; keep exporting.
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.lock();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.lock();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<ScoredMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ScoredMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evict_calls_total", snapshot.evict_calls),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("evict_scan_steps_total", snapshot.evict_scan_steps),
            (
                "tie_breaks_access_count_total",
                snapshot.tie_breaks_access_count,
            ),
            (
                "tie_breaks_insertion_sequence_total",
                snapshot.tie_breaks_insertion_sequence,
            ),
            ("context_updates_total", snapshot.context_updates),
            ("clears_total", snapshot.clears),
            ("score_query_calls_total", snapshot.score_query_calls),
            ("score_query_found_total", snapshot.score_query_found),
            ("peek_victim_calls_total", snapshot.peek_victim_calls),
            ("peek_victim_found_total", snapshot.peek_victim_found),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(prefix: &str, snapshot: &ScoredMetricsSnapshot) -> String {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot);
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn writes_counters_and_gauges_with_prefix() {
        let snapshot = ScoredMetricsSnapshot {
            get_hits: 3,
            evicted_entries: 2,
            cache_len: 5,
            capacity: 8,
            ..Default::default()
        };
        let text = render("edge", &snapshot);

        assert!(text.contains("# TYPE edge_get_hits_total counter\nedge_get_hits_total 3\n"));
        assert!(text.contains("edge_evicted_entries_total 2\n"));
        assert!(text.contains("# TYPE edge_cache_len gauge\nedge_cache_len 5\n"));
        assert!(text.contains("edge_capacity 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let text = render("", &ScoredMetricsSnapshot::default());
        assert!(text.contains("\nget_calls_total 0\n"));
        assert!(!text.contains("_get_calls_total"));
    }
}
