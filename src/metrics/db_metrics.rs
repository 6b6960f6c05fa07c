//! Store-level metrics.

use std::fmt;
use std::fmt::Write as _;

use super::collector::{Counter, Gauge, Histogram};

/// All metrics recorded by a [`Database`](crate::Database).
#[derive(Debug, Default)]
pub struct DbMetrics {
    /// `set` calls.
    pub sets: Counter,
    /// `get` calls.
    pub gets: Counter,
    /// `delete` calls.
    pub deletes: Counter,
    /// `count` calls.
    pub counts: Counter,
    /// Reads and deletes that found nothing.
    pub misses: Counter,

    /// Transactions started.
    pub txn_begin: Counter,
    /// Transactions committed.
    pub txn_commit: Counter,
    /// Transactions rolled back.
    pub txn_rollback: Counter,
    /// Commit or rollback attempted with no open transaction.
    pub txn_empty: Counter,

    /// Current transaction depth.
    pub depth: Gauge,
    /// Keys in the current view.
    pub keys: Gauge,

    /// Time spent holding the read lock (microseconds).
    pub read_latency: Histogram,
    /// Time spent holding the write lock (microseconds).
    pub write_latency: Histogram,
}

/// One Prometheus sample: name, type, help, value.
type Sample = (&'static str, &'static str, &'static str, String);

impl DbMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Format as Prometheus text exposition.
    pub fn to_prometheus(&self) -> String {
        let samples: [Sample; 11] = [
            ("txkv_sets_total", "counter", "Set operations", self.sets.get().to_string()),
            ("txkv_gets_total", "counter", "Get operations", self.gets.get().to_string()),
            ("txkv_deletes_total", "counter", "Delete operations", self.deletes.get().to_string()),
            ("txkv_counts_total", "counter", "Count operations", self.counts.get().to_string()),
            ("txkv_misses_total", "counter", "Lookups that found no item", self.misses.get().to_string()),
            ("txkv_txn_begin_total", "counter", "Transactions started", self.txn_begin.get().to_string()),
            ("txkv_txn_commit_total", "counter", "Transactions committed", self.txn_commit.get().to_string()),
            ("txkv_txn_rollback_total", "counter", "Transactions rolled back", self.txn_rollback.get().to_string()),
            ("txkv_txn_empty_total", "counter", "Commit or rollback with no open transaction", self.txn_empty.get().to_string()),
            ("txkv_txn_depth", "gauge", "Current transaction depth", self.depth.get().to_string()),
            ("txkv_keys", "gauge", "Keys in the current view", self.keys.get().to_string()),
        ];

        let mut output = String::new();
        for (name, kind, help, value) in samples {
            let _ = writeln!(output, "# HELP {} {}", name, help);
            let _ = writeln!(output, "# TYPE {} {}", name, kind);
            let _ = writeln!(output, "{} {}\n", name, value);
        }

        let histograms = [
            ("txkv_read_latency_seconds", "Read lock hold time", &self.read_latency),
            ("txkv_write_latency_seconds", "Write lock hold time", &self.write_latency),
        ];
        for (name, help, histogram) in histograms {
            let _ = writeln!(output, "# HELP {} {}", name, help);
            let _ = writeln!(output, "# TYPE {} histogram", name);
            output.push_str(&histogram.to_prometheus(name));
        }

        output
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            sets: self.sets.get(),
            gets: self.gets.get(),
            deletes: self.deletes.get(),
            counts: self.counts.get(),
            misses: self.misses.get(),
            txn_begin: self.txn_begin.get(),
            txn_commit: self.txn_commit.get(),
            txn_rollback: self.txn_rollback.get(),
            txn_empty: self.txn_empty.get(),
            depth: self.depth.get(),
            keys: self.keys.get(),
            read_latency_mean_us: self.read_latency.mean(),
            write_latency_mean_us: self.write_latency.mean(),
        }
    }
}

/// Point-in-time copy of [`DbMetrics`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub sets: u64,
    pub gets: u64,
    pub deletes: u64,
    pub counts: u64,
    pub misses: u64,
    pub txn_begin: u64,
    pub txn_commit: u64,
    pub txn_rollback: u64,
    pub txn_empty: u64,
    pub depth: i64,
    pub keys: i64,
    pub read_latency_mean_us: f64,
    pub write_latency_mean_us: f64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Store Metrics Summary ===")?;
        writeln!(f)?;
        writeln!(f, "Operations:")?;
        writeln!(f, "  Sets:    {}", self.sets)?;
        writeln!(f, "  Gets:    {}", self.gets)?;
        writeln!(f, "  Deletes: {}", self.deletes)?;
        writeln!(f, "  Counts:  {}", self.counts)?;
        writeln!(f, "  Misses:  {}", self.misses)?;
        writeln!(f)?;
        writeln!(f, "Transactions:")?;
        writeln!(f, "  Begun:       {}", self.txn_begin)?;
        writeln!(f, "  Committed:   {}", self.txn_commit)?;
        writeln!(f, "  Rolled back: {}", self.txn_rollback)?;
        writeln!(f, "  Rejected:    {}", self.txn_empty)?;
        writeln!(f, "  Open:        {}", self.depth)?;
        writeln!(f)?;
        writeln!(f, "Keys: {}", self.keys)?;
        writeln!(f)?;
        writeln!(f, "Lock hold time (mean):")?;
        writeln!(f, "  Read:  {:.2} µs", self.read_latency_mean_us)?;
        writeln!(f, "  Write: {:.2} µs", self.write_latency_mean_us)?;
        Ok(())
    }
}
