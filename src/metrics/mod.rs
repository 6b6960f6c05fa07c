//! Metrics and observability for the store.
//!
//! - **Operation metrics**: set/get/delete/count calls and misses
//! - **Transaction metrics**: begins, commits, rollbacks, rejected ends
//! - **State gauges**: transaction depth and key count
//! - **Prometheus export**: text exposition format

mod collector;
mod db_metrics;

pub use collector::{Counter, Gauge, Histogram, Timer};
pub use db_metrics::{DbMetrics, MetricsSummary};
