//! Lock-free metric primitives.
//!
//! Counter, Gauge and Histogram use relaxed atomics so they can be updated
//! from inside or outside the store lock without extra synchronization.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Instant;

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter initialized to 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Add a value to the counter.
    pub fn add(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    /// Get the current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset to 0.
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// A gauge that can go up or down.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    /// Create a new gauge initialized to 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gauge to a specific value.
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    /// Get the current value.
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Number of histogram buckets, including the overflow bucket.
const NUM_BUCKETS: usize = 8;

/// Histogram of latencies in microseconds.
///
/// In-memory operations are short, so buckets are concentrated below one
/// millisecond.
#[derive(Debug)]
pub struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    max: AtomicU64,
    /// Buckets: <1us, <5us, <10us, <50us, <100us, <1ms, <10ms, >=10ms
    buckets: [AtomicU64; NUM_BUCKETS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Upper bounds (exclusive) of every bucket but the last, in microseconds.
    const BUCKET_THRESHOLDS: [u64; NUM_BUCKETS - 1] = [1, 5, 10, 50, 100, 1_000, 10_000];

    /// Create a new histogram.
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            max: AtomicU64::new(0),
            buckets: Default::default(),
        }
    }

    /// Record the time elapsed since `start`.
    pub fn observe_duration(&self, start: Instant) {
        self.observe(start.elapsed().as_micros() as u64);
    }

    /// Record a value in microseconds.
    pub fn observe(&self, micros: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(micros, Ordering::Relaxed);
        self.max.fetch_max(micros, Ordering::Relaxed);

        let bucket = Self::BUCKET_THRESHOLDS
            .iter()
            .position(|&threshold| micros < threshold)
            .unwrap_or(NUM_BUCKETS - 1);
        self.buckets[bucket].fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count of observations.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get the sum of all observations.
    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    /// Get the maximum observed value.
    pub fn max(&self) -> Option<u64> {
        if self.count() == 0 {
            None
        } else {
            Some(self.max.load(Ordering::Relaxed))
        }
    }

    /// Get the mean value.
    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Get bucket counts.
    pub fn bucket_counts(&self) -> [u64; NUM_BUCKETS] {
        let mut counts = [0u64; NUM_BUCKETS];
        for (count, bucket) in counts.iter_mut().zip(&self.buckets) {
            *count = bucket.load(Ordering::Relaxed);
        }
        counts
    }

    /// Format as Prometheus histogram samples, in seconds.
    pub fn to_prometheus(&self, name: &str) -> String {
        let mut output = String::new();
        let buckets = self.bucket_counts();
        let mut cumulative = 0u64;

        for (i, &threshold) in Self::BUCKET_THRESHOLDS.iter().enumerate() {
            cumulative += buckets[i];
            let le = threshold as f64 / 1_000_000.0;
            let _ = writeln!(output, "{}_bucket{{le=\"{}\"}} {}", name, le, cumulative);
        }

        cumulative += buckets[NUM_BUCKETS - 1];
        let _ = writeln!(output, "{}_bucket{{le=\"+Inf\"}} {}", name, cumulative);
        let _ = writeln!(output, "{}_sum {}", name, self.sum() as f64 / 1_000_000.0);
        let _ = writeln!(output, "{}_count {}", name, self.count());

        output
    }
}

/// Records elapsed time into a histogram when dropped.
pub struct Timer<'a> {
    histogram: &'a Histogram,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Start timing into `histogram`.
    pub fn new(histogram: &'a Histogram) -> Self {
        Self {
            histogram,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.histogram.observe_duration(self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_counter_basic() {
        let counter = Counter::new();
        assert_eq!(counter.get(), 0);

        counter.inc();
        counter.add(5);
        assert_eq!(counter.get(), 6);

        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_gauge_basic() {
        let gauge = Gauge::new();
        gauge.set(3);
        assert_eq!(gauge.get(), 3);
        gauge.set(0);
        assert_eq!(gauge.get(), 0);
    }

    #[test]
    fn test_histogram_basic() {
        let hist = Histogram::new();
        assert_eq!(hist.max(), None);

        hist.observe(2);
        hist.observe(4);
        hist.observe(9);

        assert_eq!(hist.count(), 3);
        assert_eq!(hist.sum(), 15);
        assert_eq!(hist.max(), Some(9));
        assert!((hist.mean() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_histogram_buckets() {
        let hist = Histogram::new();
        hist.observe(0); // <1us
        hist.observe(3); // <5us
        hist.observe(70); // <100us
        hist.observe(50_000); // overflow

        let buckets = hist.bucket_counts();
        assert_eq!(buckets[0], 1);
        assert_eq!(buckets[1], 1);
        assert_eq!(buckets[4], 1);
        assert_eq!(buckets[NUM_BUCKETS - 1], 1);
    }

    #[test]
    fn test_timer() {
        let hist = Histogram::new();
        {
            let _timer = Timer::new(&hist);
            thread::sleep(Duration::from_micros(100));
        }

        assert_eq!(hist.count(), 1);
        assert!(hist.sum() >= 100);
    }

    #[test]
    fn test_counter_thread_safety() {
        let counter = Counter::new();

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        counter.inc();
                    }
                });
            }
        });

        assert_eq!(counter.get(), 8_000);
    }

    #[test]
    fn test_histogram_prometheus_format() {
        let hist = Histogram::new();
        hist.observe(3);

        let output = hist.to_prometheus("txkv_read_latency_seconds");
        assert!(output.contains("txkv_read_latency_seconds_bucket{le=\"+Inf\"} 1"));
        assert!(output.contains("txkv_read_latency_seconds_count 1"));
    }
}
