//! Latency and throughput accounting shared by the worker threads.
//!
//! The aggregator owns its own lock, independent of the queue's critical
//! section, so metrics contention never stalls buffer operations.

use parking_lot::Mutex;
use std::time::Duration;

#[derive(Default)]
struct StatsInner {
    produced: u64,
    consumed: u64,
    total_latency: Duration,
    min_latency: Option<Duration>,
    max_latency: Option<Duration>,
}

/// Serialized accumulator of production/consumption counts and queue
/// latencies, updated by concurrent producers and consumers.
#[derive(Default)]
pub struct LatencyStats {
    inner: Mutex<StatsInner>,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one produced item.
    pub fn record_produced(&self) {
        self.inner.lock().produced += 1;
    }

    /// Counts one consumed item and folds its queue latency into the
    /// running sum and min/max.
    pub fn record_consumed(&self, latency: Duration) {
        let mut inner = self.inner.lock();
        inner.consumed += 1;
        inner.total_latency += latency;
        inner.min_latency = Some(match inner.min_latency {
            Some(min) => min.min(latency),
            None => latency,
        });
        inner.max_latency = Some(match inner.max_latency {
            Some(max) => max.max(latency),
            None => latency,
        });
    }

    /// Copies the current totals out under the lock.
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock();
        StatsSnapshot {
            produced: inner.produced,
            consumed: inner.consumed,
            total_latency: inner.total_latency,
            min_latency: inner.min_latency,
            max_latency: inner.max_latency,
        }
    }
}

/// Point-in-time copy of the accumulated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub produced: u64,
    pub consumed: u64,
    pub total_latency: Duration,
    pub min_latency: Option<Duration>,
    pub max_latency: Option<Duration>,
}

impl StatsSnapshot {
    /// Mean queue latency over all consumed items, or zero when nothing
    /// was consumed.
    pub fn average_latency(&self) -> Duration {
        if self.consumed == 0 {
            return Duration::ZERO;
        }
        self.total_latency / self.consumed as u32
    }

    /// Items consumed per second over the given wall-clock span.
    pub fn throughput(&self, elapsed: Duration) -> f64 {
        if elapsed.is_zero() {
            return 0.0;
        }
        self.consumed as f64 / elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn empty_stats_are_zero() {
        let stats = LatencyStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.produced, 0);
        assert_eq!(snap.consumed, 0);
        assert_eq!(snap.average_latency(), Duration::ZERO);
        assert_eq!(snap.min_latency, None);
        assert_eq!(snap.throughput(Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn averages_and_extremes() {
        let stats = LatencyStats::new();
        stats.record_consumed(Duration::from_millis(10));
        stats.record_consumed(Duration::from_millis(20));
        stats.record_consumed(Duration::from_millis(30));

        let snap = stats.snapshot();
        assert_eq!(snap.consumed, 3);
        assert_eq!(snap.average_latency(), Duration::from_millis(20));
        assert_eq!(snap.min_latency, Some(Duration::from_millis(10)));
        assert_eq!(snap.max_latency, Some(Duration::from_millis(30)));
    }

    #[test]
    fn no_lost_updates_under_concurrency() {
        const THREADS: usize = 8;
        const UPDATES: usize = 1_000;

        let stats = Arc::new(LatencyStats::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..UPDATES {
                        stats.record_produced();
                        stats.record_consumed(Duration::from_micros(5));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.produced, (THREADS * UPDATES) as u64);
        assert_eq!(snap.consumed, (THREADS * UPDATES) as u64);
        assert_eq!(
            snap.total_latency,
            Duration::from_micros(5) * (THREADS * UPDATES) as u32
        );
    }
}
