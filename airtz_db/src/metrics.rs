use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Running totals over every query a [`SparqlClient`](crate::SparqlClient)
/// has sent. Counters only grow.
#[derive(Debug, Default)]
pub struct ExecutorMetrics {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    rows: AtomicUsize,
    /// Microseconds spent in successful queries
    busy_us: AtomicUsize,
}

impl ExecutorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_success(&self, elapsed: Duration, rows: usize) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.rows.fetch_add(rows, Ordering::Relaxed);
        self.busy_us
            .fetch_add(elapsed.as_micros() as usize, Ordering::Relaxed);
    }

    pub fn update_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn total_queries(&self) -> usize {
        self.succeeded() + self.failed()
    }

    pub fn rows(&self) -> usize {
        self.rows.load(Ordering::Relaxed)
    }

    /// Mean latency of successful queries; `None` before the first one.
    pub fn average_query_duration(&self) -> Option<Duration> {
        match self.succeeded() {
            0 => None,
            n => Some(Duration::from_micros(
                (self.busy_us.load(Ordering::Relaxed) / n) as u64,
            )),
        }
    }

    /// Share of queries that succeeded, in percent. 100 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        match self.total_queries() {
            0 => 100.0,
            total => self.succeeded() as f64 * 100.0 / total as f64,
        }
    }
}
