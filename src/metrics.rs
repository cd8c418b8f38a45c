//! Provider Metrics
//!
//! Embedding call counters and latency tracking.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for embedding provider calls
#[derive(Debug)]
pub struct ProviderMetrics {
    /// Total calls, successful or not
    total_calls: AtomicU64,

    /// Failed calls per error kind
    failures_by_kind: RwLock<HashMap<&'static str, u64>>,

    /// Latency tracking (simplified)
    latency_sum_us: AtomicU64,
    latency_count: AtomicU64,
    latency_min_us: AtomicU64,
    latency_max_us: AtomicU64,
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            total_calls: AtomicU64::new(0),
            failures_by_kind: RwLock::new(HashMap::new()),
            latency_sum_us: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            latency_min_us: AtomicU64::new(u64::MAX),
            latency_max_us: AtomicU64::new(0),
        }
    }

    /// Record one provider call; `failure` carries the error kind if it failed
    pub fn record_call(&self, latency: Duration, failure: Option<&'static str>) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(kind) = failure {
            *self.failures_by_kind.write().entry(kind).or_insert(0) += 1;
        }

        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);

        // Update min (atomic min)
        let mut current_min = self.latency_min_us.load(Ordering::Relaxed);
        while latency_us < current_min {
            match self.latency_min_us.compare_exchange_weak(
                current_min,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_min = c,
            }
        }

        // Update max (atomic max)
        let mut current_max = self.latency_max_us.load(Ordering::Relaxed);
        while latency_us > current_max {
            match self.latency_max_us.compare_exchange_weak(
                current_max,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_max = c,
            }
        }
    }

    /// Get total calls count
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    /// Get failed calls count
    pub fn failures(&self) -> u64 {
        self.failures_by_kind.read().values().sum()
    }

    /// Get failures by error kind
    pub fn failures_by_kind(&self) -> HashMap<&'static str, u64> {
        self.failures_by_kind.read().clone()
    }

    /// Get average latency in microseconds
    pub fn avg_latency_us(&self) -> f64 {
        let count = self.latency_count.load(Ordering::Relaxed);
        if count == 0 {
            return 0.0;
        }
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        sum as f64 / count as f64
    }

    /// Get min latency in microseconds
    pub fn min_latency_us(&self) -> u64 {
        let min = self.latency_min_us.load(Ordering::Relaxed);
        if min == u64::MAX {
            0
        } else {
            min
        }
    }

    /// Get max latency in microseconds
    pub fn max_latency_us(&self) -> u64 {
        self.latency_max_us.load(Ordering::Relaxed)
    }

    /// Get a summary of metrics
    pub fn summary(&self) -> String {
        format!(
            "Embedding calls: {} ({} failed) | Latency (µs): avg={:.1}, min={}, max={}",
            self.total_calls(),
            self.failures(),
            self.avg_latency_us(),
            self.min_latency_us(),
            self.max_latency_us()
        )
    }
}
