use std::sync::Mutex;

/// Counters accumulated over pipeline runs.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Default)]
struct Metrics {
    rows_in: usize,
    rows_dropped: usize,
    flights_emitted: usize,
    degenerate_geometry: usize,
    errors: usize,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub flights_emitted: usize,
    pub degenerate_geometry: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn add_rows_in(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rows_in += count;
        }
    }

    pub fn add_rows_dropped(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rows_dropped += count;
        }
    }

    pub fn add_flights_emitted(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.flights_emitted += count;
        }
    }

    pub fn add_degenerate_geometry(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.degenerate_geometry += count;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                rows_in: metrics.rows_in,
                rows_dropped: metrics.rows_dropped,
                flights_emitted: metrics.flights_emitted,
                degenerate_geometry: metrics.degenerate_geometry,
                errors: metrics.errors,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
