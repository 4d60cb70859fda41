use parking_lot::Mutex;
use std::time::Duration;

/// Point-in-time copy of the registry counters, cheap to hand to an
/// exporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub refresh_success: u64,
    pub refresh_errors: u64,
    pub last_refresh_wall: Option<Duration>,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
    pub enabled_bidders: usize,
    pub total_bidders: usize,
}

/// Counters for the dynamic registry behind their own lock.
///
/// Lock order is registry then metrics, never the reverse; callers in
/// `dynamic.rs` release the registry lock before touching these.
#[derive(Default)]
pub struct RegistryMetrics {
    inner: Mutex<MetricsSnapshot>,
}

impl RegistryMetrics {
    pub fn record_refresh_success(&self, wall: Duration, enabled: usize, total: usize) {
        let mut inner = self.inner.lock();
        inner.refresh_success += 1;
        inner.last_refresh_wall = Some(wall);
        inner.enabled_bidders = enabled;
        inner.total_bidders = total;
    }

    pub fn record_refresh_error(&self) {
        self.inner.lock().refresh_errors += 1;
    }

    pub fn record_hit(&self) {
        self.inner.lock().lookup_hits += 1;
    }

    pub fn record_miss(&self) {
        self.inner.lock().lookup_misses += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = RegistryMetrics::default();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_refresh_error();
        metrics.record_refresh_success(Duration::from_millis(12), 3, 5);

        let snap = metrics.snapshot();
        assert_eq!(snap.lookup_hits, 2);
        assert_eq!(snap.lookup_misses, 1);
        assert_eq!(snap.refresh_errors, 1);
        assert_eq!(snap.refresh_success, 1);
        assert_eq!(snap.last_refresh_wall, Some(Duration::from_millis(12)));
        assert_eq!(snap.enabled_bidders, 3);
        assert_eq!(snap.total_bidders, 5);
    }
}
