use crate::adapter::Adapter;
use crate::adapter::generic::GenericAdapter;
use crate::config::BidderConfig;
use crate::registry::metrics::{MetricsSnapshot, RegistryMetrics};
use crate::registry::static_registry::{RegistryError, StaticRegistry};
use crate::store::{BIDDERS_KEY, ConfigStore};
use anyhow::{Context, bail};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

/// Sub-deadline applied to every store scan, on top of whatever the
/// caller's context enforces.
const STORE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Called under the registry write lock after each config lands, so it
/// must stay short. Used for cache invalidation hooks.
pub type UpdateCallback = Box<dyn Fn(&str, &BidderConfig) + Send + Sync>;

/// Registry of adapters loaded from the key-value store.
///
/// After every successful refresh the adapter set equals exactly the
/// set of codes in the scanned snapshot: existing adapters are updated
/// in place (their `Arc` identity survives, so cached references keep
/// working), new codes are inserted, absent codes are dropped. A failed
/// scan leaves the previous set fully intact.
pub struct DynamicRegistry {
    adapters: RwLock<HashMap<String, Arc<GenericAdapter>>>,
    store: Arc<dyn ConfigStore>,
    refresh_period: Duration,
    stop: Notify,
    on_update: Option<UpdateCallback>,
    metrics: RegistryMetrics,
}

impl DynamicRegistry {
    pub fn new(store: Arc<dyn ConfigStore>, refresh_period: Duration) -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
            store,
            refresh_period,
            stop: Notify::new(),
            on_update: None,
            metrics: RegistryMetrics::default(),
        }
    }

    pub fn with_update_callback(mut self, callback: UpdateCallback) -> Self {
        self.on_update = Some(callback);
        self
    }

    /// One full reconciliation pass against the store.
    pub async fn refresh(&self) -> Result<(), anyhow::Error> {
        let started = Instant::now();

        let fetched =
            tokio::time::timeout(STORE_FETCH_TIMEOUT, self.store.hash_get_all(BIDDERS_KEY)).await;

        let snapshot = match fetched {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                self.metrics.record_refresh_error();
                return Err(anyhow::Error::new(e).context("config store scan failed"));
            }
            Err(_) => {
                self.metrics.record_refresh_error();
                bail!("config store scan exceeded {STORE_FETCH_TIMEOUT:?}");
            }
        };

        let (enabled, total) = {
            let mut adapters = self.adapters.write();
            let mut seen = HashSet::with_capacity(snapshot.len());

            for (code, raw) in &snapshot {
                let mut config: BidderConfig = match serde_json::from_str(raw) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("Skipping unparseable config for {}: {}", code, e);
                        // an existing adapter keeps its prior config
                        if adapters.contains_key(code.as_str()) {
                            seen.insert(code.clone());
                        }
                        continue;
                    }
                };

                // the hash field is authoritative for the code
                if config.bidder_code.is_empty() {
                    config.bidder_code = code.clone();
                }

                if let Err(e) = config.validate() {
                    warn!("Skipping invalid config for {}: {}", code, e);
                    if adapters.contains_key(code.as_str()) {
                        seen.insert(code.clone());
                    }
                    continue;
                }

                seen.insert(code.clone());

                match adapters.entry(code.clone()) {
                    Entry::Occupied(entry) => entry.get().update_config(config.clone()),
                    Entry::Vacant(entry) => {
                        debug!("New dynamic bidder {}", code);
                        entry.insert(Arc::new(GenericAdapter::new(config.clone())));
                    }
                }

                if let Some(callback) = &self.on_update {
                    callback(code.as_str(), &config);
                }
            }

            adapters.retain(|code, _| {
                let keep = seen.contains(code);
                if !keep {
                    debug!("Dropping dynamic bidder {} absent from store", code);
                }
                keep
            });

            let enabled = adapters
                .values()
                .filter(|a| a.config().enabled())
                .count();
            (enabled, adapters.len())
        };

        self.metrics
            .record_refresh_success(started.elapsed(), enabled, total);

        debug!(
            "Refreshed dynamic registry: {} bidders ({} enabled) in {:?}",
            total,
            enabled,
            started.elapsed()
        );

        Ok(())
    }

    /// Runs the refresh loop until [`stop`](Self::stop) is called or the
    /// owning task is dropped. The initial refresh is synchronous and
    /// fatal on failure; the host should treat that error as a startup
    /// failure. Later failures keep the previous adapter set and retry
    /// on the next tick.
    pub async fn start(&self) -> Result<(), anyhow::Error> {
        self.refresh().await.context("initial dynamic refresh failed")?;

        let mut ticker = tokio::time::interval(self.refresh_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of a fresh interval fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        warn!("Periodic refresh failed, keeping previous set: {:#}", e);
                    }
                }
                _ = self.stop.notified() => {
                    debug!("Dynamic registry refresh loop stopping");
                    return Ok(());
                }
            }
        }
    }

    /// Signals the refresh loop to exit. A permit is stored, so calling
    /// this before the loop reaches its select is not lost.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Looks up one live adapter. The registry lock is released before
    /// the metrics lock is taken; that ordering is load-bearing, never
    /// hold both.
    pub fn get(&self, code: &str) -> Option<Arc<GenericAdapter>> {
        let found = { self.adapters.read().get(code).cloned() };

        match found {
            Some(adapter) => {
                self.metrics.record_hit();
                Some(adapter)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.adapters.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Bridges every live dynamic adapter into the static registry,
    /// skipping codes already present there. The static contract is
    /// append-only, so there is no reverse operation; consumers that
    /// need hot reload should keep resolving through [`get`](Self::get).
    pub fn register_with_static(&self, registry: &StaticRegistry) -> usize {
        let adapters: Vec<_> = {
            self.adapters
                .read()
                .iter()
                .map(|(code, adapter)| (code.clone(), adapter.clone()))
                .collect()
        };

        let mut registered = 0;
        for (code, adapter) in adapters {
            let info = adapter.info();
            match registry.register(&code, adapter, info) {
                Ok(()) => registered += 1,
                Err(RegistryError::AlreadyRegistered(code)) => {
                    trace!("Skipping already registered bidder {}", code);
                }
            }
        }

        registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config_json(code: &str, url: &str, status: &str) -> String {
        format!(
            r#"{{"bidder_code":"{code}","endpoint":{{"url":"{url}"}},"status":"{status}"}}"#
        )
    }

    fn seeded_store(codes: &[&str]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for code in codes {
            store.set_hash_field(
                BIDDERS_KEY,
                code,
                config_json(code, &format!("https://bid.{code}.example/rtb"), "active"),
            );
        }
        store
    }

    #[tokio::test]
    async fn test_refresh_converges_to_store_snapshot() {
        let store = seeded_store(&["x", "y"]);
        let registry = DynamicRegistry::new(store.clone(), Duration::from_secs(60));

        registry.refresh().await.unwrap();
        let mut codes = registry.codes();
        codes.sort();
        assert_eq!(codes, vec!["x", "y"]);

        store.remove_hash_field(BIDDERS_KEY, "x");
        store.set_hash_field(
            BIDDERS_KEY,
            "z",
            config_json("z", "https://bid.z.example/rtb", "active"),
        );

        registry.refresh().await.unwrap();

        assert!(registry.get("x").is_none(), "x was removed from the store");
        assert!(registry.get("y").is_some());
        assert!(registry.get("z").is_some());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_update_preserves_adapter_identity() {
        let store = seeded_store(&["y"]);
        let registry = DynamicRegistry::new(store.clone(), Duration::from_secs(60));
        registry.refresh().await.unwrap();

        let before = registry.get("y").unwrap();

        store.set_hash_field(
            BIDDERS_KEY,
            "y",
            config_json("y", "https://bid2.y.example/rtb", "testing"),
        );
        registry.refresh().await.unwrap();

        let after = registry.get("y").unwrap();
        assert!(
            Arc::ptr_eq(&before, &after),
            "existing adapter must be updated in place, not replaced"
        );
        assert_eq!(before.config().endpoint.url, "https://bid2.y.example/rtb");
    }

    #[tokio::test]
    async fn test_bad_config_is_skipped_and_prior_one_retained() {
        let store = seeded_store(&["y"]);
        let registry = DynamicRegistry::new(store.clone(), Duration::from_secs(60));
        registry.refresh().await.unwrap();

        let original_url = registry.get("y").unwrap().config().endpoint.url.clone();

        store.set_hash_field(BIDDERS_KEY, "y", "{not json");
        registry.refresh().await.unwrap();

        let adapter = registry.get("y");
        assert!(adapter.is_some(), "parse failure must not remove the adapter");
        assert_eq!(adapter.unwrap().config().endpoint.url, original_url);
    }

    #[tokio::test]
    async fn test_invalid_config_is_skipped() {
        let store = seeded_store(&["y"]);
        store.set_hash_field(BIDDERS_KEY, "bad", r#"{"bidder_code":"bad"}"#);

        let registry = DynamicRegistry::new(store, Duration::from_secs(60));
        registry.refresh().await.unwrap();

        assert!(registry.get("bad").is_none(), "empty endpoint url fails validation");
        assert!(registry.get("y").is_some());
    }

    struct FailingStore;

    #[async_trait]
    impl ConfigStore for FailingStore {
        async fn hash_get_all(
            &self,
            _key: &str,
        ) -> Result<HashMap<String, String>, StoreError> {
            Err(StoreError::Backend(anyhow::anyhow!("connection reset")))
        }

        async fn set_members(&self, _key: &str) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }

        async fn hash_get(
            &self,
            _key: &str,
            _field: &str,
        ) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_counts_error_and_keeps_set() {
        let registry = DynamicRegistry::new(Arc::new(FailingStore), Duration::from_secs(60));

        assert!(registry.refresh().await.is_err());
        assert!(registry.start().await.is_err(), "initial refresh failure is fatal");

        let metrics = registry.metrics();
        assert_eq!(metrics.refresh_errors, 2);
        assert_eq!(metrics.refresh_success, 0);
    }

    #[tokio::test]
    async fn test_metrics_track_lookups_and_counts() {
        let store = seeded_store(&["x"]);
        store.set_hash_field(
            BIDDERS_KEY,
            "off",
            config_json("off", "https://bid.off.example/rtb", "disabled"),
        );

        let registry = DynamicRegistry::new(store, Duration::from_secs(60));
        registry.refresh().await.unwrap();

        registry.get("x");
        registry.get("x");
        registry.get("missing");

        let metrics = registry.metrics();
        assert_eq!(metrics.lookup_hits, 2);
        assert_eq!(metrics.lookup_misses, 1);
        assert_eq!(metrics.total_bidders, 2);
        assert_eq!(metrics.enabled_bidders, 1);
        assert_eq!(metrics.refresh_success, 1);
        assert!(metrics.last_refresh_wall.is_some());
    }

    #[tokio::test]
    async fn test_update_callback_sees_every_config() {
        let store = seeded_store(&["x", "y"]);
        let calls = Arc::new(AtomicUsize::new(0));

        let counted = calls.clone();
        let registry = DynamicRegistry::new(store, Duration::from_secs(60))
            .with_update_callback(Box::new(move |_code, config| {
                assert!(!config.endpoint.url.is_empty());
                counted.fetch_add(1, Ordering::SeqCst);
            }));

        registry.refresh().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_start_runs_loop_until_stopped() {
        let store = seeded_store(&["x"]);
        let registry = Arc::new(DynamicRegistry::new(store, Duration::from_millis(10)));

        let looped = registry.clone();
        let handle = tokio::spawn(async move { looped.start().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        registry.stop();

        handle.await.unwrap().unwrap();
        assert!(
            registry.metrics().refresh_success >= 2,
            "loop should have refreshed beyond the initial pass"
        );
    }

    #[tokio::test]
    async fn test_bridge_into_static_registry_ignores_duplicates() {
        let store = seeded_store(&["x", "y"]);
        let registry = DynamicRegistry::new(store, Duration::from_secs(60));
        registry.refresh().await.unwrap();

        let static_registry = StaticRegistry::new();
        assert_eq!(registry.register_with_static(&static_registry), 2);
        assert_eq!(static_registry.len(), 2);

        // a second bridge is a no-op, not an error
        assert_eq!(registry.register_with_static(&static_registry), 0);
        assert_eq!(static_registry.len(), 2);
    }

    #[tokio::test]
    async fn test_code_filled_from_hash_field_when_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set_hash_field(
            BIDDERS_KEY,
            "fieldcode",
            r#"{"endpoint":{"url":"https://bid.example/rtb"}}"#,
        );

        let registry = DynamicRegistry::new(store, Duration::from_secs(60));
        registry.refresh().await.unwrap();

        let adapter = registry.get("fieldcode").unwrap();
        assert_eq!(adapter.code(), "fieldcode");
        assert_eq!(adapter.config().bidder_code, "fieldcode");
    }
}
