use crate::adapter::{Adapter, BidderInfo};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("bidder '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// One registered entry: the adapter and the capability snapshot it was
/// registered with.
#[derive(Clone)]
pub struct RegisteredBidder {
    pub adapter: Arc<dyn Adapter>,
    pub info: BidderInfo,
}

/// Process-wide map of bidder code to compiled-in adapter.
///
/// Registration happens once at startup and is append-only: a second
/// registration under the same code fails, and there is no removal.
/// Lookups are per-auction and read-mostly; the lock is only ever
/// write-held during startup.
#[derive(Default)]
pub struct StaticRegistry {
    bidders: RwLock<HashMap<String, RegisteredBidder>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        code: impl Into<String>,
        adapter: Arc<dyn Adapter>,
        info: BidderInfo,
    ) -> Result<(), RegistryError> {
        let code = code.into();
        let mut bidders = self.bidders.write();

        if bidders.contains_key(&code) {
            return Err(RegistryError::AlreadyRegistered(code));
        }

        bidders.insert(code, RegisteredBidder { adapter, info });
        Ok(())
    }

    pub fn lookup(&self, code: &str) -> Option<RegisteredBidder> {
        self.bidders.read().get(code).cloned()
    }

    pub fn codes(&self) -> Vec<String> {
        self.bidders.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bidders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bidders.read().is_empty()
    }
}
