//! Config-driven adapter: realizes an arbitrary OpenRTB bidder from a
//! declarative [`BidderConfig`].

mod request;
mod response;

use crate::adapter::error::AdapterError;
use crate::adapter::{
    Adapter, BidderInfo, BidderResponse, DemandType, ExtraRequestInfo, PlatformInfo, RequestData,
    ResponseData,
};
use crate::config::BidderConfig;
use crate::ortb::BidRequest;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// A live adapter whose behavior is entirely derived from its config.
///
/// The config pointer is the only mutable state: the dynamic registry's
/// refresh is the single writer, auction threads are the readers. Every
/// method pins a snapshot by cloning the `Arc` at entry, so a
/// concurrent [`update_config`](Self::update_config) can never tear a
/// call in progress; callers see either the old config or the new one
/// in full.
pub struct GenericAdapter {
    code: String,
    config: RwLock<Arc<BidderConfig>>,
}

impl GenericAdapter {
    pub fn new(config: BidderConfig) -> Self {
        Self {
            code: config.bidder_code.clone(),
            config: RwLock::new(Arc::new(config)),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Pins the current config. The returned snapshot stays coherent
    /// for as long as the caller holds it.
    pub fn config(&self) -> Arc<BidderConfig> {
        self.config.read().clone()
    }

    /// Atomically swaps in a new config. Callers already inside a
    /// method keep the snapshot they pinned at entry.
    pub fn update_config(&self, config: BidderConfig) {
        *self.config.write() = Arc::new(config);
    }

    /// Per-call transport timeout from the endpoint config.
    pub fn timeout(&self) -> Duration {
        self.config().endpoint.timeout()
    }

    pub fn demand_type(&self) -> DemandType {
        self.config().demand_type
    }

    /// Seat the orchestrator should attribute this bidder's bids to
    /// when it assembles the final seat-bid list. Not applied to the
    /// outbound request; attribution is a response-side concern owned
    /// by the caller.
    pub fn seat(&self) -> Option<String> {
        self.config().request_transform.seat.clone()
    }

    /// Publisher gating: the blocked list wins outright, then a
    /// non-empty allow list requires membership.
    pub fn can_bid_for_publisher(&self, publisher_id: &str) -> bool {
        let config = self.config();

        if config.blocked_publishers.iter().any(|p| p == publisher_id) {
            return false;
        }

        if !config.allowed_publishers.is_empty() {
            return config.allowed_publishers.iter().any(|p| p == publisher_id);
        }

        true
    }

    /// Country gating, same precedence as publishers but
    /// case-insensitive.
    pub fn can_bid_for_country(&self, country: &str) -> bool {
        let config = self.config();

        if config
            .blocked_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
        {
            return false;
        }

        if !config.allowed_countries.is_empty() {
            return config
                .allowed_countries
                .iter()
                .any(|c| c.eq_ignore_ascii_case(country));
        }

        true
    }
}

impl Adapter for GenericAdapter {
    fn make_requests(
        &self,
        request: &BidRequest,
        extra: &ExtraRequestInfo,
    ) -> (Vec<RequestData>, Vec<AdapterError>) {
        let config = self.config();

        let mut outbound = request.clone();
        request::apply_transforms(&mut outbound, &config.request_transform);

        let body = match serde_json::to_vec(&outbound) {
            Ok(body) => body,
            Err(e) => return (Vec::new(), vec![AdapterError::marshal(&self.code, e)]),
        };

        let uri = extra
            .endpoint_override
            .clone()
            .unwrap_or_else(|| config.endpoint.url.clone());

        let method = if config.endpoint.method.is_empty() {
            "POST".to_string()
        } else {
            config.endpoint.method.clone()
        };

        let request_data = RequestData {
            method,
            uri,
            body,
            headers: request::build_headers(&config.endpoint),
        };

        (vec![request_data], Vec::new())
    }

    fn make_bids(
        &self,
        request: &BidRequest,
        response: &ResponseData,
    ) -> Result<Option<BidderResponse>, Vec<AdapterError>> {
        let config = self.config();
        response::handle_response(&self.code, request, response, &config.response_transform)
    }

    fn info(&self) -> BidderInfo {
        let config = self.config();
        let platform = PlatformInfo {
            media_types: config.capabilities.bid_types(),
        };

        BidderInfo {
            enabled: config.enabled(),
            maintainer_email: config.maintainer_email.clone(),
            gvl_vendor_id: config.gvl_vendor_id,
            endpoint: config.endpoint.url.clone(),
            site: config.capabilities.site.then(|| platform.clone()),
            app: config.capabilities.app.then_some(platform),
            demand_type: config.demand_type,
        }
    }
}
