//! The adapter contract every demand source implements, plus the value
//! types flowing across it.
//!
//! An adapter turns one incoming [`BidRequest`](crate::ortb::BidRequest)
//! into N outgoing HTTP requests ([`RequestData`]) and each bidder HTTP
//! response ([`ResponseData`]) back into typed bids. Adapters never
//! dispatch HTTP themselves; the orchestrator hands produced requests to
//! the shared [`transport`](crate::transport) client.

pub mod error;
pub mod generic;
pub mod simple;
pub mod util;

use crate::adapter::error::AdapterError;
use crate::ortb::{Bid, BidRequest};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Media type assigned to every bid an adapter returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BidType {
    Banner,
    Video,
    Audio,
    Native,
}

/// A single outbound header. Requests carry an ordered header list
/// rather than a map; when the transport applies the list to the wire a
/// later entry replaces an earlier one with the same name, which is how
/// configured custom headers override the standard set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One fully-formed outbound HTTP request. Immutable once produced by
/// `make_requests`.
#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: String,
    pub uri: String,
    pub body: Vec<u8>,
    pub headers: Vec<Header>,
}

/// The raw result of one outbound HTTP round trip. The body is capped
/// by the transport before this struct exists, so adapters may parse it
/// without their own size checks.
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub body: Bytes,
    pub headers: Vec<Header>,
}

/// Video-specific bid metadata carried alongside the raw bid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMeta {
    /// Creative duration in seconds when the bidder declared one
    pub duration: Option<i32>,
    pub primary_category: Option<String>,
}

/// A bid plus the media type the adapter resolved for it. The type must
/// be consistent with the impression the bid references.
#[derive(Debug, Clone)]
pub struct TypedBid {
    pub bid: Bid,
    pub bid_type: BidType,
    pub video: Option<VideoMeta>,
    pub deal_priority: i32,
}

/// Normalized output of one adapter for one auction. Bid order follows
/// the remote response: seat-bids in order, bids within each seat-bid in
/// order.
#[derive(Debug, Clone)]
pub struct BidderResponse {
    /// Response id echoed from the remote payload for out of band
    /// validation by the orchestrator
    pub id: String,
    pub currency: String,
    pub bids: Vec<TypedBid>,
}

/// Whether bids from this adapter keep their seat downstream or get
/// rewritten to the platform label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DemandType {
    #[default]
    Platform,
    Publisher,
}

/// Media capabilities for one channel (site or app).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformInfo {
    pub media_types: Vec<BidType>,
}

/// Declarative capability snapshot an adapter exports to the
/// orchestrator and consent tooling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BidderInfo {
    pub enabled: bool,
    pub maintainer_email: String,
    /// IAB Global Vendor List id used for consent matching
    pub gvl_vendor_id: Option<u32>,
    pub endpoint: String,
    pub site: Option<PlatformInfo>,
    pub app: Option<PlatformInfo>,
    pub demand_type: DemandType,
}

/// Per-call knobs the orchestrator may thread through to an adapter.
#[derive(Debug, Clone, Default)]
pub struct ExtraRequestInfo {
    /// Re-points the adapter at a different endpoint for this call only,
    /// used by ops tooling to target staging mirrors
    pub endpoint_override: Option<String>,
}

/// Contract between the auction orchestrator and one demand source.
///
/// Both methods treat their inputs as immutable: `make_requests` must
/// never mutate the passed request, and any structural change happens on
/// a private copy. `make_bids` returns `Ok(None)` for an empty-bid 204,
/// `Ok(Some(_))` with zero errors on success, or `Err` with at least one
/// error on failure; partial success mixed with errors is not a legal
/// outcome.
pub trait Adapter: Send + Sync {
    fn make_requests(
        &self,
        request: &BidRequest,
        extra: &ExtraRequestInfo,
    ) -> (Vec<RequestData>, Vec<AdapterError>);

    fn make_bids(
        &self,
        request: &BidRequest,
        response: &ResponseData,
    ) -> Result<Option<BidderResponse>, Vec<AdapterError>>;

    fn info(&self) -> BidderInfo;
}
