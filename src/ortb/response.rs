use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bidder answer to a bid request (OpenRTB section 4.2.1). The `id`
/// echoes the request id and is surfaced so the orchestrator can match
/// responses out of band.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct BidResponse {
    #[builder(setter(into))]
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub seatbid: Vec<SeatBid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub bidid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub cur: Option<String>,
    /// Reason for not bidding when seatbid is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub nbr: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

/// Bids grouped under one buyer seat (OpenRTB section 4.2.2).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct SeatBid {
    #[builder(default)]
    pub bid: Vec<Bid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub seat: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    #[builder(default)]
    pub group: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

/// One offer to buy a specific impression (OpenRTB section 4.2.3).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Bid {
    #[builder(setter(into))]
    pub id: String,
    /// Id of the impression this bid is for
    #[builder(default, setter(into))]
    pub impid: String,
    #[builder(default)]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub adid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub nurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub burl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub lurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub adm: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub adomain: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub crid: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub cat: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub w: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub h: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub dealid: Option<String>,
    /// Creative duration in seconds, video and audio only
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub dur: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}
