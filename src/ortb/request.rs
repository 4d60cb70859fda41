use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level bid request object (OpenRTB 2.x section 3.2.1).
///
/// Must contain at least one impression and a unique request id. The
/// `device` and `regs` objects are carried as opaque JSON since nothing
/// in this crate reads into them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct BidRequest {
    #[builder(setter(into))]
    pub id: String,
    #[builder(default)]
    pub imp: Vec<Imp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub site: Option<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub device: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub user: Option<User>,
    /// Test mode flag, 1 = auctions are not billable
    #[serde(skip_serializing_if = "is_zero")]
    #[builder(default)]
    pub test: i32,
    /// Auction type, 1 = first price, 2 = second price plus
    #[serde(skip_serializing_if = "is_zero")]
    #[builder(default)]
    pub at: i32,
    /// Max time in ms the exchange allows for bids to be received
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub tmax: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub cur: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub bcat: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub badv: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub regs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

/// One ad slot being offered (OpenRTB section 3.2.4). Exactly which of
/// the banner/video/audio/native descriptors are present decides the
/// media type of any bid referencing this imp.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Imp {
    #[builder(setter(into))]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub video: Option<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub audio: Option<Audio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub native: Option<Native>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub tagid: Option<String>,
    #[builder(default)]
    pub bidfloor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub bidfloorcur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub secure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub w: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub h: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub format: Vec<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub pos: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Format {
    #[builder(default)]
    pub w: i32,
    #[builder(default)]
    pub h: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Video {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub mimes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub minduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub maxduration: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub protocols: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub w: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub h: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Audio {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub mimes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub minduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub maxduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Native {
    /// Request payload complying with the Native Ad Specification
    #[builder(default, setter(into))]
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub publisher: Option<Publisher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub publisher: Option<Publisher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Publisher {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub buyeruid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

/// Describes the inventory path upstream of the exchange
/// (OpenRTB section 3.2.13).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub fd: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub pchain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub schain: Option<SupplyChain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

/// Ordered list of intermediaries per the IAB SupplyChain spec.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct SupplyChain {
    #[builder(default, setter(into))]
    pub ver: String,
    /// 1 when every upstream hop is declared in `nodes`
    #[builder(default)]
    pub complete: i32,
    #[builder(default)]
    pub nodes: Vec<SupplyChainNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Builder)]
#[serde(default)]
pub struct SupplyChainNode {
    /// Canonical domain of the advertising system
    #[builder(default, setter(into))]
    pub asi: String,
    /// Seller account id within the advertising system
    #[builder(default, setter(into))]
    pub sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub hp: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub rid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub ext: Option<Value>,
}
