//! Declarative bidder configuration as stored in the key-value store.
//!
//! One JSON document per bidder code under the `tne_catalyst:bidders`
//! hash realizes a full adapter through
//! [`GenericAdapter`](crate::adapter::generic::GenericAdapter). Parsing
//! is lenient: every field has a default so partial documents written by
//! ops tooling still load.

use crate::adapter::{BidType, DemandType};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::debug;
use url::Url;

/// Lifecycle state of a configured bidder. Only `active` and `testing`
/// receive traffic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BidderStatus {
    Active,
    Testing,
    #[default]
    Inactive,
    Disabled,
}

/// How the outbound request authenticates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AuthType {
    Basic,
    Bearer,
    Header,
    #[default]
    None,
}

/// Lenient parse for the auth type so a config written for a newer
/// build never breaks an older one: unknown values degrade to `none`.
fn auth_type_lenient<'de, D>(deserializer: D) -> Result<AuthType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(AuthType::from_str(&raw).unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub method: String,
    pub timeout_ms: u64,
    /// Value sent in the X-OpenRTB-Version header
    pub protocol_version: String,
    #[serde(deserialize_with = "auth_type_lenient")]
    pub auth_type: AuthType,
    pub auth_username: String,
    pub auth_password: String,
    pub auth_token: String,
    pub auth_header_name: String,
    pub auth_header_value: String,
    /// Applied after the standard set, overriding on name collision
    pub custom_headers: HashMap<String, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: "POST".to_string(),
            timeout_ms: 300,
            protocol_version: "2.5".to_string(),
            auth_type: AuthType::None,
            auth_username: String::new(),
            auth_password: String::new(),
            auth_token: String::new(),
            auth_header_name: String::new(),
            auth_header_value: String::new(),
            custom_headers: HashMap::new(),
        }
    }
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub site: bool,
    pub app: bool,
    /// Media type names, matched case-insensitively against the
    /// canonical set
    pub media_types: Vec<String>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            site: true,
            app: true,
            media_types: vec!["banner".to_string()],
        }
    }
}

impl Capabilities {
    /// Parses the configured media type names, silently dropping ones
    /// this build does not know.
    pub fn bid_types(&self) -> Vec<BidType> {
        self.media_types
            .iter()
            .filter_map(|name| match BidType::from_str(name) {
                Ok(t) => Some(t),
                Err(_) => {
                    debug!("Ignoring unknown media type in config: {}", name);
                    None
                }
            })
            .collect()
    }
}

/// Descriptive rate ceilings. Carried for ops tooling; nothing in this
/// crate enforces them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimits {
    pub qps_limit: u32,
    pub daily_limit: u64,
    pub concurrent_limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchainNodeConfig {
    pub asi: String,
    pub sid: String,
    pub hp: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchainAugment {
    pub enabled: bool,
    pub nodes: Vec<SchainNodeConfig>,
    /// Overrides the chain's complete flag when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<i32>,
    /// Overrides the chain version when non-empty; a chain created from
    /// scratch defaults to "1.0"
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestTransform {
    /// Merged into request.ext, template entries win
    pub request_ext: Map<String, Value>,
    /// Merged into every imp.ext
    pub imp_ext: Map<String, Value>,
    /// Merged into site.ext when a site object is present
    pub site_ext: Map<String, Value>,
    /// Merged into user.ext when a user object is present
    pub user_ext: Map<String, Value>,
    /// Seat this bidder's bids are attributed to downstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub schain_augment: SchainAugment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTransform {
    /// Multiplier applied to bid prices; 0 and 1 mean "leave as is"
    pub price_adjustment: f64,
    /// Maps a bidder-declared creative type string to a canonical media
    /// type name, consulted before imp-table inference
    pub creative_type_remap: HashMap<String, String>,
    /// Accepted for forward compatibility; this build does not extract
    /// durations from VAST markup
    pub extract_vast_duration: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BidderConfig {
    pub bidder_code: String,
    pub name: String,
    pub description: String,
    pub endpoint: EndpointConfig,
    pub capabilities: Capabilities,
    pub rate_limits: RateLimits,
    pub request_transform: RequestTransform,
    pub response_transform: ResponseTransform,
    pub status: BidderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gvl_vendor_id: Option<u32>,
    pub priority: i32,
    pub maintainer_email: String,
    pub allowed_publishers: Vec<String>,
    pub blocked_publishers: Vec<String>,
    pub allowed_countries: Vec<String>,
    pub blocked_countries: Vec<String>,
    pub demand_type: DemandType,
}

impl BidderConfig {
    /// True when the bidder should receive auction traffic.
    pub fn enabled(&self) -> bool {
        matches!(self.status, BidderStatus::Active | BidderStatus::Testing)
    }

    /// Validates the parts of the config a live adapter depends on.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bidder_code.is_empty() {
            bail!("bidder_code must not be empty");
        }

        if self.endpoint.url.is_empty() {
            bail!("endpoint.url must not be empty for {}", self.bidder_code);
        }

        Url::parse(&self.endpoint.url).map_err(|e| {
            anyhow::anyhow!(
                "invalid endpoint url '{}' for {}: {}",
                self.endpoint.url,
                self.bidder_code,
                e
            )
        })?;

        if self.endpoint.timeout_ms == 0 {
            bail!("endpoint.timeout_ms must be positive for {}", self.bidder_code);
        }

        Ok(())
    }
}
