use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "admesh";
const ENDPOINT: &str = "https://audio.admesh.fm/openrtb2/bid";

/// Audio-only podcast and streaming demand.
fn info() -> BidderInfo {
    let audio = PlatformInfo {
        media_types: vec![BidType::Audio],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "rtb@admesh.fm".to_string(),
        gvl_vendor_id: Some(1302),
        endpoint: ENDPOINT.to_string(),
        site: Some(audio.clone()),
        app: Some(audio),
        demand_type: DemandType::Publisher,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Audio), info());
    registry.register(CODE, Arc::new(adapter), info())
}
