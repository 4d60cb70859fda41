use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "bidstorm";
const ENDPOINT: &str = "https://east.bidstorm.net/ortb/tne_catalyst";

fn info() -> BidderInfo {
    let display = PlatformInfo {
        media_types: vec![BidType::Banner, BidType::Native],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "noc@bidstorm.net".to_string(),
        gvl_vendor_id: Some(218),
        endpoint: ENDPOINT.to_string(),
        site: Some(display.clone()),
        app: Some(display),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, None, info());
    registry.register(CODE, Arc::new(adapter), info())
}
