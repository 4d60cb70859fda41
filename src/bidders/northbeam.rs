use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "northbeam";
const ENDPOINT: &str = "https://x.northbeam.ads/rtb/bid?src=tne";

fn info() -> BidderInfo {
    let banner = PlatformInfo {
        media_types: vec![BidType::Banner],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "integrations@northbeam.ads".to_string(),
        gvl_vendor_id: Some(433),
        endpoint: ENDPOINT.to_string(),
        site: Some(banner),
        app: None,
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Banner), info());
    registry.register(CODE, Arc::new(adapter), info())
}
