use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "adpulse";
const ENDPOINT: &str = "https://rtb.adpulse.com/tne/openrtb2";

/// AdPulse serves display only; every bid is stamped banner up front.
fn info() -> BidderInfo {
    let banner = PlatformInfo {
        media_types: vec![BidType::Banner],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "adapters@adpulse.com".to_string(),
        gvl_vendor_id: Some(312),
        endpoint: ENDPOINT.to_string(),
        site: Some(banner.clone()),
        app: Some(banner),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Banner), info());
    registry.register(CODE, Arc::new(adapter), info())
}
