use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "quantumads";
const ENDPOINT: &str = "https://bid.quantumads.co/tne";

fn info() -> BidderInfo {
    BidderInfo {
        enabled: true,
        maintainer_email: "supply@quantumads.co".to_string(),
        gvl_vendor_id: Some(764),
        endpoint: ENDPOINT.to_string(),
        // app-only DSP
        site: None,
        app: Some(PlatformInfo {
            media_types: vec![BidType::Banner, BidType::Video, BidType::Native],
        }),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, None, info());
    registry.register(CODE, Arc::new(adapter), info())
}
