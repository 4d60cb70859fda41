use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "mediafuse";
const ENDPOINT: &str = "https://ssp.mediafuse.net/openrtb/2.5/tne";

fn info() -> BidderInfo {
    BidderInfo {
        enabled: true,
        maintainer_email: "exchange@mediafuse.net".to_string(),
        gvl_vendor_id: Some(571),
        endpoint: ENDPOINT.to_string(),
        site: Some(PlatformInfo {
            media_types: vec![BidType::Banner, BidType::Video],
        }),
        // app inventory not yet certified with this partner
        app: None,
        demand_type: DemandType::Publisher,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, None, info());
    registry.register(CODE, Arc::new(adapter), info())
}
