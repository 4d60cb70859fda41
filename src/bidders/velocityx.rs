use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "velocityx";
const ENDPOINT: &str = "https://rtb.velocityx.tv/openrtb2/auction";

/// CTV demand, video only.
fn info() -> BidderInfo {
    let video = PlatformInfo {
        media_types: vec![BidType::Video],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "ctv@velocityx.tv".to_string(),
        gvl_vendor_id: Some(1510),
        endpoint: ENDPOINT.to_string(),
        site: None,
        app: Some(video),
        demand_type: DemandType::Publisher,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Video), info());
    registry.register(CODE, Arc::new(adapter), info())
}
