use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "rtbnova";
const ENDPOINT: &str = "https://video.rtbnova.tv/bid/openrtb";

/// Instream video specialist. Everything it returns is video, so the
/// default type skips imp-table inference entirely.
fn info() -> BidderInfo {
    let video = PlatformInfo {
        media_types: vec![BidType::Video],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "demand@rtbnova.tv".to_string(),
        gvl_vendor_id: Some(889),
        endpoint: ENDPOINT.to_string(),
        site: Some(video.clone()),
        app: Some(video),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Video), info());
    registry.register(CODE, Arc::new(adapter), info())
}
