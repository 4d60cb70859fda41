use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "skyreach";
const ENDPOINT: &str = "https://native.skyreach.media/v2/bid";

fn info() -> BidderInfo {
    let native = PlatformInfo {
        media_types: vec![BidType::Native],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "partners@skyreach.media".to_string(),
        gvl_vendor_id: None,
        endpoint: ENDPOINT.to_string(),
        site: Some(native.clone()),
        app: Some(native),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, Some(BidType::Native), info());
    registry.register(CODE, Arc::new(adapter), info())
}
