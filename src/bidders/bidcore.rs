use crate::adapter::simple::SimpleAdapter;
use crate::adapter::{BidType, BidderInfo, DemandType, PlatformInfo};
use crate::registry::{RegistryError, StaticRegistry};
use std::sync::Arc;

const CODE: &str = "bidcore";
const ENDPOINT: &str = "https://exchange.bidcore.io/rtb/tne";

/// Full-format exchange; bid types are inferred from the impression
/// each bid references.
fn info() -> BidderInfo {
    let all = PlatformInfo {
        media_types: vec![
            BidType::Banner,
            BidType::Video,
            BidType::Audio,
            BidType::Native,
        ],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "rtb-ops@bidcore.io".to_string(),
        gvl_vendor_id: Some(1047),
        endpoint: ENDPOINT.to_string(),
        site: Some(all.clone()),
        app: Some(all),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    let adapter = SimpleAdapter::new(CODE, ENDPOINT, None, info());
    registry.register(CODE, Arc::new(adapter), info())
}
