use crate::adapter::error::AdapterError;
use crate::adapter::simple::{DEFAULT_CURRENCY, SimpleAdapter};
use crate::adapter::{
    Adapter, BidType, BidderInfo, BidderResponse, DemandType, ExtraRequestInfo, PlatformInfo,
    RequestData, ResponseData, TypedBid, util,
};
use crate::ortb::{BidRequest, BidResponse};
use crate::registry::{RegistryError, StaticRegistry};
use std::str::FromStr;
use std::sync::Arc;

const CODE: &str = "trafficlane";
const ENDPOINT: &str = "https://bid.trafficlane.com/v1/openrtb";

/// Trafficlane responds with the creative type in the seat-bid ext
/// rather than per bid, one format per seat. Bids in a seat without a
/// declaration fall back to the imp table.
pub struct TrafficlaneAdapter {
    base: SimpleAdapter,
}

impl TrafficlaneAdapter {
    pub fn new() -> Self {
        Self {
            base: SimpleAdapter::new(CODE, ENDPOINT, None, info()),
        }
    }
}

impl Default for TrafficlaneAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for TrafficlaneAdapter {
    fn make_requests(
        &self,
        request: &BidRequest,
        extra: &ExtraRequestInfo,
    ) -> (Vec<RequestData>, Vec<AdapterError>) {
        self.base.make_requests(request, extra)
    }

    fn make_bids(
        &self,
        request: &BidRequest,
        response: &ResponseData,
    ) -> Result<Option<BidderResponse>, Vec<AdapterError>> {
        match response.status_code {
            204 => return Ok(None),
            200 => {}
            status => return Err(vec![AdapterError::bad_status(CODE, status)]),
        }

        let parsed: BidResponse = serde_json::from_slice(&response.body)
            .map_err(|e| vec![AdapterError::parse(CODE, e)])?;

        let imp_map = util::build_imp_map(&request.imp);
        let mut bids = Vec::new();

        for seat_bid in parsed.seatbid {
            let seat_type = seat_bid
                .ext
                .as_ref()
                .and_then(|ext| ext.get("mediaType"))
                .and_then(|v| v.as_str())
                .and_then(|s| BidType::from_str(s).ok());

            for bid in seat_bid.bid {
                let bid_type =
                    seat_type.unwrap_or_else(|| util::bid_type_from_imp_map(&bid, &imp_map));

                bids.push(TypedBid {
                    video: util::video_meta_for(&bid, bid_type),
                    deal_priority: util::deal_priority_of(&bid),
                    bid,
                    bid_type,
                });
            }
        }

        Ok(Some(BidderResponse {
            id: parsed.id,
            currency: parsed
                .cur
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            bids,
        }))
    }

    fn info(&self) -> BidderInfo {
        info()
    }
}

fn info() -> BidderInfo {
    let mixed = PlatformInfo {
        media_types: vec![BidType::Banner, BidType::Video, BidType::Audio],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "platform@trafficlane.com".to_string(),
        gvl_vendor_id: Some(972),
        endpoint: ENDPOINT.to_string(),
        site: Some(mixed.clone()),
        app: Some(mixed),
        demand_type: DemandType::Publisher,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    registry.register(CODE, Arc::new(TrafficlaneAdapter::new()), info())
}
