use crate::adapter::error::AdapterError;
use crate::adapter::simple::{DEFAULT_CURRENCY, SimpleAdapter};
use crate::adapter::{
    Adapter, BidType, BidderInfo, BidderResponse, DemandType, ExtraRequestInfo, PlatformInfo,
    RequestData, ResponseData, TypedBid, util,
};
use crate::ortb::{Bid, BidRequest, BidResponse};
use crate::registry::{RegistryError, StaticRegistry};
use std::str::FromStr;
use std::sync::Arc;

const CODE: &str = "pixelwave";
const ENDPOINT: &str = "https://gateway.pixelwave.io/rtb2/bid";

/// Pixelwave answers mixed-format imps and declares the creative type
/// itself in `bid.ext.mediaType`, which beats imp-table inference when
/// present. Requests are plain pass-through.
pub struct PixelwaveAdapter {
    base: SimpleAdapter,
}

impl PixelwaveAdapter {
    pub fn new() -> Self {
        Self {
            base: SimpleAdapter::new(CODE, ENDPOINT, None, info()),
        }
    }

    fn declared_type(bid: &Bid) -> Option<BidType> {
        let declared = bid.ext.as_ref()?.get("mediaType")?.as_str()?;
        BidType::from_str(declared).ok()
    }
}

impl Default for PixelwaveAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for PixelwaveAdapter {
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
            for bid in seat_bid.bid {
                let bid_type = Self::declared_type(&bid)
                    .unwrap_or_else(|| util::bid_type_from_imp_map(&bid, &imp_map));

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
        media_types: vec![BidType::Banner, BidType::Video, BidType::Native],
    };

    BidderInfo {
        enabled: true,
        maintainer_email: "exchange-team@pixelwave.io".to_string(),
        gvl_vendor_id: Some(655),
        endpoint: ENDPOINT.to_string(),
        site: Some(mixed.clone()),
        app: Some(mixed),
        demand_type: DemandType::Platform,
    }
}

pub fn register(registry: &StaticRegistry) -> Result<(), RegistryError> {
    registry.register(CODE, Arc::new(PixelwaveAdapter::new()), info())
}
