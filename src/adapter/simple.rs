use crate::adapter::error::AdapterError;
use crate::adapter::{
    Adapter, BidderInfo, BidderResponse, BidType, ExtraRequestInfo, Header, RequestData,
    ResponseData, TypedBid, util,
};
use crate::ortb::{BidRequest, BidResponse};
use tracing::trace;

pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";
pub const ACCEPT_JSON: &str = "application/json";

/// Default currency when the remote response does not declare one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Shared base for pass-through OpenRTB bidders: the incoming request is
/// forwarded verbatim as one JSON POST and the response is taken at face
/// value. Roughly half the compiled-in variants are just one of these
/// with a fixed endpoint.
pub struct SimpleAdapter {
    code: String,
    endpoint: String,
    /// Media type stamped on every bid; bidders serving a single format
    /// set this instead of paying for imp-table inference
    default_bid_type: Option<BidType>,
    info: BidderInfo,
}

impl SimpleAdapter {
    pub fn new(
        code: impl Into<String>,
        endpoint: impl Into<String>,
        default_bid_type: Option<BidType>,
        info: BidderInfo,
    ) -> Self {
        Self {
            code: code.into(),
            endpoint: endpoint.into(),
            default_bid_type,
            info,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    fn flatten(&self, request: &BidRequest, response: BidResponse) -> BidderResponse {
        let imp_map = util::build_imp_map(&request.imp);
        let mut bids = Vec::new();

        for seat_bid in response.seatbid {
            for bid in seat_bid.bid {
                let bid_type = self
                    .default_bid_type
                    .unwrap_or_else(|| util::bid_type_from_imp_map(&bid, &imp_map));

                bids.push(TypedBid {
                    video: util::video_meta_for(&bid, bid_type),
                    deal_priority: util::deal_priority_of(&bid),
                    bid,
                    bid_type,
                });
            }
        }

        BidderResponse {
            id: response.id,
            currency: response
                .cur
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            bids,
        }
    }
}

impl Adapter for SimpleAdapter {
    fn make_requests(
        &self,
        request: &BidRequest,
        extra: &ExtraRequestInfo,
    ) -> (Vec<RequestData>, Vec<AdapterError>) {
        let body = match serde_json::to_vec(request) {
            Ok(body) => body,
            Err(e) => return (Vec::new(), vec![AdapterError::marshal(&self.code, e)]),
        };

        let uri = extra
            .endpoint_override
            .clone()
            .unwrap_or_else(|| self.endpoint.clone());

        trace!("Built passthrough request for {} -> {}", self.code, uri);

        let request_data = RequestData {
            method: "POST".to_string(),
            uri,
            body,
            headers: vec![
                Header::new("Content-Type", CONTENT_TYPE_JSON),
                Header::new("Accept", ACCEPT_JSON),
            ],
        };

        (vec![request_data], Vec::new())
    }

    fn make_bids(
        &self,
        request: &BidRequest,
        response: &ResponseData,
    ) -> Result<Option<BidderResponse>, Vec<AdapterError>> {
        match response.status_code {
            204 => return Ok(None),
            200 => {}
            status => return Err(vec![AdapterError::bad_status(&self.code, status)]),
        }

        let parsed: BidResponse = serde_json::from_slice(&response.body)
            .map_err(|e| vec![AdapterError::parse(&self.code, e)])?;

        Ok(Some(self.flatten(request, parsed)))
    }

    fn info(&self) -> BidderInfo {
        self.info.clone()
    }
}
