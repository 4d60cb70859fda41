use crate::adapter::error::AdapterError;
use crate::adapter::simple::DEFAULT_CURRENCY;
use crate::adapter::{BidType, BidderResponse, ResponseData, TypedBid, util};
use crate::config::ResponseTransform;
use crate::ortb::{Bid, BidRequest, BidResponse};
use std::str::FromStr;

const BODY_EXCERPT_BYTES: usize = 256;

/// Turns one remote response into typed bids under the configured
/// response transform. Status policy: 204 means no bids, 400 carries a
/// body excerpt back for debugging, any other non-200 is a plain bad
/// status.
pub(super) fn handle_response(
    code: &str,
    request: &BidRequest,
    response: &ResponseData,
    transform: &ResponseTransform,
) -> Result<Option<BidderResponse>, Vec<AdapterError>> {
    match response.status_code {
        204 => return Ok(None),
        400 => {
            return Err(vec![AdapterError::bad_request(
                code,
                &body_excerpt(&response.body),
            )]);
        }
        200 => {}
        status => return Err(vec![AdapterError::bad_status(code, status)]),
    }

    let parsed: BidResponse = serde_json::from_slice(&response.body)
        .map_err(|e| vec![AdapterError::parse(code, e)])?;

    let imp_map = util::build_imp_map(&request.imp);
    let adjustment = transform.price_adjustment;
    let adjust = adjustment != 0.0 && adjustment != 1.0;

    let mut bids = Vec::new();
    for seat_bid in parsed.seatbid {
        for mut bid in seat_bid.bid {
            if adjust {
                bid.price *= adjustment;
            }

            let bid_type = remapped_type(&bid, transform)
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

/// Resolves a bid type through the configured creative-type remap. The
/// remote's own vocabulary arrives in `bid.ext.mediaType`; a hit in the
/// remap table short-circuits imp-table inference.
fn remapped_type(bid: &Bid, transform: &ResponseTransform) -> Option<BidType> {
    if transform.creative_type_remap.is_empty() {
        return None;
    }

    let declared = bid.ext.as_ref()?.get("mediaType")?.as_str()?;
    let canonical = transform.creative_type_remap.get(declared)?;

    BidType::from_str(canonical).ok()
}

fn body_excerpt(body: &[u8]) -> String {
    let end = body.len().min(BODY_EXCERPT_BYTES);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
