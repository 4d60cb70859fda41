use crate::adapter::BidType;
use crate::ortb::{Bid, BidRequest, Imp};
use std::collections::HashMap;

/// Builds an impression lookup table keyed by imp id. On duplicate ids
/// the last imp wins.
pub fn build_imp_map(imps: &[Imp]) -> HashMap<&str, &Imp> {
    let mut map = HashMap::with_capacity(imps.len());
    for imp in imps {
        map.insert(imp.id.as_str(), imp);
    }
    map
}

/// Resolves the media type for a bid from the impression it references.
///
/// When the imp declares several formats the priority is
/// video > banner > audio > native: video is the highest-value,
/// strictest-format placement and is never silently downgraded. A bid
/// whose impid is not in the map falls back to banner.
pub fn bid_type_from_imp_map(bid: &Bid, imp_map: &HashMap<&str, &Imp>) -> BidType {
    let Some(imp) = imp_map.get(bid.impid.as_str()) else {
        return BidType::Banner;
    };

    if imp.video.is_some() {
        BidType::Video
    } else if imp.banner.is_some() {
        BidType::Banner
    } else if imp.audio.is_some() {
        BidType::Audio
    } else if imp.native.is_some() {
        BidType::Native
    } else {
        BidType::Banner
    }
}

/// Convenience that builds the imp table then resolves one bid. Prefer
/// [`build_imp_map`] + [`bid_type_from_imp_map`] when typing many bids
/// against the same request.
pub fn bid_type_for(bid: &Bid, request: &BidRequest) -> BidType {
    let imp_map = build_imp_map(&request.imp);
    bid_type_from_imp_map(bid, &imp_map)
}

/// Deal priority a bidder declared on the bid ext, 0 when absent.
pub fn deal_priority_of(bid: &Bid) -> i32 {
    bid.ext
        .as_ref()
        .and_then(|ext| ext.get("dealpriority"))
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0) as i32
}

/// Video metadata for a typed bid; only video bids carry one.
pub fn video_meta_for(bid: &Bid, bid_type: BidType) -> Option<crate::adapter::VideoMeta> {
    if bid_type != BidType::Video {
        return None;
    }

    Some(crate::adapter::VideoMeta {
        duration: bid.dur,
        primary_category: bid.cat.first().cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ortb::{Audio, Banner, Native, Video};

    fn imp(id: &str) -> Imp {
        Imp {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn bid_for(impid: &str) -> Bid {
        Bid {
            id: "b1".to_string(),
            impid: impid.to_string(),
            price: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_imp_map_last_wins_on_duplicate_id() {
        let mut first = imp("i1");
        first.bidfloor = 1.0;
        let mut second = imp("i1");
        second.bidfloor = 2.0;

        let imps = vec![first, second, imp("i2")];
        let map = build_imp_map(&imps);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("i1").unwrap().bidfloor, 2.0);
    }

    #[test]
    fn test_video_beats_every_other_format() {
        let mut i = imp("i1");
        i.video = Some(Video::default());
        i.banner = Some(Banner::default());
        i.audio = Some(Audio::default());
        i.native = Some(Native::default());

        let imps = vec![i];
        let map = build_imp_map(&imps);

        assert_eq!(bid_type_from_imp_map(&bid_for("i1"), &map), BidType::Video);
    }

    #[test]
    fn test_priority_order_banner_audio_native() {
        let mut banner_audio = imp("i1");
        banner_audio.banner = Some(Banner::default());
        banner_audio.audio = Some(Audio::default());

        let mut audio_native = imp("i2");
        audio_native.audio = Some(Audio::default());
        audio_native.native = Some(Native::default());

        let mut native_only = imp("i3");
        native_only.native = Some(Native::default());

        let imps = vec![banner_audio, audio_native, native_only];
        let map = build_imp_map(&imps);

        assert_eq!(bid_type_from_imp_map(&bid_for("i1"), &map), BidType::Banner);
        assert_eq!(bid_type_from_imp_map(&bid_for("i2"), &map), BidType::Audio);
        assert_eq!(bid_type_from_imp_map(&bid_for("i3"), &map), BidType::Native);
    }

    #[test]
    fn test_unknown_impid_defaults_to_banner() {
        let imps = vec![imp("i1")];
        let map = build_imp_map(&imps);

        assert_eq!(bid_type_from_imp_map(&bid_for("missing"), &map), BidType::Banner);
    }

    #[test]
    fn test_formatless_imp_defaults_to_banner() {
        let imps = vec![imp("i1")];
        let map = build_imp_map(&imps);

        assert_eq!(bid_type_from_imp_map(&bid_for("i1"), &map), BidType::Banner);
    }

    #[test]
    fn test_deal_priority_read_from_ext() {
        let mut bid = bid_for("i1");
        assert_eq!(deal_priority_of(&bid), 0);

        bid.ext = Some(serde_json::json!({"dealpriority": 7}));
        assert_eq!(deal_priority_of(&bid), 7);

        bid.ext = Some(serde_json::json!({"dealpriority": "high"}));
        assert_eq!(deal_priority_of(&bid), 0, "non numeric priority ignored");
    }

    #[test]
    fn test_video_meta_only_for_video_bids() {
        let mut bid = bid_for("i1");
        bid.dur = Some(30);
        bid.cat = vec!["IAB1".to_string()];

        let meta = video_meta_for(&bid, BidType::Video).unwrap();
        assert_eq!(meta.duration, Some(30));
        assert_eq!(meta.primary_category.as_deref(), Some("IAB1"));

        assert!(video_meta_for(&bid, BidType::Banner).is_none());
    }

    #[test]
    fn test_convenience_delegates_to_map() {
        let mut i = imp("i1");
        i.video = Some(Video::default());

        let req = BidRequest {
            id: "r1".to_string(),
            imp: vec![i],
            ..Default::default()
        };

        assert_eq!(bid_type_for(&bid_for("i1"), &req), BidType::Video);
    }
}
