use crate::adapter::Header;
use crate::adapter::simple::{ACCEPT_JSON, CONTENT_TYPE_JSON};
use crate::config::{AuthType, EndpointConfig, RequestTransform, SchainAugment};
use crate::ortb::{BidRequest, SupplyChain, SupplyChainNode};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value};
use tracing::trace;

/// Applies the configured transforms to an outbound request copy, in
/// fixed order: request ext, per-imp ext, site ext, user ext, then
/// supply chain augmentation. The caller owns `request` outright (it is
/// already a private clone), so nothing here is visible to the inbound
/// payload.
pub(super) fn apply_transforms(request: &mut BidRequest, transform: &RequestTransform) {
    merge_ext(&mut request.ext, &transform.request_ext);

    if !transform.imp_ext.is_empty() {
        for imp in &mut request.imp {
            merge_ext(&mut imp.ext, &transform.imp_ext);
        }
    }

    if let Some(site) = request.site.as_mut() {
        merge_ext(&mut site.ext, &transform.site_ext);
    }

    if let Some(user) = request.user.as_mut() {
        merge_ext(&mut user.ext, &transform.user_ext);
    }

    augment_schain(request, &transform.schain_augment);
}

/// Merges a config template into one `ext` payload. Template entries
/// win over existing keys; keys outside the template are preserved. An
/// absent ext becomes the template object; an ext that is not a JSON
/// object is left untouched so non-standard upstream payloads survive.
fn merge_ext(ext: &mut Option<Value>, template: &Map<String, Value>) {
    if template.is_empty() {
        return;
    }

    match ext {
        None => *ext = Some(Value::Object(template.clone())),
        Some(Value::Object(existing)) => {
            for (key, value) in template {
                existing.insert(key.clone(), value.clone());
            }
        }
        Some(_) => trace!("ext is not an object, preserving as received"),
    }
}

fn augment_schain(request: &mut BidRequest, augment: &SchainAugment) {
    if !augment.enabled || augment.nodes.is_empty() {
        return;
    }

    let mut source = request.source.take().unwrap_or_default();

    let mut chain = source.schain.take().unwrap_or_else(|| SupplyChain {
        ver: if augment.version.is_empty() {
            "1.0".to_string()
        } else {
            augment.version.clone()
        },
        complete: 1,
        nodes: Vec::new(),
        ext: None,
    });

    if let Some(complete) = augment.complete {
        chain.complete = complete;
    }

    if !augment.version.is_empty() {
        chain.ver = augment.version.clone();
    }

    for node in &augment.nodes {
        chain.nodes.push(SupplyChainNode {
            asi: node.asi.clone(),
            sid: node.sid.clone(),
            hp: Some(node.hp),
            rid: node.rid.clone(),
            name: node.name.clone(),
            domain: node.domain.clone(),
            ext: node.ext.clone(),
        });
    }

    source.schain = Some(chain);
    request.source = Some(source);
}

/// Builds the outbound header list: the standard set, the protocol
/// version, auth, then configured customs. Customs come last so they
/// override anything earlier when the transport applies the list.
pub(super) fn build_headers(endpoint: &EndpointConfig) -> Vec<Header> {
    let mut headers = vec![
        Header::new("Content-Type", CONTENT_TYPE_JSON),
        Header::new("Accept", ACCEPT_JSON),
    ];

    if !endpoint.protocol_version.is_empty() {
        headers.push(Header::new("X-OpenRTB-Version", &endpoint.protocol_version));
    }

    match endpoint.auth_type {
        AuthType::Basic if !endpoint.auth_username.is_empty() => {
            let credentials = BASE64.encode(format!(
                "{}:{}",
                endpoint.auth_username, endpoint.auth_password
            ));
            headers.push(Header::new("Authorization", format!("Basic {credentials}")));
        }
        AuthType::Bearer if !endpoint.auth_token.is_empty() => {
            headers.push(Header::new(
                "Authorization",
                format!("Bearer {}", endpoint.auth_token),
            ));
        }
        AuthType::Header
            if !endpoint.auth_header_name.is_empty() && !endpoint.auth_header_value.is_empty() =>
        {
            headers.push(Header::new(
                &endpoint.auth_header_name,
                &endpoint.auth_header_value,
            ));
        }
        _ => {}
    }

    for (name, value) in &endpoint.custom_headers {
        headers.push(Header::new(name, value));
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchainNodeConfig;
    use crate::ortb::{Imp, Site, Source, User};
    use serde_json::json;

    fn template(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn request_with_imp() -> BidRequest {
        BidRequest {
            id: "r1".to_string(),
            imp: vec![
                Imp {
                    id: "i1".to_string(),
                    ..Default::default()
                },
                Imp {
                    id: "i2".to_string(),
                    ext: Some(json!({"position": "footer"})),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_into_absent_ext_creates_object() {
        let mut ext = None;
        merge_ext(&mut ext, &template(&[("partner", json!("apex"))]));

        assert_eq!(ext, Some(json!({"partner": "apex"})));
    }

    #[test]
    fn test_merge_template_wins_but_preserves_other_keys() {
        let mut ext = Some(json!({"partner": "old", "keep": 1}));
        merge_ext(
            &mut ext,
            &template(&[("partner", json!("new")), ("added", json!(true))]),
        );

        assert_eq!(ext, Some(json!({"partner": "new", "keep": 1, "added": true})));
    }

    #[test]
    fn test_merge_empty_template_is_noop() {
        let mut ext = Some(json!({"keep": 1}));
        merge_ext(&mut ext, &Map::new());

        assert_eq!(ext, Some(json!({"keep": 1})));
    }

    #[test]
    fn test_merge_preserves_non_object_ext() {
        let mut ext = Some(json!([1, 2, 3]));
        merge_ext(&mut ext, &template(&[("partner", json!("apex"))]));

        assert_eq!(ext, Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_imp_ext_merged_per_impression() {
        let mut req = request_with_imp();
        let transform = RequestTransform {
            imp_ext: template(&[("placement", json!(7))]),
            ..Default::default()
        };

        apply_transforms(&mut req, &transform);

        assert_eq!(req.imp[0].ext, Some(json!({"placement": 7})));
        assert_eq!(
            req.imp[1].ext,
            Some(json!({"position": "footer", "placement": 7}))
        );
    }

    #[test]
    fn test_site_and_user_ext_only_when_present() {
        let mut req = request_with_imp();
        let transform = RequestTransform {
            site_ext: template(&[("sid", json!("s"))]),
            user_ext: template(&[("uid", json!("u"))]),
            ..Default::default()
        };

        apply_transforms(&mut req, &transform);
        assert!(req.site.is_none(), "no site object should be created");
        assert!(req.user.is_none(), "no user object should be created");

        req.site = Some(Site::default());
        req.user = Some(User::default());
        apply_transforms(&mut req, &transform);

        assert_eq!(req.site.unwrap().ext, Some(json!({"sid": "s"})));
        assert_eq!(req.user.unwrap().ext, Some(json!({"uid": "u"})));
    }

    fn augment_with_node() -> SchainAugment {
        SchainAugment {
            enabled: true,
            nodes: vec![SchainNodeConfig {
                asi: "nexusengine.com".to_string(),
                sid: "nexus-001".to_string(),
                hp: 1,
                ..Default::default()
            }],
            complete: None,
            version: "1.0".to_string(),
        }
    }

    #[test]
    fn test_schain_created_on_empty_source() {
        let mut req = request_with_imp();
        augment_schain(&mut req, &augment_with_node());

        let chain = req.source.unwrap().schain.unwrap();
        assert_eq!(chain.ver, "1.0");
        assert_eq!(chain.complete, 1);
        assert_eq!(chain.nodes.len(), 1);
        assert_eq!(chain.nodes[0].asi, "nexusengine.com");
        assert_eq!(chain.nodes[0].sid, "nexus-001");
        assert_eq!(chain.nodes[0].hp, Some(1));
    }

    #[test]
    fn test_schain_append_preserves_existing_nodes_in_order() {
        let mut req = request_with_imp();
        req.source = Some(Source {
            schain: Some(SupplyChain {
                ver: "1.0".to_string(),
                complete: 1,
                nodes: vec![SupplyChainNode {
                    asi: "publisher.com".to_string(),
                    sid: "pub-001".to_string(),
                    hp: Some(1),
                    ..Default::default()
                }],
                ext: None,
            }),
            ..Default::default()
        });

        augment_schain(&mut req, &augment_with_node());

        let chain = req.source.unwrap().schain.unwrap();
        assert_eq!(chain.nodes.len(), 2);
        assert_eq!(chain.nodes[0].asi, "publisher.com");
        assert_eq!(chain.nodes[1].asi, "nexusengine.com");
    }

    #[test]
    fn test_schain_template_overrides_complete_and_version() {
        let mut req = request_with_imp();
        req.source = Some(Source {
            schain: Some(SupplyChain {
                ver: "1.0".to_string(),
                complete: 1,
                ..Default::default()
            }),
            ..Default::default()
        });

        let mut augment = augment_with_node();
        augment.complete = Some(0);
        augment.version = "1.1".to_string();

        augment_schain(&mut req, &augment);

        let chain = req.source.unwrap().schain.unwrap();
        assert_eq!(chain.complete, 0);
        assert_eq!(chain.ver, "1.1");
    }

    #[test]
    fn test_disabled_or_empty_augment_creates_nothing() {
        let mut req = request_with_imp();

        let mut disabled = augment_with_node();
        disabled.enabled = false;
        augment_schain(&mut req, &disabled);
        assert!(req.source.is_none());

        let empty = SchainAugment {
            enabled: true,
            ..Default::default()
        };
        augment_schain(&mut req, &empty);
        assert!(req.source.is_none());
    }

    #[test]
    fn test_node_ext_carried_verbatim() {
        let mut augment = augment_with_node();
        augment.nodes[0].ext = Some(json!({"tier": "gold"}));

        let mut req = request_with_imp();
        augment_schain(&mut req, &augment);

        let chain = req.source.unwrap().schain.unwrap();
        assert_eq!(chain.nodes[0].ext, Some(json!({"tier": "gold"})));
    }

    #[test]
    fn test_standard_headers_and_version() {
        let endpoint = EndpointConfig {
            protocol_version: "2.6".to_string(),
            ..Default::default()
        };

        let headers = build_headers(&endpoint);
        let pairs: Vec<_> = headers
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Content-Type", "application/json;charset=utf-8"),
                ("Accept", "application/json"),
                ("X-OpenRTB-Version", "2.6"),
            ]
        );
    }

    #[test]
    fn test_basic_auth_header() {
        let endpoint = EndpointConfig {
            auth_type: AuthType::Basic,
            auth_username: "user".to_string(),
            auth_password: "pass".to_string(),
            ..Default::default()
        };

        let headers = build_headers(&endpoint);
        let auth = headers.iter().find(|h| h.name == "Authorization").unwrap();
        assert_eq!(auth.value, format!("Basic {}", BASE64.encode("user:pass")));
    }

    #[test]
    fn test_bearer_auth_requires_token() {
        let mut endpoint = EndpointConfig {
            auth_type: AuthType::Bearer,
            ..Default::default()
        };

        assert!(
            !build_headers(&endpoint).iter().any(|h| h.name == "Authorization"),
            "empty token must not emit a header"
        );

        endpoint.auth_token = "tok".to_string();
        let headers = build_headers(&endpoint);
        let auth = headers.iter().find(|h| h.name == "Authorization").unwrap();
        assert_eq!(auth.value, "Bearer tok");
    }

    #[test]
    fn test_header_auth_and_customs_come_last() {
        let endpoint = EndpointConfig {
            auth_type: AuthType::Header,
            auth_header_name: "X-Api-Key".to_string(),
            auth_header_value: "secret".to_string(),
            custom_headers: [("Accept".to_string(), "application/x-custom".to_string())]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let headers = build_headers(&endpoint);
        assert!(headers.iter().any(|h| h.name == "X-Api-Key" && h.value == "secret"));

        // the custom Accept sits after the standard one, so it wins on the wire
        let accept_positions: Vec<_> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.name == "Accept")
            .map(|(i, h)| (i, h.value.clone()))
            .collect();
        assert_eq!(accept_positions.len(), 2);
        assert_eq!(accept_positions.last().unwrap().1, "application/x-custom");
    }
}
