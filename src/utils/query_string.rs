//! Query-string merging for outbound redirects
//!
//! The destination URL's own parameters are applied first, then the inbound
//! request's, so the request wins on a shared key. Each key keeps a single
//! value: the first one listed by the source that set it last.
//! `utm_campaign` is always replaced by the campaign tag. Keys come out
//! sorted, so identical inputs always produce identical output.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Prefix of the forced `utm_campaign` value
pub const CAMPAIGN_PREFIX: &str = "dxe-io-";

pub const CAMPAIGN_PARAM: &str = "utm_campaign";

/// Decoded query parameters, every value kept in arrival order per key
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Decode a raw `a=1&b=2` query string
pub fn parse_query(raw: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}

/// The `utm_campaign` value injected for a code
pub fn campaign_tag(campaign: &str) -> String {
    format!("{}{}", CAMPAIGN_PREFIX, campaign)
}

/// Merge destination and request parameters and force the campaign tag
pub fn build_query_string(
    campaign: &str,
    destination_params: &QueryParams,
    request_params: &QueryParams,
) -> String {
    let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
    for source in [destination_params, request_params] {
        for (key, values) in source {
            if let Some(first) = values.first() {
                merged.insert(key.as_str(), first.as_str());
            }
        }
    }

    let tag = campaign_tag(campaign);
    merged.insert(CAMPAIGN_PARAM, &tag);

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in merged {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
