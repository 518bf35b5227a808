use std::net::IpAddr;

use crate::types::OrderedMultiMap;

pub(crate) const HTTP_HOST: &str = "HTTP_HOST";
pub(crate) const URL: &str = "URL";
pub(crate) const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub(crate) const REMOTE_ADDR: &str = "REMOTE_ADDR";
pub(crate) const FORWARDED_FOR: &str = "HTTP_X_FORWARDED_FOR";
pub(crate) const QUERY_STRING: &str = "QUERY_STRING";

/// Address reported when server variables exist but carry no usable client address.
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Request facts derived from server variables once, at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RequestSummary {
    pub(crate) host: String,
    pub(crate) url: String,
    pub(crate) http_method: String,
    pub(crate) ip_address: String,
}

impl RequestSummary {
    pub(crate) fn from_server_variables(vars: Option<&OrderedMultiMap>) -> Self {
        let Some(vars) = vars else {
            return Self::default();
        };
        let lookup = |key: &str| vars.get(key).unwrap_or_default().to_owned();

        Self {
            host: lookup(HTTP_HOST),
            url: lookup(URL),
            http_method: lookup(REQUEST_METHOD),
            ip_address: remote_ip(vars),
        }
    }
}

/// Client address, preferring a public `X-Forwarded-For` hop over `REMOTE_ADDR`.
///
/// `REMOTE_ADDR` may belong to a proxy; a forwarded address is only trusted when
/// it parses and is not private, loopback, or link-local.
pub(crate) fn remote_ip(vars: &OrderedMultiMap) -> String {
    let forwarded = vars.get(FORWARDED_FOR).and_then(|header| {
        header
            .split(',')
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .find(is_public)
    });

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    match vars.get(REMOTE_ADDR).map(str::trim) {
        Some(addr) if !addr.is_empty() => addr.to_owned(),
        _ => UNKNOWN_IP.to_owned(),
    }
}

fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified())
        },
        IpAddr::V6(v6) => {
            let unique_local = (v6.segments()[0] & 0xfe00) == 0xfc00;
            let link_local = (v6.segments()[0] & 0xffc0) == 0xfe80;
            !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
        },
    }
}
