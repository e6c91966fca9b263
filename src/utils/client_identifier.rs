//! Client identification for rate limiting.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Key used when neither proxy headers nor the peer address are available.
pub const UNKNOWN_CLIENT: &str = "unknown";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Derives the rate-limit key for a request.
///
/// When `behind_proxy` is true, the first non-empty entry of `X-Forwarded-For`
/// wins, then `X-Real-IP`. Otherwise (or if both are absent) the peer IP is
/// used. Proxy headers are ignored unless `behind_proxy` is set, since any
/// client can forge them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_identifier(&headers, None, true), "203.0.113.7");
/// assert_eq!(client_identifier(&headers, None, false), "unknown");
/// ```
pub fn client_identifier(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> String {
    if behind_proxy {
        let forwarded = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or_else(|| header_str(headers, X_REAL_IP)) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
