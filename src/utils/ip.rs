//! 客户端 IP 提取
//!
//! Forwarding headers are only honoured when the server is configured to sit
//! behind a proxy; otherwise any client could spoof its address.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::debug;

/// Address of the visitor, or an empty string when it cannot be determined
pub fn extract_client_ip(req: &HttpRequest, trust_forwarded_headers: bool) -> String {
    if trust_forwarded_headers
        && let Some(forwarded) = extract_forwarded_ip_from_headers(req.headers())
    {
        debug!("Using forwarded client IP: {}", forwarded);
        return forwarded;
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

/// 从 HeaderMap 提取转发的 IP
///
/// Takes the first X-Forwarded-For entry, falling back to X-Real-IP.
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.2"))
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .to_http_request();
        assert_eq!(
            extract_forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .to_http_request();
        assert_eq!(
            extract_forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("198.51.100.1")
        );
    }

    #[test]
    fn test_peer_address_without_trust() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:54321".parse().unwrap())
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req, false), "192.0.2.10");
        assert_eq!(extract_client_ip(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_unknown_peer_is_empty() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_client_ip(&req, true), "");
    }
}
