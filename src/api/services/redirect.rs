//! Public redirect endpoint

use actix_web::http::header::{self, HeaderMap};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::trace;

use crate::api::state::AppState;
use crate::errors::Result;
use crate::services::Resolution;
use crate::storage::NewVisit;
use crate::utils::ip::extract_client_ip;
use crate::utils::query_string::parse_query;

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
        .unwrap_or_default()
}

/// Everything recorded about one visit, taken from the request
fn visit_from_request(req: &HttpRequest, shortcut_id: i64, trust_forwarded: bool) -> NewVisit {
    let utm_source = parse_query(req.query_string())
        .remove("utm_source")
        .and_then(|values| values.into_iter().next())
        .unwrap_or_default();

    let mut visit = NewVisit::now(shortcut_id);
    visit.ip_address = extract_client_ip(req, trust_forwarded);
    visit.path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string());
    visit.referer = header_value(req.headers(), header::REFERER);
    visit.user_agent = header_value(req.headers(), header::USER_AGENT);
    visit.utm_source = utm_source;
    visit
}

/// `GET /{code:.*}`: always answers 302
///
/// The visit task is spawned before the response is built, so it still runs
/// if the client goes away.
pub async fn redirect(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let code = path.into_inner();
    let resolution = state.resolver.resolve(&code, req.query_string()).await?;

    if let Resolution::Found { shortcut, .. } = &resolution {
        let visit = visit_from_request(&req, shortcut.id, state.trust_forwarded_headers);
        state.recorder.record_detached(visit);
    } else {
        trace!("No visit recorded for unknown code '{}'", code);
    }

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, resolution.location()))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_visit_from_request() {
        let req = TestRequest::get()
            .uri("/fb?utm_source=newsletter&utm_source=other&x=1")
            .peer_addr("192.0.2.1:4000".parse().unwrap())
            .insert_header(("Referer", "https://news.example/"))
            .insert_header(("User-Agent", "curl/8.0"))
            .to_http_request();

        let visit = visit_from_request(&req, 5, false);
        assert_eq!(visit.shortcut_id, 5);
        assert_eq!(visit.ip_address, "192.0.2.1");
        assert_eq!(visit.path, "/fb?utm_source=newsletter&utm_source=other&x=1");
        assert_eq!(visit.referer, "https://news.example/");
        assert_eq!(visit.user_agent, "curl/8.0");
        assert_eq!(visit.utm_source, "newsletter");
    }

    #[test]
    fn test_missing_headers_are_empty() {
        let req = TestRequest::get().uri("/fb").to_http_request();
        let visit = visit_from_request(&req, 1, false);
        assert_eq!(visit.referer, "");
        assert_eq!(visit.user_agent, "");
        assert_eq!(visit.utm_source, "");
        assert_eq!(visit.path, "/fb");
    }
}
