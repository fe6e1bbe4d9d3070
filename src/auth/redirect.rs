//! Choosing where to send a user after they log in.
//!
//! Only relative paths on this site are accepted, and never the log-in page
//! itself, so a crafted link cannot bounce the user to another site or into
//! a redirect loop.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

fn is_safe_path(path_and_query: &str) -> bool {
    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return false;
    }

    let path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path);

    path != endpoints::LOG_IN_VIEW
}

fn path_and_query_of(raw_url: &str, allow_absolute: bool) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;

    if !allow_absolute && (uri.scheme().is_some() || uri.authority().is_some()) {
        return None;
    }

    let path_and_query = uri.path_and_query()?.as_str();
    is_safe_path(path_and_query).then(|| path_and_query.to_owned())
}

/// Reduce a user supplied redirect URL to a safe path and query, or `None`.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    path_and_query_of(raw_url, false)
}

/// The log-in page URL with `target` as its `redirect_url` query parameter.
pub fn log_in_url_with_redirect(target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", target)]) {
        Ok(query) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, query)),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {target}: {error}");
            None
        }
    }
}

/// The log-in URL that returns the user to the page behind `request`.
///
/// Page requests come back to their own URL. htmx requests to `/api` routes
/// come back to the page that made them, read from the `HX-Current-URL` header,
/// which htmx sends as an absolute URL.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let target = if request.uri().path().starts_with("/api") {
        hx_current_url(request)?
    } else {
        normalize_redirect_url(request.uri().path_and_query()?.as_str())?
    };

    log_in_url_with_redirect(&target)
}

fn hx_current_url(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    let target = path_and_query_of(current_url, true);
    if target.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    target
}

#[cfg(test)]
mod redirect_tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn keeps_relative_path_and_query() {
        assert_eq!(
            normalize_redirect_url("/transactions?type=income"),
            Some("/transactions?type=income".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites() {
        assert_eq!(normalize_redirect_url("https://example.com/transactions"), None);
        assert_eq!(normalize_redirect_url("//example.com/transactions"), None);
    }

    #[test]
    fn rejects_log_in_page() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
        assert_eq!(
            normalize_redirect_url("/log_in?redirect_url=%2Ftransactions"),
            None
        );
    }

    #[test]
    fn page_request_redirects_back_to_itself() {
        let request = Request::builder()
            .uri("/transactions?category=Food")
            .body(Body::empty())
            .unwrap();

        let got = build_log_in_redirect_url(&request);

        assert_eq!(
            got,
            Some("/log_in?redirect_url=%2Ftransactions%3Fcategory%3DFood".to_owned())
        );
    }

    #[test]
    fn api_request_redirects_to_current_page() {
        let request = Request::builder()
            .uri("/api/transactions/1")
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/transactions/1/edit")
            .body(Body::empty())
            .unwrap();

        let got = build_log_in_redirect_url(&request);

        assert_eq!(
            got,
            Some("/log_in?redirect_url=%2Ftransactions%2F1%2Fedit".to_owned())
        );
    }

    #[test]
    fn api_request_without_htmx_headers_has_no_redirect() {
        let request = Request::builder()
            .uri("/api/transactions")
            .body(Body::empty())
            .unwrap();

        assert_eq!(build_log_in_redirect_url(&request), None);
    }
}
