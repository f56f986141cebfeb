// Request-origin derivation for redirect targets.
// Decision: redirects are absolute URLs built from the request's own origin,
// never a hardcoded host, so one deployment works behind any hostname.

use axum::http::{header, HeaderMap};

/// Origin for the current request: the configured `SITE_URL` override when
/// set, otherwise scheme and host taken from the request headers.
pub fn request_origin(headers: &HeaderMap, site_url: Option<&str>) -> String {
    if let Some(site) = site_url {
        return site.trim_end_matches('/').to_string();
    }

    // Proxies may append to X-Forwarded-Proto; the first entry is the
    // client-facing scheme.
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", proto, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_origin_from_host_header() {
        let origin = request_origin(&headers(&[("host", "app.example.com")]), None);
        assert_eq!(origin, "http://app.example.com");
    }

    #[test]
    fn test_origin_honors_forwarded_proto() {
        let origin = request_origin(
            &headers(&[("host", "app.example.com"), ("x-forwarded-proto", "https")]),
            None,
        );
        assert_eq!(origin, "https://app.example.com");
    }

    #[test]
    fn test_origin_takes_first_forwarded_proto() {
        let origin = request_origin(
            &headers(&[
                ("host", "app.example.com"),
                ("x-forwarded-proto", "https, http"),
            ]),
            None,
        );
        assert_eq!(origin, "https://app.example.com");
    }

    #[test]
    fn test_site_url_override_wins() {
        let origin = request_origin(
            &headers(&[("host", "internal:3000")]),
            Some("https://portal.example.com/"),
        );
        assert_eq!(origin, "https://portal.example.com");
    }

    #[test]
    fn test_origin_without_host_header() {
        let origin = request_origin(&HeaderMap::new(), None);
        assert_eq!(origin, "http://localhost");
    }
}
