use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Headers never forwarded from a caller to the gateway.
///
/// The last two describe the inbound body framing; the outbound body is
/// re-encoded, so they would be wrong.
const STRIPPED_REQUEST_HEADERS: [&str; 9] = [
    "host",
    "remote_addr",
    "x-forwarded-for",
    "connection",
    "cache-control",
    "upgrade-insecure-requests",
    "accept-encoding",
    "content-length",
    "transfer-encoding",
];

/// Transport framing headers removed from gateway responses.
const STRIPPED_RESPONSE_HEADERS: [&str; 4] = [
    "content-encoding",
    "connection",
    "keep-alive",
    "transfer-encoding",
];

/// Removes hop-by-hop and origin-identifying headers from caller headers.
pub fn sanitize_request_headers(mut headers: HeaderMap) -> HeaderMap {
    for name in STRIPPED_REQUEST_HEADERS {
        headers.remove(name);
    }
    headers
}

/// Removes transport framing headers from a gateway response.
pub fn sanitize_response_headers(mut headers: HeaderMap) -> HeaderMap {
    for name in STRIPPED_RESPONSE_HEADERS {
        headers.remove(name);
    }
    headers
}

/// Builds the outbound header set: sanitized caller headers on top of
/// `content-type: application/json`.
pub(crate) fn outbound_headers(forwarded: &HeaderMap) -> HeaderMap {
    let mut headers = sanitize_request_headers(forwarded.clone());
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
    }
    headers
}

/// Returns a header as text when present, valid and non-empty.
pub(crate) fn header_text<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    use super::{outbound_headers, sanitize_request_headers, sanitize_response_headers};

    fn inbound() -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            ("host", "rss.example"),
            ("remote_addr", "203.0.113.7"),
            ("x-forwarded-for", "203.0.113.7"),
            ("connection", "keep-alive"),
            ("cache-control", "no-cache"),
            ("upgrade-insecure-requests", "1"),
            ("accept-encoding", "gzip"),
            ("range", "bytes=100-"),
            ("user-agent", "feed-reader/2.1"),
        ] {
            headers.insert(name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn request_sanitization_drops_origin_and_hop_headers() {
        let headers = sanitize_request_headers(inbound());

        for name in [
            "host",
            "remote_addr",
            "x-forwarded-for",
            "connection",
            "cache-control",
            "upgrade-insecure-requests",
            "accept-encoding",
        ] {
            assert!(!headers.contains_key(name), "{name} must be stripped");
        }
        assert_eq!(headers["range"], "bytes=100-");
        assert_eq!(headers["user-agent"], "feed-reader/2.1");
    }

    #[test]
    fn outbound_defaults_to_json_content_type() {
        let headers = outbound_headers(&inbound());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(!headers.contains_key("host"));
    }

    #[test]
    fn caller_may_override_content_type() {
        let mut forwarded = HeaderMap::new();
        forwarded.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));

        let headers = outbound_headers(&forwarded);
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[CONTENT_TYPE], "application/json; charset=utf-8");
    }

    #[test]
    fn response_sanitization_drops_framing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-encoding", HeaderValue::from_static("gzip"));
        headers.insert("connection", HeaderValue::from_static("close"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-type", HeaderValue::from_static("image/jpeg"));

        let headers = sanitize_response_headers(headers);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["content-type"], "image/jpeg");
    }
}
