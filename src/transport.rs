use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::headers::outbound_headers;

/// Raw outcome of one attempt. Consumed by the classifier.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransportResult {
    /// HTTP status, `0` when no response arrived.
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Set when the exchange broke off (connect, timeout, body read). Only its
    /// presence is classified; the reason itself is only logged.
    pub transport_failed: bool,
}

impl TransportResult {
    fn failed(status: u16, headers: HeaderMap, err: &reqwest::Error) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(status, error = %err, "gateway transport failure");

        #[cfg(not(feature = "tracing"))]
        let _ = err;

        Self {
            status,
            headers,
            body: Vec::new(),
            transport_failed: true,
        }
    }
}

/// Builds the HTTP client used for every attempt.
///
/// Redirects are surfaced to the classifier instead of being followed, and
/// idle connections are not kept between attempts. No content coding is
/// negotiated, so no `accept-encoding` is ever sent.
pub(crate) fn build_http_client() -> std::result::Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_gzip()
        .no_brotli()
        .build()
}

/// Sends one `POST` to `url`. Never retries.
///
/// Network problems are reported inside the returned [`TransportResult`].
pub(crate) async fn send_once(
    http: &reqwest::Client,
    url: &str,
    forwarded: &HeaderMap,
    body: Vec<u8>,
    timeout: Duration,
) -> TransportResult {
    let response = http
        .post(url)
        .headers(outbound_headers(forwarded))
        .timeout(timeout)
        .body(body)
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(err) => {
            let status = err.status().map_or(0, |status| status.as_u16());
            return TransportResult::failed(status, HeaderMap::new(), &err);
        }
    };

    let status = response.status().as_u16();
    let headers = response.headers().clone();

    match response.bytes().await {
        Ok(body) => TransportResult {
            status,
            headers,
            body: body.to_vec(),
            transport_failed: false,
        },
        Err(err) => TransportResult::failed(status, headers, &err),
    }
}
