use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use crate::{headers::sanitize_request_headers, GatewayError, Result};

/// Shape a caller expects the gateway to answer with.
///
/// The classifier may override it: a `302` with a location always resolves to
/// [`ResponseKind::Redirect`] and a JSON content type to
/// [`ResponseKind::Structured`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ResponseKind {
    /// JSON envelope with a `response` field.
    #[default]
    Structured,
    /// Raw file bytes.
    Media,
    /// `302` with a `location` header.
    Redirect,
}

/// A single gateway call: method, JSON parameters, forwarded headers and the
/// expected response shape.
///
/// Immutable once built. Retries resend it unchanged.
#[derive(Clone, Debug)]
pub struct GatewayRequest {
    method: String,
    params: Value,
    headers: HeaderMap,
    kind: ResponseKind,
}

impl GatewayRequest {
    /// Creates a structured request with no forwarded headers.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
            headers: HeaderMap::new(),
            kind: ResponseKind::Structured,
        }
    }

    /// Creates a request from any serializable parameter value.
    pub fn with_params<P: Serialize>(method: impl Into<String>, params: &P) -> Result<Self> {
        let params = serde_json::to_value(params)
            .map_err(|err| GatewayError::Encode(format!("invalid call parameters: {err}")))?;
        Ok(Self::new(method, params))
    }

    /// Forwards caller headers. Hop-by-hop and origin headers are dropped here.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = sanitize_request_headers(headers);
        self
    }

    /// Declares the expected response shape.
    pub fn response_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Sanitized headers that will be sent, without the JSON content-type default.
    pub fn forwarded_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn encode_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.params)
            .map_err(|err| GatewayError::Encode(format!("invalid call parameters: {err}")))
    }
}
