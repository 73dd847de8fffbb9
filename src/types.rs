use reqwest::header::HeaderMap;
use serde_json::{json, Value};

use crate::{GatewayError, Result};

/// File bytes returned by a media call.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaPayload {
    pub file: Vec<u8>,
    /// Response headers without transport framing.
    pub headers: HeaderMap,
    /// `200`, or `206` for range responses.
    pub code: u16,
}

/// Target of a `302` answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    /// Renders the redirect as `{"headers": {"Location": ...}}`.
    pub fn to_json(&self) -> Value {
        json!({ "headers": { "Location": self.location } })
    }
}

/// Successful outcome of a gateway call.
#[derive(Clone, Debug, PartialEq)]
pub enum GatewayResponse {
    /// The `response` field of a JSON envelope.
    Structured(Value),
    Media(MediaPayload),
    Redirect(Redirect),
}

impl GatewayResponse {
    /// Converts to a JSON value. Media payloads are rejected.
    pub fn into_structured(self) -> Result<Value> {
        match self {
            Self::Structured(value) => Ok(value),
            Self::Redirect(redirect) => Ok(redirect.to_json()),
            Self::Media(media) => Err(GatewayError::Decode(format!(
                "expected structured response, got {} bytes of media",
                media.file.len()
            ))),
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaPayload> {
        match self {
            Self::Media(media) => Some(media),
            _ => None,
        }
    }

    pub fn as_redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}
