use reqwest::header::{self, HeaderMap};
use serde_json::Value;

use crate::{
    headers::{header_text, sanitize_response_headers},
    transport::TransportResult,
    wire::ErrorEntry,
    GatewayResponse, MediaPayload, Redirect, ResponseKind,
};

/// Statuses that count as a delivered answer.
const ACCEPTED_STATUSES: [u16; 3] = [200, 206, 302];

/// Classifier decision for one attempt.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Verdict {
    /// Usable answer.
    Delivered(GatewayResponse),
    /// Gateway returned an error envelope. Terminal.
    Rejected { message: String, code: i64 },
    /// Accepted status but no usable payload. Terminal.
    Malformed { status: u16 },
    /// Bad status or connection failure. Retryable while budget remains.
    Transient { status: u16 },
}

/// Chooses the shape to decode, first match wins.
pub(crate) fn resolve_kind(result: &TransportResult, declared: ResponseKind) -> ResponseKind {
    if result.status == 302 && header_text(&result.headers, &header::LOCATION).is_some() {
        return ResponseKind::Redirect;
    }
    let is_json = header_text(&result.headers, &header::CONTENT_TYPE)
        .is_some_and(|content_type| content_type.contains("json"));
    if is_json {
        ResponseKind::Structured
    } else {
        declared
    }
}

/// Decodes one attempt. Pure: the same input always yields the same verdict.
pub(crate) fn classify(result: &TransportResult, declared: ResponseKind) -> Verdict {
    let kind = resolve_kind(result, declared);
    let headers = sanitize_response_headers(result.headers.clone());

    let (payload, error) = match kind {
        ResponseKind::Structured => decode_structured(&result.body),
        ResponseKind::Media => (decode_media(result, headers), None),
        ResponseKind::Redirect => (decode_redirect(&headers), None),
    };

    if let Some(entry) = error {
        if let Some(message) = entry.message() {
            return Verdict::Rejected {
                message: message.to_owned(),
                code: entry.code(),
            };
        }
    }

    if result.transport_failed || !ACCEPTED_STATUSES.contains(&result.status) {
        return Verdict::Transient {
            status: result.status,
        };
    }

    match payload {
        Some(response) => Verdict::Delivered(response),
        None => Verdict::Malformed {
            status: result.status,
        },
    }
}

/// Returns the envelope's `response` field and its first error entry.
///
/// A body that is not JSON yields neither.
fn decode_structured(body: &[u8]) -> (Option<GatewayResponse>, Option<ErrorEntry>) {
    let Ok(envelope) = serde_json::from_slice::<Value>(body) else {
        return (None, None);
    };

    let error = envelope
        .pointer("/errors/0")
        .cloned()
        .and_then(|entry| serde_json::from_value::<ErrorEntry>(entry).ok());
    let response = envelope
        .as_object()
        .and_then(|object| object.get("response"))
        .cloned()
        .map(GatewayResponse::Structured);

    (response, error)
}

fn decode_media(result: &TransportResult, headers: HeaderMap) -> Option<GatewayResponse> {
    let has_content_type = header_text(&headers, &header::CONTENT_TYPE).is_some();
    if !matches!(result.status, 200 | 206) || result.body.is_empty() || !has_content_type {
        return None;
    }

    Some(GatewayResponse::Media(MediaPayload {
        file: result.body.clone(),
        headers,
        code: result.status,
    }))
}

fn decode_redirect(headers: &HeaderMap) -> Option<GatewayResponse> {
    header_text(headers, &header::LOCATION).map(|location| {
        GatewayResponse::Redirect(Redirect {
            location: location.to_owned(),
        })
    })
}
