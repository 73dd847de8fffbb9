/// Message carried by every [`GatewayError::Unavailable`].
pub const MESSAGE_CLIENT_UNAVAILABLE: &str = "gateway client connection error";

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Error envelope returned by the gateway (`errors[0]`). Never retried.
    #[error("gateway error {code}: {message}")]
    Protocol {
        /// Error message text from the gateway.
        message: String,
        /// Numeric code from the gateway, `400` when it sent none.
        code: i64,
    },
    /// The gateway could not produce a usable response within the retry budget.
    ///
    /// `status` is the last observed HTTP status, `0` when no response arrived.
    #[error("{} (status {status})", MESSAGE_CLIENT_UNAVAILABLE)]
    Unavailable { status: u16 },
    /// Call parameters could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response shape does not fit the operation that requested it.
    #[error("decode error: {0}")]
    Decode(String),
    /// The underlying HTTP client could not be built.
    #[error("http client build error: {0}")]
    Build(reqwest::Error),
}

impl GatewayError {
    /// Returns the status or gateway code attached to this error, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Protocol { code, .. } => Some(*code),
            Self::Unavailable { status } => Some(i64::from(*status)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayError, MESSAGE_CLIENT_UNAVAILABLE};

    #[test]
    fn unavailable_display_uses_fixed_message() {
        let err = GatewayError::Unavailable { status: 502 };
        assert_eq!(
            err.to_string(),
            "gateway client connection error (status 502)"
        );
        assert_eq!(err.code(), Some(502));
    }

    #[test]
    fn unavailable_display_starts_with_message_constant() {
        let err = GatewayError::Unavailable { status: 0 };
        assert_eq!(
            err.to_string(),
            format!("{MESSAGE_CLIENT_UNAVAILABLE} (status 0)")
        );
    }

    #[test]
    fn protocol_exposes_backend_code() {
        let err = GatewayError::Protocol {
            message: "PEER_ID_INVALID".to_owned(),
            code: 400,
        };
        assert_eq!(err.code(), Some(400));
        assert!(err.to_string().contains("PEER_ID_INVALID"));
    }
}
