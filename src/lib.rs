//! `gateway-rpc` is an async RPC client for a messaging-platform HTTP gateway.
//!
//! Every call becomes `POST /api/{method}` with a JSON body. Responses are
//! classified into one of three shapes (structured JSON envelope, binary media,
//! redirect), transient backend failures are retried with a fixed delay, and
//! the caller sees either a [`GatewayResponse`] or a [`GatewayError`].
//!
//! The core entry point is [`GatewayClient::call`]; the remaining client
//! methods only shape parameters for specific backend operations.

mod classify;
mod client;
mod config;
mod diagnostics;
mod error;
mod headers;
mod methods;
mod options;
mod request;
mod transport;
mod types;
mod wire;

pub use client::GatewayClient;
pub use config::ClientConfig;
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics, RETRY_NOTICE};
pub use error::{GatewayError, MESSAGE_CLIENT_UNAVAILABLE};
pub use headers::{sanitize_request_headers, sanitize_response_headers};
pub use options::ClientOptions;
pub use request::{GatewayRequest, ResponseKind};
pub use types::{GatewayResponse, MediaPayload, Redirect};

pub type Result<T> = std::result::Result<T, GatewayError>;
