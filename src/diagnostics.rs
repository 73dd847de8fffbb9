//! Diagnostic notifications emitted by the client.
//!
//! The client never writes to a global logger directly; it reports through the
//! [`Diagnostics`] capability it was built with.

/// Notice emitted before every retry attempt.
pub const RETRY_NOTICE: &str = "Client crashed and restarting. Resending request.";

/// Fire-and-forget sink for diagnostic messages.
pub trait Diagnostics: Send + Sync {
    fn notify(&self, message: &str);
}

/// Forwards notices to `tracing` at warn level.
///
/// Without the `tracing` feature this sink drops every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn notify(&self, message: &str) {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "gateway_rpc", "{message}");

        #[cfg(not(feature = "tracing"))]
        let _ = message;
    }
}

/// Discards every notice.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn notify(&self, _message: &str) {}
}
