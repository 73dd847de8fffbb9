use std::{fmt, sync::Arc};

use tokio::time::sleep;

use crate::{
    classify::{classify, Verdict},
    transport::{build_http_client, send_once},
    ClientConfig, ClientOptions, Diagnostics, GatewayError, GatewayRequest, GatewayResponse,
    Result, TracingDiagnostics, RETRY_NOTICE,
};

#[derive(Clone)]
/// HTTP client for the messaging gateway.
///
/// Cheap to clone. Concurrent calls share only the read-only configuration;
/// each call owns its retry budget.
pub struct GatewayClient {
    http: reqwest::Client,
    config: ClientConfig,
    options: ClientOptions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", &self.config)
            .field("options", &self.options)
            .finish()
    }
}

impl GatewayClient {
    /// Creates a client for a resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client().map_err(GatewayError::Build)?,
            config,
            options: ClientOptions::default(),
            diagnostics: Arc::new(TracingDiagnostics),
        })
    }

    /// Creates a client from environment defaults overridden by explicit values.
    ///
    /// An empty `address` or a zero `port` keeps the value from
    /// [`ClientConfig::from_env`].
    pub fn connect(address: &str, port: u16) -> std::result::Result<Self, String> {
        let config = ClientConfig::from_env()?.resolve(address, port);
        Self::new(config).map_err(|err| err.to_string())
    }

    /// Applies timeout and retry options.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the sink receiving diagnostic notices.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Sends `request`, retrying transient failures.
    ///
    /// Error envelopes end the call immediately with [`GatewayError::Protocol`].
    /// Connection failures and unexpected statuses are retried up to
    /// [`ClientOptions::max_retries`] times, `retry_interval_ms` apart, before
    /// [`GatewayError::Unavailable`] is returned.
    pub async fn call(&self, request: &GatewayRequest) -> Result<GatewayResponse> {
        let url = self.config.endpoint(request.method());
        let body = request.encode_body()?;
        let mut attempt = 0usize;

        loop {
            if attempt > 0 {
                self.wait_before_retry(request.method(), attempt).await;
            }

            let result = send_once(
                &self.http,
                &url,
                request.forwarded_headers(),
                body.clone(),
                self.options.timeout(),
            )
            .await;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                method = request.method(),
                attempt,
                status = result.status,
                transport_failed = result.transport_failed,
                "gateway attempt finished"
            );

            match classify(&result, request.kind()) {
                Verdict::Delivered(response) => return Ok(response),
                Verdict::Rejected { message, code } => {
                    return Err(GatewayError::Protocol { message, code })
                }
                Verdict::Malformed { status } => return Err(GatewayError::Unavailable { status }),
                Verdict::Transient { status } => {
                    if attempt >= self.options.max_retries {
                        return Err(GatewayError::Unavailable { status });
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Structured call helper used by the parameter-shaping methods.
    pub(crate) async fn call_structured(&self, request: &GatewayRequest) -> Result<serde_json::Value> {
        self.call(request).await?.into_structured()
    }

    /// Reports the retry and waits the fixed interval.
    async fn wait_before_retry(&self, method: &str, attempt: usize) {
        self.diagnostics.notify(RETRY_NOTICE);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            method,
            attempt,
            "retrying gateway request after {} ms",
            self.options.retry_interval_ms
        );

        #[cfg(not(feature = "tracing"))]
        let _ = (method, attempt);

        sleep(self.options.retry_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::GatewayClient;
    use crate::{ClientConfig, ClientOptions};

    #[test]
    fn debug_lists_config_and_options() {
        let client = GatewayClient::new(ClientConfig::new("gateway.local", 9503))
            .expect("must build")
            .with_options(ClientOptions {
                timeout_ms: 1_000,
                max_retries: 2,
                retry_interval_ms: 10,
            });
        let debug = format!("{client:?}");
        assert!(debug.contains("gateway.local"));
        assert!(debug.contains("max_retries: 2"));
    }
}
