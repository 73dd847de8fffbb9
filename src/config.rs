use serde::Deserialize;

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9503;

/// Location of the gateway plus limits shared by every call.
///
/// Resolved once when a [`crate::GatewayClient`] is built and never changed
/// afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host name or IP address of the gateway.
    pub address: String,
    /// TCP port of the gateway.
    pub port: u16,
    /// Default `size_limit` passed to media downloads, `0` for unlimited.
    pub media_size_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_owned(),
            port: DEFAULT_PORT,
            media_size_limit: 0,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given address and port.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            ..Self::default()
        }
    }

    /// Loads the configuration from environment variables.
    ///
    /// Reads:
    /// - `GATEWAY_ADDRESS`
    /// - `GATEWAY_PORT`
    /// - `GATEWAY_MEDIA_MAX_SIZE`
    ///
    /// Unset or empty variables keep their defaults. Non-numeric port or
    /// size values are rejected.
    pub fn from_env() -> std::result::Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a JSON configuration document. Missing keys keep their defaults.
    pub fn from_json(document: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(document).map_err(|err| format!("invalid client config: {err}"))
    }

    /// Applies explicitly supplied values on top of this configuration.
    ///
    /// An empty `address` or a zero `port` counts as "not supplied".
    pub fn resolve(mut self, address: &str, port: u16) -> Self {
        let address = address.trim();
        if !address.is_empty() {
            self.address = address.to_owned();
        }
        if port != 0 {
            self.port = port;
        }
        self
    }

    /// Sets the default media size limit.
    pub fn with_media_size_limit(mut self, limit: u64) -> Self {
        self.media_size_limit = limit;
        self
    }

    /// Base URL of the gateway, e.g. `http://127.0.0.1:9503`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }

    pub(crate) fn endpoint(&self, method: &str) -> String {
        format!("{}/api/{method}", self.base_url())
    }

    fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(address) = value("GATEWAY_ADDRESS") {
            config.address = address.trim().to_owned();
        }
        if let Some(port) = value("GATEWAY_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|err| format!("invalid GATEWAY_PORT '{port}': {err}"))?;
        }
        if let Some(limit) = value("GATEWAY_MEDIA_MAX_SIZE") {
            config.media_size_limit = limit
                .trim()
                .parse()
                .map_err(|err| format!("invalid GATEWAY_MEDIA_MAX_SIZE '{limit}': {err}"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ClientConfig;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn explicit_values_override_loaded_ones() {
        let config = ClientConfig::default().resolve("10.0.0.5", 9600);
        assert_eq!(config.address, "10.0.0.5");
        assert_eq!(config.port, 9600);
    }

    #[test]
    fn empty_explicit_values_keep_fallback() {
        let base = ClientConfig::new("gateway", 8080);
        let config = base.clone().resolve("", 0);
        assert_eq!(config, base);
    }

    #[test]
    fn env_lookup_reads_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GATEWAY_ADDRESS", "api.internal"),
            ("GATEWAY_PORT", "9100"),
            ("GATEWAY_MEDIA_MAX_SIZE", "1048576"),
        ]))
        .expect("must load");

        assert_eq!(config.address, "api.internal");
        assert_eq!(config.port, 9100);
        assert_eq!(config.media_size_limit, 1_048_576);
    }

    #[test]
    fn env_lookup_rejects_bad_port() {
        let err = ClientConfig::from_lookup(lookup(&[("GATEWAY_PORT", "http")]))
            .expect_err("must fail");
        assert!(err.contains("GATEWAY_PORT"));
    }

    #[test]
    fn env_lookup_falls_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("GATEWAY_ADDRESS", "  ")]))
            .expect("must load");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn json_document_may_be_partial() {
        let config = ClientConfig::from_json(r#"{"port": 9999}"#).expect("must parse");
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn endpoint_addresses_method() {
        let config = ClientConfig::new("localhost", 9503);
        assert_eq!(
            config.endpoint("contacts.search"),
            "http://localhost:9503/api/contacts.search"
        );
    }
}
