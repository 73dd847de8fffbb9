use std::time::Duration;

/// Configures per-attempt timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt receive timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Constant delay before every retry, in milliseconds.
    pub retry_interval_ms: u64,
}

impl ClientOptions {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_retries: 5,
            retry_interval_ms: 3_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ClientOptions;

    #[test]
    fn defaults_allow_six_attempts_three_seconds_apart() {
        let options = ClientOptions::default();
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_interval(), Duration::from_secs(3));
        assert_eq!(options.timeout(), Duration::from_secs(30));
    }
}
