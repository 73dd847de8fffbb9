use serde::Deserialize;
use serde_json::Value;

/// First entry of the `errors` list in a gateway envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
}

impl ErrorEntry {
    pub const DEFAULT_CODE: i64 = 400;

    /// Message text, when it is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn code(&self) -> i64 {
        self.code
            .as_ref()
            .and_then(|code| {
                code.as_i64()
                    .or_else(|| code.as_str().and_then(|text| text.parse().ok()))
            })
            .unwrap_or(Self::DEFAULT_CODE)
    }
}

/// Result of `contacts.search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub chats: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
}
