//! Parameter-shaping wrappers around [`GatewayClient::call`].

use reqwest::header::HeaderMap;
use serde_json::{json, Map, Value};

use crate::{
    wire::SearchResult, GatewayClient, GatewayError, GatewayRequest, GatewayResponse,
    ResponseKind, Result,
};

const DEFAULT_HISTORY_LIMIT: u64 = 10;

impl GatewayClient {
    /// Fetches rendered message history. Defaults: `peer: ""`, `limit: 10`.
    pub async fn get_history_html(&self, data: Map<String, Value>) -> Result<Value> {
        let data = with_defaults(
            [
                ("peer", json!("")),
                ("limit", json!(DEFAULT_HISTORY_LIMIT)),
            ],
            data,
        );
        self.call_structured(&GatewayRequest::new("getHistoryHtml", json!({ "data": data })))
            .await
    }

    /// Downloads a media file, forwarding caller headers such as `range`.
    ///
    /// `size_limit` defaults to [`crate::ClientConfig::media_size_limit`].
    pub async fn get_media(
        &self,
        data: Map<String, Value>,
        headers: HeaderMap,
    ) -> Result<GatewayResponse> {
        let data = with_defaults(
            [
                ("peer", json!("")),
                ("id", json!([0])),
                ("size_limit", json!(self.config().media_size_limit)),
            ],
            data,
        );
        let request = GatewayRequest::new("getMedia", json!({ "data": data }))
            .headers(headers)
            .response_kind(ResponseKind::Media);
        self.call(&request).await
    }

    /// Downloads a media thumbnail.
    pub async fn get_media_preview(
        &self,
        data: Map<String, Value>,
        headers: HeaderMap,
    ) -> Result<GatewayResponse> {
        let data = with_defaults([("peer", json!("")), ("id", json!([0]))], data);
        let request = GatewayRequest::new("getMediaPreview", json!({ "data": data }))
            .headers(headers)
            .response_kind(ResponseKind::Media);
        self.call(&request).await
    }

    /// Returns download metadata for a message's media.
    pub async fn get_media_info(&self, message: Value) -> Result<Value> {
        self.call_structured(&GatewayRequest::new(
            "getDownloadInfo",
            json!({ "message": message }),
        ))
        .await
    }

    pub async fn get_info(&self, peer: &str) -> Result<Value> {
        self.call_structured(&GatewayRequest::new("getInfo", json!(peer)))
            .await
    }

    /// Finds a peer by its exact handle, ignoring case and a leading `@`.
    ///
    /// Chats are checked before users.
    pub async fn search(&self, username: &str) -> Result<Option<Value>> {
        let username = username.trim_start_matches('@');
        let response = self
            .call_structured(&GatewayRequest::new(
                "contacts.search",
                json!({ "data": { "q": format!("@{username}"), "limit": 1 } }),
            ))
            .await?;

        let peers: SearchResult = serde_json::from_value(response)
            .map_err(|err| GatewayError::Decode(format!("invalid search result: {err}")))?;

        Ok(peers.chats.into_iter().chain(peers.users).find(|peer| {
            peer.get("username")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase() == username.to_lowercase())
        }))
    }

    pub async fn get_id(&self, chat: Value) -> Result<Value> {
        self.call_structured(&GatewayRequest::new("getId", json!([chat])))
            .await
    }

    /// Lists sponsored messages for `peer`, each enriched with a `peer` entry
    /// describing its sender.
    pub async fn get_sponsored_messages(&self, peer: Value) -> Result<Vec<Value>> {
        let response = self
            .call_structured(&GatewayRequest::new("getSponsoredMessages", peer))
            .await?;

        let mut messages = flatten_messages(response);
        for message in &mut messages {
            let from_id = message.get("from_id").cloned().unwrap_or(Value::Null);
            let id = self.get_id(from_id).await?;
            let info = self.get_info(&peer_reference(&id)).await?;
            if let Some(object) = message.as_object_mut() {
                object.insert("peer".to_owned(), info);
            }
        }
        Ok(messages)
    }

    /// Acknowledges that a sponsored message was shown.
    pub async fn view_sponsored_message(&self, peer: Value, message: Value) -> Result<Value> {
        self.call_structured(&GatewayRequest::new(
            "viewSponsoredMessage",
            json!({ "peer": peer, "message": message }),
        ))
        .await
    }
}

/// Caller values win over defaults.
fn with_defaults<const N: usize>(
    defaults: [(&str, Value); N],
    data: Map<String, Value>,
) -> Map<String, Value> {
    let mut merged: Map<String, Value> = defaults
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect();
    merged.extend(data);
    merged
}

fn flatten_messages(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, value)| value).collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn peer_reference(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::{flatten_messages, peer_reference, with_defaults};

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn caller_data_overrides_defaults() {
        let merged = with_defaults(
            [("peer", json!("")), ("limit", json!(10))],
            map(json!({"peer": "durov", "page": 2})),
        );
        assert_eq!(
            Value::Object(merged),
            json!({"peer": "durov", "limit": 10, "page": 2})
        );
    }

    #[test]
    fn object_responses_flatten_to_values() {
        let messages = flatten_messages(json!({"0": {"id": 1}, "1": {"id": 2}}));
        assert_eq!(messages.len(), 2);
        assert!(flatten_messages(Value::Null).is_empty());
    }

    #[test]
    fn numeric_ids_become_decimal_strings() {
        assert_eq!(peer_reference(&json!(-1001234)), "-1001234");
        assert_eq!(peer_reference(&json!("channel")), "channel");
    }
}
