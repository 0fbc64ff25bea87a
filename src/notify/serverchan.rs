//! ServerChan notification provider implementation.
//!
//! Sends push messages through the ServerChan relay service.
//! Uses the global `HTTP_CLIENT` for connection pooling and efficiency.
//!
//! ServerChan API Reference: https://sct.ftqq.com/

use super::provider::{NotificationResult, Notifier};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Pattern for ServerChan3 keys, which embed the instance number to push through
static SCTP_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sctp(\d+)t").expect("valid sctp key pattern"));

/// Resolve a send key to its relay endpoint
///
/// Keys starting with `sctp` belong to ServerChan3 and carry their instance
/// number between `sctp` and `t`; the message is pushed to that instance's
/// host. Every other key goes to the classic `sctapi.ftqq.com` relay.
///
/// # Arguments
/// * `key` - The configured send key
///
/// # Returns
/// The endpoint URL, or a configuration error for a `sctp` key whose
/// instance number cannot be extracted. No request is made in that case.
pub fn resolve_endpoint(key: &str) -> AppResult<String> {
    if key.starts_with("sctp") {
        let captures =
            SCTP_KEY_PATTERN
                .captures(key)
                .ok_or_else(|| AppError::Configuration {
                    key: "notify.send_key".to_string(),
                    source: anyhow::anyhow!("invalid key format"),
                })?;
        let instance = &captures[1];
        Ok(format!("https://{instance}.push.ft07.com/send/{key}.send"))
    } else {
        Ok(format!("https://sctapi.ftqq.com/{key}.send"))
    }
}

/// ServerChan notification provider
///
/// Pushes a title and markdown body to the relay resolved from the send key.
/// Delivery problems surface in the returned [`NotificationResult`]; `send`
/// itself never fails, so a dead relay cannot take the caller down with it.
///
/// # Example
/// ```ignore
/// let provider = ServerChanProvider::new("SCT239143EXAMPLEKEY".to_string());
/// let result = provider.send("Check-in", "done", &HashMap::new()).await;
/// ```
#[derive(Clone)]
pub struct ServerChanProvider {
    send_key: String,
}

impl ServerChanProvider {
    /// Creates a new ServerChan provider for the given send key
    pub fn new(send_key: String) -> Self {
        Self { send_key }
    }

    /// Builds the request body for the relay API
    ///
    /// # Arguments
    /// * `title` - Message title
    /// * `body` - Message body, sent as the `desp` field
    /// * `extras` - Additional relay options, merged in last so an extra
    ///   named `title` or `desp` overrides the base field
    ///
    /// # Returns
    /// JSON object for the push API request body
    fn build_request_body(
        &self,
        title: &str,
        body: &str,
        extras: &HashMap<String, String>,
    ) -> serde_json::Value {
        let mut request_body = json!({
            "title": title,
            "desp": body,
        });

        for (key, value) in extras {
            request_body[key] = json!(value);
        }

        request_body
    }

    /// Posts the request body to the resolved endpoint
    ///
    /// # Arguments
    /// * `endpoint` - Relay endpoint URL
    /// * `request_body` - JSON body built by `build_request_body`
    ///
    /// # Returns
    /// NotificationResult with the relay's code and message, or a synthetic
    /// `-1` result describing the transport or parse failure
    async fn deliver(&self, endpoint: &str, request_body: &serde_json::Value) -> NotificationResult {
        let response = HTTP_CLIENT
            .post(endpoint)
            .header("Content-Type", "application/json;charset=utf-8")
            .json(request_body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                return NotificationResult {
                    succeeded: false,
                    code: -1,
                    message: format!("network error: {e}"),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return NotificationResult {
                succeeded: false,
                code: -1,
                message: format!("network error: relay returned {status}"),
            };
        }

        match response.json::<RelayResponse>().await {
            Ok(relay) => NotificationResult {
                succeeded: relay.code == 0,
                code: relay.code,
                message: relay.message.unwrap_or_default(),
            },
            Err(e) => NotificationResult {
                succeeded: false,
                code: -1,
                message: format!("unknown error: {e}"),
            },
        }
    }
}

/// Subset of the relay response body the dispatcher inspects
#[derive(Debug, Deserialize)]
struct RelayResponse {
    code: i64,
    message: Option<String>,
}

#[async_trait]
impl Notifier for ServerChanProvider {
    /// Sends a message via ServerChan
    ///
    /// Resolves the endpoint from the configured key, posts the payload and
    /// maps the relay response. Every failure mode folds into the returned
    /// result; the caller decides what to log.
    async fn send(
        &self,
        title: &str,
        body: &str,
        extras: &HashMap<String, String>,
    ) -> NotificationResult {
        let endpoint = match resolve_endpoint(&self.send_key) {
            Ok(endpoint) => endpoint,
            Err(_) => {
                return NotificationResult {
                    succeeded: false,
                    code: -1,
                    message: "invalid key format".to_string(),
                };
            }
        };

        let request_body = self.build_request_body(title, body, extras);
        self.deliver(&endpoint, &request_body).await
    }

    fn name(&self) -> &'static str {
        "serverchan"
    }
}
