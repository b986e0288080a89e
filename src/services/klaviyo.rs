use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde_json::Value;

use crate::error::SinkError;
use crate::models::Event;

use super::client_trait::EventSink;

pub const DEFAULT_TRACK_URL: &str = "https://a.klaviyo.com/api/track";

/// Serialize an event to JSON and base64 it for the `data` query parameter.
pub fn encode_event(event: &Event) -> Result<String, SinkError> {
    let json = serde_json::to_string(event)?;
    Ok(BASE64.encode(json))
}

/// Inverse of [`encode_event`], yielding the raw JSON structure.
pub fn decode_event(data: &str) -> Result<Value, SinkError> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| SinkError::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SinkError::Decode(e.to_string()))
}

/// How Klaviyo answered a track call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Accepted,
    Rejected,
    Unknown,
}

impl TrackOutcome {
    pub fn from_response(body: &Value) -> Self {
        match body.as_i64() {
            Some(1) => TrackOutcome::Accepted,
            Some(0) => TrackOutcome::Rejected,
            _ => TrackOutcome::Unknown,
        }
    }
}

#[derive(Clone)]
pub struct KlaviyoClient {
    http: Client,
    track_url: String,
    timeout: Option<Duration>,
}

impl KlaviyoClient {
    pub fn new(track_url: String) -> Self {
        Self {
            http: Client::new(),
            track_url,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn track(&self, event: &Event) -> Result<Value, SinkError> {
        let data = encode_event(event)?;

        let mut req = self.http.get(&self.track_url).query(&[("data", data.as_str())]);
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }
        let res = req.send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await?;
        serde_json::from_str::<Value>(&body).map_err(|e| SinkError::Decode(format!("{e}: {body}")))
    }
}

#[async_trait]
impl EventSink for KlaviyoClient {
    async fn send(&self, event: &Event) -> Result<Value, SinkError> {
        self.track(event).await
    }
}
