//! Seams between the pipeline and the two remote APIs.
//!
//! The pipeline only sees these traits, so tests can swap in in-memory
//! doubles for Shopify and Klaviyo.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SinkError, SourceError};
use crate::models::{Event, Order};

/// Where orders come from.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, SourceError>;
}

/// Where events go. Returns the tracking API's response body uninterpreted.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, event: &Event) -> Result<Value, SinkError>;
}
