//! Error types for each stage of a sync run.

use thiserror::Error;

/// Failures while pulling orders from Shopify.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Shopify request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Shopify orders request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("Shopify orders response could not be decoded: {0}")]
    Decode(String),
}

/// Failures while submitting a single event to the tracking API.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("event could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("tracking request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tracking request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("tracking response was not JSON: {0}")]
    Decode(String),
}

/// An order that cannot be turned into events.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    #[error("order {order_id} has no customer")]
    MissingCustomer { order_id: u64 },
}
