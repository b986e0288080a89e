//! Library entrypoint for klaviyo-order-sync.
//!
//! Pulls orders from Shopify and forwards "Ordered Product" and "Placed Order"
//! events to Klaviyo's track API. The binary wires everything up from the
//! environment; integration tests under `tests/` build the pieces directly.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use services::{klaviyo::KlaviyoClient, shopify::ShopifyClient, Pipeline};

/// Build the production pipeline from settings.
pub fn build_pipeline(settings: &config::Settings) -> Pipeline {
    let shopify = ShopifyClient::from_settings(settings);
    let klaviyo = KlaviyoClient::new(settings.klaviyo_track_url.clone())
        .with_timeout(settings.http_timeout_secs.map(Duration::from_secs));

    Pipeline::new(
        Arc::new(shopify),
        Arc::new(klaviyo),
        settings.klaviyo_token.clone(),
        settings.sink_concurrency,
    )
}
