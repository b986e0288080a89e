pub mod client_trait;
pub mod shopify;
pub mod klaviyo;
pub mod mapper;
pub mod pipeline;

pub use client_trait::{EventSink, OrderSource};
pub use pipeline::{EventOutcome, Pipeline, RunReport};
