use klaviyo_order_sync::{build_pipeline, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let settings = config::load();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        shop = %settings.shop_name,
        all_pages = settings.fetch_all_pages,
        concurrency = settings.sink_concurrency,
        "starting order sync"
    );

    let report = build_pipeline(&settings).run().await;

    if report.source_failed {
        tracing::warn!("run finished without orders");
    }
}
