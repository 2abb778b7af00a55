//! Demo entry point.

use demo::{Config, LogFormat};
use domain::CustomerService;
use event_store::InMemoryEventStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Run both walkthroughs against one store
    let service = CustomerService::new(InMemoryEventStore::new());

    if let Err(error) = demo::run_confirmation(&service).await {
        tracing::error!(%error, "confirmation walkthrough failed");
        std::process::exit(1);
    }
    if let Err(error) = demo::run_change_then_confirm(&service).await {
        tracing::error!(%error, "email change walkthrough failed");
        std::process::exit(1);
    }

    tracing::info!(
        stored_events = service.handler().store().event_count().await,
        "walkthroughs complete"
    );

    // 4. Dump the counters collected along the way
    println!("{}", metrics_handle.render());
}
