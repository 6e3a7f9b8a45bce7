//! Runs the worker-pool demo with the default shape (4 producers, 4
//! consumers, one million items per producer) and logs the outcome.
//!
//! Run with:
//!   cargo run --release -p tandem-pool
//!
//! Set `RUST_LOG=debug` to see per-worker completion events.

use tracing::info;
use tracing_subscriber::EnvFilter;

use tandem_pool::{PoolConfig, PoolError, run};

fn main() -> Result<(), PoolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = PoolConfig::default();
    info!(
        producers = config.producers,
        consumers = config.consumers,
        items_per_producer = config.items_per_producer,
        "starting pool"
    );

    let report = run(&config)?;

    let rate = report.consumed as f64 / report.elapsed.as_secs_f64() / 1e6;
    info!(
        produced = report.produced,
        consumed = report.consumed,
        conserved = report.is_conserved(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "pool drained ({rate:.1} M items/sec)"
    );

    assert!(report.is_conserved(), "items were lost or double-delivered");
    Ok(())
}
