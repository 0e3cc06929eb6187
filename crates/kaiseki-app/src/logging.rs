//! stderr logging, installed before the config is read and narrowed after.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Filter used until the config has been loaded
const BOOTSTRAP_FILTER: &str = "warn";

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// RUST_LOG if set, otherwise the bootstrap filter
pub fn initial_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER))
}

/// Formatting subscriber whose filter can be swapped once the config is known
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> (impl Subscriber + Send + Sync, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Apply the configured filter unless RUST_LOG already chose one
pub fn apply_config_filter(handle: &FilterHandle, configured: &str, rust_log_set: bool) {
    if rust_log_set {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(configured)) {
        tracing::warn!("Failed to apply log filter {configured}: {e}");
    }
}
