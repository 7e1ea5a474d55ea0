use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Installs the global tracing subscriber, filtered through `RUST_LOG`.
pub fn setup_telemetry(service_name: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Setup tracing for {}", service_name);

    Ok(())
}
