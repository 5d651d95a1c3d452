use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the aso-keywords CLI
///
/// Diagnostics go to stderr so they never mix with the keyword output on
/// stdout. The log level can be controlled via the RUST_LOG environment
/// variable:
/// - RUST_LOG=debug aso-keywords ...  (verbose logging)
/// - RUST_LOG=info aso-keywords ...   (default level)
/// - RUST_LOG=error aso-keywords ...  (errors only)
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aso_keywords=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
