//! Tracing setup for the binary.
//!
//! Configuration is read before its `log_filter` is known, so startup runs
//! under a scoped bootstrap subscriber and the global one is installed once
//! the config is loaded.

use anyhow::Result;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used while the config file is being read.
pub const BOOTSTRAP_FILTER: &str = "pantry=info";

/// `RUST_LOG` if set, otherwise `default`.
pub fn env_filter(default: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?)
}

/// Plain-text subscriber writing to `writer`, for use with
/// [`tracing::subscriber::with_default`].
pub fn bootstrap_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}

/// Installs the process-wide subscriber.
pub fn init(filter: EnvFilter) {
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
