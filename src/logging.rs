//! tracing setup for the CLI
//!
//! Logs go to stderr; stdout carries only the JSON the host consumes.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// `RUST_LOG` wins over the flags when set
pub fn filter_for(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

pub fn init_logging(verbose: u8, quiet: bool, format: LogFormat) {
    let filter = filter_for(verbose, quiet);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when embedded in a host
    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry().with(layer).with(filter).try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(layer.json())
            .with(filter)
            .try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "logging already initialized");
    }
}
