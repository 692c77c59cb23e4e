//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default directives: our own logs at `level`, window/HTTP internals at warn
fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "warn,cryptoticker={level},eframe=warn,egui_glow=warn,winit=warn,hyper=warn,reqwest=warn"
    ))
}

/// Initialize the logging system. `RUST_LOG` wins unless `verbose` is set.
pub fn init(verbose: bool, json: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        default_filter("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
