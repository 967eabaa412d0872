use crate::cli::commands::LogFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool, log_format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }
}

pub fn print_info() {
    println!("ResearchPilot v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();
    println!("For more information, visit: {}", env!("CARGO_PKG_REPOSITORY"));
}
