//! kvctl CLI Client
//!
//! Command-line interface for the etcd v3 KV API.

use clap::Parser;
use kvctl::cli::{self, Args};
use kvctl::dispatch;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr, results to stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match cli::unknown_operation(&e) {
            Some(err) => {
                tracing::error!("{}", err);
                std::process::exit(2);
            }
            None => e.exit(),
        },
    };
    let config = args.config();
    let kind = args.command.kind();

    let operation = match args.operation() {
        Ok(op) => op,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::debug!("kvctl v{}: {} via {}", kvctl::VERSION, kind.as_str(), config.endpoint);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Losing the race drops the in-flight call and its connection
    let result = tokio::select! {
        result = dispatch::run(&config, &operation, &mut out) => Some(result),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };

    match result {
        Some(Ok(_)) => {}
        Some(Err(e)) => {
            tracing::error!("{} failed: {}", kind.as_str(), e);
            std::process::exit(1);
        }
        None => {
            tracing::warn!("Interrupted, {} cancelled", kind.as_str());
            std::process::exit(130);
        }
    }
}
