//! middleman: forwards `/api/vendor/dler/*` to `https://dler.pro`.
//!
//! ```text
//!     Client ──▶ listener ──▶ router (prefix, methods) ──▶ Forwarder ──▶ Upstream
//!     Client ◀── response (status, filtered headers, body) ◀──────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use middleman::config::{read_config, validate_config, ConfigError, MiddlemanConfig};
use middleman::http::HttpServer;
use middleman::lifecycle::{signals, Shutdown};
use middleman::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "middleman")]
#[command(about = "Forward a path prefix to a fixed upstream origin", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8000.
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Upstream origin, e.g. https://dler.pro.
    #[arg(short, long, value_name = "URL")]
    upstream: Option<String>,

    /// Path prefix routed to the upstream, e.g. /api/vendor/dler.
    #[arg(short, long, value_name = "PATH")]
    prefix: Option<String>,
}

impl Args {
    fn resolve(self) -> Result<MiddlemanConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => MiddlemanConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(upstream) = self.upstream {
            config.forward.upstream = upstream;
        }
        if let Some(prefix) = self.prefix {
            config.forward.prefix = prefix;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Args::parse().resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("middleman: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("middleman: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: MiddlemanConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        prefix = %config.forward.prefix,
        upstream = %config.forward.upstream,
        "middleman starting"
    );

    if config.observability.metrics_enabled {
        // Address already validated.
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
