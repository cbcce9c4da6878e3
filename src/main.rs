//! Student records form proxy.
//!
//! ```text
//!     Browser form POST         ┌──────────────────────────────────────────┐
//!     ──────────────────────────┼─▶ http::server ─▶ extract ─▶ handlers    │
//!                               │                                  │       │
//!                               │                          upstream::client┼──▶ Student
//!                               │                                  │       │    Records API
//!     Rendered page             │                                  ▼       │   (/etudiants/)
//!     ◀─────────────────────────┼── view::Page ◀───────────── reply/error  │
//!                               └──────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use student_form_proxy::config::validation::validate_config;
use student_form_proxy::config::{self, AppConfig, ConfigError};
use student_form_proxy::observability::{logging, metrics};
use student_form_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "student-form-proxy")]
#[command(about = "HTML front-end forwarding student forms to the Student Records API", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the file and the PORT variable.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    config::apply_env_overrides(&mut config)?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability.log_filter);

    tracing::info!("student-form-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_base = ?config.upstream.base_url,
        upstream_port = config.upstream.port,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
