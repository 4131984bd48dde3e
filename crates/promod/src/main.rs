//! Promo Daemon (promod)
//!
//! The main server process for the promo discount-code service.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (TCP on 6001, codes.json in the working directory)
//! promod
//!
//! # Custom port and bind address
//! promod --port 7000 --bind 127.0.0.1
//!
//! # Custom snapshot location
//! promod --data /var/lib/promo/codes.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use promo_core::CodeManager;
use promo_store::JsonFileStore;
use promo_transport::TcpServer;

/// Promo Daemon - discount code generation and redemption server
#[derive(Parser, Debug)]
#[command(name = "promod")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TCP port to listen on
    #[arg(long, env = "PROMO_PORT", default_value = "6001")]
    port: u16,

    /// Bind address
    #[arg(long, env = "PROMO_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Path of the JSON snapshot holding the codes
    #[arg(long, env = "PROMO_DATA", default_value = "codes.json")]
    data: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PROMO_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Print banner
    print_banner();

    let store = Arc::new(JsonFileStore::new(&args.data));
    let manager = Arc::new(
        CodeManager::open(store)
            .await
            .with_context(|| format!("failed to load codes from {}", args.data.display()))?,
    );

    let stats = manager.stats().await;
    info!(
        path = %args.data.display(),
        total = stats.total,
        used = stats.used,
        "Code snapshot loaded"
    );

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "Starting promo daemon");

    let server = TcpServer::new(manager, addr);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            tracing::error!(error = %e, "TCP server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");

    server_handle.abort();

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  ╔═╗╦═╗╔═╗╔╦╗╔═╗
  ╠═╝╠╦╝║ ║║║║║ ║
  ╩  ╩╚═╚═╝╩ ╩╚═╝
  Discount Code Service
  Version {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
