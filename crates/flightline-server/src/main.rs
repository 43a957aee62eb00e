//! Proxy relay binary for aviationstack endpoints.
//!
//! Re-exposes the upstream `flights` and `airports` endpoints under
//! `/api/...` with a server-held credential, and serves a static asset
//! directory for every other path.

use anyhow::Result;
use clap::Parser;
use flightline_core::{ProxyConfig, UpstreamClient};
use flightline_server::{shutdown_signal, ProxyServer, ServerConfig};
use log::LevelFilter;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(version, about = "Flightline server - relay aviationstack endpoints locally")]
struct Cli {
    #[clap(
        long,
        short,
        help = "Port to listen on (overrides the PORT environment variable)"
    )]
    port: Option<u16>,

    #[clap(
        long,
        default_value = "public",
        help = "Directory of static assets to serve"
    )]
    public_dir: PathBuf,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logger
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    // The credential is required at startup, before serving anything.
    let config = ProxyConfig::from_env()?;
    let port = cli.port.unwrap_or(config.port);
    let bind_addr: SocketAddr = ([0, 0, 0, 0], port).into();

    let api_base = config.api_base();
    log::info!("Relaying to upstream at {}", api_base);
    let client = UpstreamClient::with_base_url(config.api_key, api_base);

    let server_config = ServerConfig::default()
        .with_bind_addr(bind_addr)
        .with_public_dir(cli.public_dir);

    log::info!("Server running: http://localhost:{}", port);

    let server = ProxyServer::with_config(client, server_config);
    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
