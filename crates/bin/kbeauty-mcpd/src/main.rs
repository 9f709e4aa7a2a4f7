//! Daemon entry point for the K-Beauty catalog MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! control plane once, and serves it over stdio, streamable HTTP MCP and the
//! plain JSON tool-call endpoint.

mod config;
mod wiring;

use std::sync::{Arc, Mutex};

use futures::future::select_all;
use kbeauty_http::{HttpServer, HttpServerConfig};
use kbeauty_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::KBeautyConfig;
use crate::wiring::build_control_plane;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = KBeautyConfig::from_args()?;
    init_logging(&config)?;

    info!("starting kbeauty-mcpd v{}", env!("CARGO_PKG_VERSION"));
    let control = Arc::new(build_control_plane(&config)?);

    let mut servers = Vec::new();
    if config.mcp_serve {
        let mcp_config = McpHttpServerConfig::new(config.mcp_http_addr)
            .with_stateful_mode(config.mcp_stateful)
            .with_sse_keep_alive(config.mcp_sse_keep_alive);
        servers.push(tokio::spawn(serve_streamable_http(control.clone(), mcp_config)));
    }
    if config.http_serve {
        let http_config = HttpServerConfig::new(config.http_addr)
            .with_max_body_bytes(config.http_max_body_bytes)
            .with_request_timeout(config.http_timeout);
        servers.push(tokio::spawn(HttpServer::new(control.clone(), http_config).serve()));
    }

    // stdio owns the process lifetime; HTTP listeners die with it.
    if config.enable_stdio {
        serve_stdio(control).await?;
        return Ok(());
    }

    let (finished, _, _) = select_all(servers).await;
    finished??;
    Ok(())
}

fn init_logging(config: &KBeautyConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(false);

    if let Some(log_file) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        subscriber.with_writer(Mutex::new(file)).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    debug!("logging initialized with level: {}", config.log_level);
    Ok(())
}
