//! # Unreal Remote Control MCP Server
//!
//! A Model Context Protocol server that lets an assistant edit levels in a running Unreal
//! Editor through the Remote Control HTTP API.
//!
//! Tools create, modify, delete, and inspect actors, browse project assets, and assemble
//! multi-actor arrangements from basic shapes. The server talks MCP over stdio.

use std::error::Error;
use std::sync::Arc;

use config::UnrealConfig;
use log_tools::TracingLevel;
use mcp_service::McpService;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, warn};
use unreal::ConnectionManager;

mod actors;
mod assets;
mod composite;
mod config;
mod constants;
mod error;
mod json_object;
mod log_tools;
mod mcp_service;
mod params;
mod spatial;
mod tool;
mod unreal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Log file is created lazily on first write
    TracingLevel::init_file_tracing(TracingLevel::from_env().unwrap_or(TracingLevel::Warn));

    let config = UnrealConfig::from_env().map_err(|report| format!("{report:?}"))?;
    info!("Using Remote Control endpoint {}", config.object_call_url());
    let connections = Arc::new(ConnectionManager::http(config));

    // The editor may start after us; tools connect on demand
    if let Err(report) = connections.connect().await {
        warn!("Unreal Engine not reachable at startup: {report:?}");
    }

    let server = McpService::new(connections).serve(stdio()).await?;
    server.waiting().await?;

    Ok(())
}
