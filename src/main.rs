//! Network Security MCP Server
//!
//! Network-state reconciliation tools via MCP: connectivity, transport
//! medium, and WiFi security posture from the OS's own network sources.
//!
//! # Usage
//!
//! Run directly: `netsec-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "netsec": { "command": "./netsec-mcp" } } }
//! ```

use netsec_mcp::{init_tracing, NetSecMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use rmcp::ServiceExt;

    init_tracing("netsec_mcp")?;

    tracing::info!("Starting netsec_mcp MCP Server");

    let server = NetSecMcpServer::new();
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
