//! Network Security MCP Library
//!
//! Network-state reconciliation tools via MCP.
//! Queries the OS's wireless, network-awareness, and adapter-table sources
//! and merges them into one verdict on connectivity, transport medium, and
//! WiFi security posture.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use netsec_mcp::NetSecMcpServer;
//!
//! let server = NetSecMcpServer::new();
//! // Use with in-memory dispatch or serve via stdio
//! let result = server.call_tool("get_network_info").await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `netsec-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "netsec": { "command": "./netsec-mcp" } } }
//! ```

pub mod init;
pub mod platform;
pub mod probe;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::{DispatchError, NetSecMcpServer};

// Re-export the provider boundary for embedding and test doubles
pub use platform::Providers;

// Re-export tracing setup for binary and embedders
pub use init::init_tracing;
