//! MCP Server implementation for network state queries

use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;

use crate::platform::Providers;
use crate::probe;

/// The main Network Security MCP Server
///
/// Holds only the provider bundle; every query opens, uses, and releases
/// its own sessions, so concurrent tool calls are independent and need no
/// locking.
#[derive(Clone)]
pub struct NetSecMcpServer {
    providers: Providers,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl NetSecMcpServer {
    /// Server backed by the running OS's network subsystems.
    pub fn new() -> Self {
        Self::with_providers(Providers::system())
    }

    /// Server backed by caller-supplied providers (embedding, test doubles).
    pub fn with_providers(providers: Providers) -> Self {
        Self {
            providers,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Check the security posture of the current WiFi connection: SSID, authentication scheme, open vs encrypted, and signal quality"
    )]
    async fn check_wifi_security(&self) -> Result<CallToolResult, McpError> {
        json_success(&probe::check_wifi_security(&self.providers))
    }

    #[tool(
        description = "Get general network state: internet reachability, validation, transport medium (wired/wireless/cellular), and local/gateway addresses"
    )]
    async fn get_network_info(&self) -> Result<CallToolResult, McpError> {
        json_success(&probe::network_info(&self.providers))
    }

    #[tool(
        description = "Request network permissions; always granted on this platform, retained for cross-platform API symmetry"
    )]
    async fn request_permissions(&self) -> Result<CallToolResult, McpError> {
        json_success(&true)
    }
}

/// Pretty-printed JSON tool response.
fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for NetSecMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Network Security MCP Server - reconciles the OS's wireless, \
                 network-awareness, and adapter-table sources into one verdict on \
                 connectivity, transport medium, and WiFi security."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

impl Default for NetSecMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// In-Process Dispatch
// ============================================================================

/// Error from in-process tool dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The operation name is not implemented by this server.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The tool ran but the MCP layer rejected it.
    #[error("mcp error: {0}")]
    Mcp(String),
}

impl From<McpError> for DispatchError {
    fn from(err: McpError) -> Self {
        DispatchError::Mcp(err.message.to_string())
    }
}

impl NetSecMcpServer {
    /// Execute a tool by name without going through a transport.
    ///
    /// Unrecognized names yield [`DispatchError::ToolNotFound`], never a
    /// silent default result.
    pub async fn call_tool(&self, name: &str) -> Result<CallToolResult, DispatchError> {
        match name {
            "check_wifi_security" => self.check_wifi_security().await.map_err(Into::into),
            "get_network_info" => self.get_network_info().await.map_err(Into::into),
            "request_permissions" => self.request_permissions().await.map_err(Into::into),
            _ => Err(DispatchError::ToolNotFound(name.to_string())),
        }
    }

    /// Tools exposed by this server.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::unsupported::{
        UnsupportedAdapterTable, UnsupportedNetAwareness, UnsupportedWifi,
    };
    use std::sync::Arc;

    fn unsupported_server() -> NetSecMcpServer {
        NetSecMcpServer::with_providers(Providers {
            wifi: Arc::new(UnsupportedWifi),
            awareness: Arc::new(UnsupportedNetAwareness),
            adapters: Arc::new(UnsupportedAdapterTable),
        })
    }

    fn first_text(result: &CallToolResult) -> &str {
        result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                rmcp::model::RawContent::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .next()
            .unwrap_or("(no text)")
    }

    #[test]
    fn test_list_tools() {
        let server = unsupported_server();
        let tools = server.list_tools();

        assert_eq!(tools.len(), 3);

        let tool_names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(tool_names.contains(&"check_wifi_security"));
        assert!(tool_names.contains(&"get_network_info"));
        assert!(tool_names.contains(&"request_permissions"));
    }

    #[tokio::test]
    async fn test_call_check_wifi_security() {
        let server = unsupported_server();
        let result = server.call_tool("check_wifi_security").await;

        assert!(result.is_ok());
        let result = result.unwrap();
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
    }

    #[tokio::test]
    async fn test_call_get_network_info() {
        let server = unsupported_server();
        let result = server.call_tool("get_network_info").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_call_request_permissions() {
        let server = unsupported_server();
        let result = server.call_tool("request_permissions").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_degraded_security_payload_has_defaults_and_error() {
        let server = unsupported_server();
        let result = server.call_tool("check_wifi_security").await.unwrap();

        let value: serde_json::Value = serde_json::from_str(first_text(&result)).unwrap();
        assert_eq!(value["hasPermission"], true);
        assert_eq!(value["isConnected"], false);
        assert_eq!(value["isWiFi"], false);
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("Failed to open WLAN handle"));
    }

    #[tokio::test]
    async fn test_degraded_network_info_payload_is_all_false() {
        let server = unsupported_server();
        let result = server.call_tool("get_network_info").await.unwrap();

        let value: serde_json::Value = serde_json::from_str(first_text(&result)).unwrap();
        for field in [
            "isConnected",
            "hasInternet",
            "isValidated",
            "isWiFi",
            "isMobile",
            "isEthernet",
        ] {
            assert_eq!(value[field], false, "{field}");
        }
        assert!(value.get("ipAddress").is_none());
    }

    #[tokio::test]
    async fn test_request_permissions_always_grants() {
        let server = unsupported_server();
        let result = server.call_tool("request_permissions").await.unwrap();

        assert_eq!(first_text(&result).trim(), "true");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_implemented() {
        let server = unsupported_server();
        let result = server.call_tool("nonexistent_tool").await;

        assert!(matches!(result, Err(DispatchError::ToolNotFound(_))));
    }
}
