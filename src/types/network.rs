//! General network state types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response of the `get_network_info` tool.
///
/// `Default` is the fully degraded shape: every boolean `false`, no
/// addresses. Any field whose source failed keeps its default rather than
/// being left out of the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfoResult {
    pub is_connected: bool,
    pub has_internet: bool,
    pub is_validated: bool,
    #[serde(rename = "isWiFi")]
    pub is_wifi: bool,
    pub is_mobile: bool,
    pub is_ethernet: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fully_degraded() {
        let result = NetworkInfoResult::default();
        assert!(!result.is_connected);
        assert!(!result.has_internet);
        assert!(!result.is_validated);
        assert!(!result.is_wifi);
        assert!(!result.is_mobile);
        assert!(!result.is_ethernet);
        assert!(result.ip_address.is_none());
        assert!(result.gateway_address.is_none());
    }

    #[test]
    fn test_field_names() {
        let result = NetworkInfoResult {
            is_connected: true,
            has_internet: true,
            is_validated: true,
            is_ethernet: true,
            ip_address: Some("10.0.0.5".to_string()),
            gateway_address: Some("10.0.0.1".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isConnected"], true);
        assert_eq!(value["hasInternet"], true);
        assert_eq!(value["isValidated"], true);
        assert_eq!(value["isWiFi"], false);
        assert_eq!(value["isMobile"], false);
        assert_eq!(value["isEthernet"], true);
        assert_eq!(value["ipAddress"], "10.0.0.5");
        assert_eq!(value["gatewayAddress"], "10.0.0.1");
        assert!(value.get("error").is_none());
    }
}
