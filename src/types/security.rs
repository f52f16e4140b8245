//! WiFi security types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication-algorithm code reported by the wireless subsystem.
///
/// Numeric values follow the 802.11 authentication algorithm codes the OS
/// uses on the wire; codes outside the known set are preserved in `Other`
/// so the classifier can map them to [`SecurityLevel::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAlgorithm {
    /// Open System authentication (1)
    Open,
    /// Shared Key authentication, WEP (2)
    SharedKey,
    /// WPA enterprise (3)
    Wpa,
    /// WPA pre-shared key (4)
    WpaPsk,
    /// WPA without an authenticator, ad-hoc (5)
    WpaNone,
    /// RSNA / WPA2 enterprise (6)
    Rsna,
    /// RSNA pre-shared key / WPA2 personal (7)
    RsnaPsk,
    /// WPA3 enterprise (8)
    Wpa3,
    /// WPA3 simultaneous authentication of equals (9)
    Wpa3Sae,
    /// Any code outside the known set
    Other(u32),
}

impl AuthAlgorithm {
    /// Decode a raw OS authentication-algorithm code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => AuthAlgorithm::Open,
            2 => AuthAlgorithm::SharedKey,
            3 => AuthAlgorithm::Wpa,
            4 => AuthAlgorithm::WpaPsk,
            5 => AuthAlgorithm::WpaNone,
            6 => AuthAlgorithm::Rsna,
            7 => AuthAlgorithm::RsnaPsk,
            8 => AuthAlgorithm::Wpa3,
            9 => AuthAlgorithm::Wpa3Sae,
            _ => AuthAlgorithm::Other(code),
        }
    }
}

/// Security level of a wireless network
///
/// Closed taxonomy used by callers to make trust decisions. Derived
/// deterministically from [`AuthAlgorithm`] by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityLevel {
    Open,
    Wep,
    Wpa,
    WpaPsk,
    WpaNone,
    Wpa2,
    Wpa2Psk,
    Wpa3,
    Wpa3Sae,
    Unknown,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SecurityLevel::Open => "OPEN",
            SecurityLevel::Wep => "WEP",
            SecurityLevel::Wpa => "WPA",
            SecurityLevel::WpaPsk => "WPA_PSK",
            SecurityLevel::WpaNone => "WPA_NONE",
            SecurityLevel::Wpa2 => "WPA2",
            SecurityLevel::Wpa2Psk => "WPA2_PSK",
            SecurityLevel::Wpa3 => "WPA3",
            SecurityLevel::Wpa3Sae => "WPA3_SAE",
            SecurityLevel::Unknown => "UNKNOWN",
        }
    }

    /// Anything other than an open network counts as secured.
    pub fn is_secure(&self) -> bool {
        *self != SecurityLevel::Open
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of the `check_wifi_security` tool.
///
/// Booleans always serialize with their defaults; the optional fields only
/// appear when a wireless association was actually observed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityResult {
    pub has_permission: bool,
    pub is_connected: bool,
    #[serde(rename = "isWiFi")]
    pub is_wifi: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_type: Option<SecurityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_secure: Option<bool>,
    /// Signal quality on the OS-native 0-100 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_level: Option<u8>,
    /// Receive link rate in OS-native units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_algorithm_from_code_round_trip() {
        assert_eq!(AuthAlgorithm::from_code(1), AuthAlgorithm::Open);
        assert_eq!(AuthAlgorithm::from_code(7), AuthAlgorithm::RsnaPsk);
        assert_eq!(AuthAlgorithm::from_code(9), AuthAlgorithm::Wpa3Sae);
        assert_eq!(AuthAlgorithm::from_code(0), AuthAlgorithm::Other(0));
        assert_eq!(
            AuthAlgorithm::from_code(0x8000_0000),
            AuthAlgorithm::Other(0x8000_0000)
        );
    }

    #[test]
    fn test_security_level_wire_spelling() {
        let json = serde_json::to_string(&SecurityLevel::Wpa2Psk).unwrap();
        assert_eq!(json, "\"WPA2_PSK\"");
        let json = serde_json::to_string(&SecurityLevel::Wpa3Sae).unwrap();
        assert_eq!(json, "\"WPA3_SAE\"");
        let json = serde_json::to_string(&SecurityLevel::WpaNone).unwrap();
        assert_eq!(json, "\"WPA_NONE\"");
    }

    #[test]
    fn test_security_level_as_str_matches_serde() {
        let levels = [
            SecurityLevel::Open,
            SecurityLevel::Wep,
            SecurityLevel::Wpa,
            SecurityLevel::WpaPsk,
            SecurityLevel::WpaNone,
            SecurityLevel::Wpa2,
            SecurityLevel::Wpa2Psk,
            SecurityLevel::Wpa3,
            SecurityLevel::Wpa3Sae,
            SecurityLevel::Unknown,
        ];
        for level in levels {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }

    #[test]
    fn test_only_open_is_insecure() {
        assert!(!SecurityLevel::Open.is_secure());
        assert!(SecurityLevel::Wep.is_secure());
        assert!(SecurityLevel::Wpa2Psk.is_secure());
        assert!(SecurityLevel::Unknown.is_secure());
    }

    #[test]
    fn test_security_result_field_names() {
        let result = NetworkSecurityResult {
            has_permission: true,
            is_connected: true,
            is_wifi: true,
            ssid: Some("cafe".to_string()),
            security_type: Some(SecurityLevel::Wpa2),
            is_secure: Some(true),
            signal_level: Some(80),
            signal_strength: Some(866_000),
            error: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["hasPermission"], true);
        assert_eq!(value["isWiFi"], true);
        assert_eq!(value["securityType"], "WPA2");
        assert_eq!(value["signalLevel"], 80);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_disconnected_result_omits_security_fields() {
        let result = NetworkSecurityResult {
            has_permission: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isConnected"], false);
        assert_eq!(value["isWiFi"], false);
        assert!(value.get("ssid").is_none());
        assert!(value.get("securityType").is_none());
        assert!(value.get("signalLevel").is_none());
    }
}
