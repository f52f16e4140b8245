//! OS provider boundary
//!
//! Each OS service consulted by a query is modeled as a narrow capability
//! trait: open a session, query it, release it. The probes and the server
//! depend only on these traits, never on concrete OS types, so test doubles
//! can stand in for the real subsystems.
//!
//! Sessions own their OS handles and release them in `Drop`, which covers
//! every exit path including early-return failures.

use std::sync::Arc;

use thiserror::Error;

use crate::types::AuthAlgorithm;

#[cfg(windows)]
pub mod windows;

pub mod unsupported;

/// Error reported by an OS provider.
///
/// Carries the failing subsystem/operation alongside the message; probes
/// fold these into result fields instead of propagating them.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Construction or handle acquisition failed; the whole subsystem is
    /// out for this query and callers degrade to defaults.
    #[error("{subsystem} unavailable: {message}")]
    Unavailable {
        subsystem: &'static str,
        message: String,
    },
    /// A query failed after the subsystem was opened successfully.
    #[error("{operation} failed: {message}")]
    QueryFailed {
        operation: &'static str,
        message: String,
    },
}

// ============================================================================
// Wireless subsystem
// ============================================================================

/// Association state of one wireless interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WirelessInterfaceState {
    Connected,
    Disconnected,
    /// Transitional or otherwise unusable states
    Other,
}

/// One enumerated wireless interface, distinct from its association.
#[derive(Debug, Clone)]
pub struct WirelessInterface {
    /// Opaque interface id, valid for lookups within the same session
    pub id: String,
    pub description: String,
    pub state: WirelessInterfaceState,
}

/// Attributes of a current association.
#[derive(Debug, Clone)]
pub struct WirelessConnection {
    /// SSID bytes with explicit length; not NUL-terminated, possibly not
    /// valid UTF-8
    pub ssid: Vec<u8>,
    pub auth_algorithm: AuthAlgorithm,
    /// OS-native 0-100 quality scale
    pub signal_quality: u32,
    /// Receive link rate in OS-native units
    pub link_rate: u32,
}

/// Wireless-subsystem handle provider.
pub trait WifiSubsystem: Send + Sync {
    /// Acquire a session; the session's `Drop` closes the handle.
    fn open(&self) -> Result<Box<dyn WifiSession>, ProviderError>;
}

/// An open wireless-subsystem session.
pub trait WifiSession {
    /// Enumerate wireless interfaces in OS enumeration order.
    fn interfaces(&self) -> Result<Vec<WirelessInterface>, ProviderError>;

    /// Query the current association of one interface.
    ///
    /// `Ok(None)` means the interface has no current connection record.
    fn current_connection(
        &self,
        interface_id: &str,
    ) -> Result<Option<WirelessConnection>, ProviderError>;
}

// ============================================================================
// Network-awareness subsystem
// ============================================================================

/// Internet reachability per address family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectivityFlags {
    pub ipv4_internet: bool,
    pub ipv6_internet: bool,
}

impl ConnectivityFlags {
    /// Reachability on either family counts.
    pub fn any_internet(self) -> bool {
        self.ipv4_internet || self.ipv6_internet
    }
}

/// One active network connection as seen by the awareness subsystem.
#[derive(Debug, Clone)]
pub struct ConnectionRecord {
    pub adapter_id: String,
    pub connectivity: ConnectivityFlags,
}

/// Network-awareness subsystem provider.
pub trait NetAwareness: Send + Sync {
    fn open(&self) -> Result<Box<dyn AwarenessSession>, ProviderError>;
}

/// An open network-awareness session.
pub trait AwarenessSession {
    /// Machine-wide reachability flags.
    fn aggregate_connectivity(&self) -> Result<ConnectivityFlags, ProviderError>;

    /// Active connections in OS enumeration order.
    fn active_connections(&self) -> Result<Vec<ConnectionRecord>, ProviderError>;
}

// ============================================================================
// IP adapter table
// ============================================================================

/// Hardware category of an adapter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Ethernet,
    Wireless,
    Other,
}

/// Placeholder address reported for unconfigured adapters.
pub const UNCONFIGURED_IP: &str = "0.0.0.0";

/// One entry of the IP adapter table.
#[derive(Debug, Clone)]
pub struct AdapterRecord {
    pub kind: AdapterKind,
    pub ip_address: String,
    pub gateway_address: String,
}

impl AdapterRecord {
    /// Whether this adapter holds a real address. Unconfigured adapters are
    /// never selected as primary.
    pub fn is_configured(&self) -> bool {
        self.ip_address != UNCONFIGURED_IP
    }
}

/// IP adapter table provider.
pub trait AdapterTable: Send + Sync {
    /// Adapter records in table order.
    fn adapters(&self) -> Result<Vec<AdapterRecord>, ProviderError>;
}

// ============================================================================
// Provider bundle
// ============================================================================

/// The three OS services a query consults, behind their capability traits.
#[derive(Clone)]
pub struct Providers {
    pub wifi: Arc<dyn WifiSubsystem>,
    pub awareness: Arc<dyn NetAwareness>,
    pub adapters: Arc<dyn AdapterTable>,
}

impl Providers {
    /// Providers backed by the running OS.
    ///
    /// On targets without an OS backend every subsystem reports itself
    /// unavailable, which drives the documented degraded results.
    pub fn system() -> Self {
        #[cfg(windows)]
        {
            Self {
                wifi: Arc::new(windows::WindowsWifi),
                awareness: Arc::new(windows::WindowsNetAwareness),
                adapters: Arc::new(windows::WindowsAdapterTable),
            }
        }
        #[cfg(not(windows))]
        {
            Self {
                wifi: Arc::new(unsupported::UnsupportedWifi),
                awareness: Arc::new(unsupported::UnsupportedNetAwareness),
                adapters: Arc::new(unsupported::UnsupportedAdapterTable),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_adapter_detection() {
        let adapter = AdapterRecord {
            kind: AdapterKind::Ethernet,
            ip_address: UNCONFIGURED_IP.to_string(),
            gateway_address: String::new(),
        };
        assert!(!adapter.is_configured());

        let adapter = AdapterRecord {
            kind: AdapterKind::Ethernet,
            ip_address: "10.0.0.5".to_string(),
            gateway_address: "10.0.0.1".to_string(),
        };
        assert!(adapter.is_configured());
    }

    #[test]
    fn test_connectivity_flags_any_internet() {
        assert!(!ConnectivityFlags::default().any_internet());
        assert!(ConnectivityFlags {
            ipv4_internet: true,
            ipv6_internet: false
        }
        .any_internet());
        assert!(ConnectivityFlags {
            ipv4_internet: false,
            ipv6_internet: true
        }
        .any_internet());
    }

    #[test]
    fn test_provider_error_carries_kind_and_message() {
        let err = ProviderError::Unavailable {
            subsystem: "wireless subsystem",
            message: "error code 5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wireless subsystem unavailable: error code 5"
        );

        let err = ProviderError::QueryFailed {
            operation: "interface enumeration",
            message: "error code 87".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "interface enumeration failed: error code 87"
        );
    }
}
