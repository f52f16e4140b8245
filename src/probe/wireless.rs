//! Wireless probe
//!
//! Finds the first connected wireless interface and snapshots its
//! association: SSID, authentication algorithm, signal quality, link rate.

use crate::platform::{WifiSubsystem, WirelessInterfaceState};
use crate::types::AuthAlgorithm;

/// Point-in-time wireless state.
///
/// When `connected` is false the association is always `None`, so a
/// disconnected observation cannot carry partial association data.
#[derive(Debug, Clone, Default)]
pub struct WirelessObservation {
    pub connected: bool,
    pub association: Option<Association>,
    /// Set when a probe stage failed; absent for the normal "no wireless
    /// interface / none associated" case.
    pub error: Option<String>,
}

/// Attributes of the selected interface's current association.
#[derive(Debug, Clone)]
pub struct Association {
    pub ssid: String,
    pub auth_algorithm: AuthAlgorithm,
    /// Clamped to 0-100
    pub signal_quality: u8,
    pub link_rate: u32,
}

/// Observe the current wireless state.
///
/// Never fails: provider errors are folded into the `error` field and the
/// remaining fields keep their defaults. The session and any OS buffers it
/// holds are released on every path when it drops.
pub fn observe(wifi: &dyn WifiSubsystem) -> WirelessObservation {
    let session = match wifi.open() {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(%err, "wireless subsystem unavailable");
            return WirelessObservation {
                error: Some(format!("Failed to open WLAN handle: {err}")),
                ..Default::default()
            };
        }
    };

    let interfaces = match session.interfaces() {
        Ok(interfaces) => interfaces,
        Err(err) => {
            tracing::warn!(%err, "wireless interface enumeration failed");
            return WirelessObservation {
                error: Some(format!("Failed to enumerate wireless interfaces: {err}")),
                ..Default::default()
            };
        }
    };

    // First connected interface in enumeration order. The order is whatever
    // the OS reports, not a "best link" ranking.
    let connected = interfaces
        .iter()
        .find(|iface| iface.state == WirelessInterfaceState::Connected);
    let Some(iface) = connected else {
        // No wireless interface, or none associated: a normal state.
        return WirelessObservation::default();
    };

    match session.current_connection(&iface.id) {
        Ok(Some(connection)) => WirelessObservation {
            connected: true,
            association: Some(Association {
                // SSID bytes carry an explicit length and are not
                // NUL-terminated.
                ssid: String::from_utf8_lossy(&connection.ssid).into_owned(),
                auth_algorithm: connection.auth_algorithm,
                signal_quality: connection.signal_quality.min(100) as u8,
                link_rate: connection.link_rate,
            }),
            error: None,
        },
        // The interface state said connected, so report that much even when
        // the attribute record is missing or the query failed.
        Ok(None) => WirelessObservation {
            connected: true,
            association: None,
            error: None,
        },
        Err(err) => WirelessObservation {
            connected: true,
            association: None,
            error: Some(format!("Failed to query connection attributes: {err}")),
        },
    }
}

/// Whether any wireless interface is currently associated.
///
/// Used by the connectivity probe as its medium signal. Opens and releases
/// its own session; failures read as "no".
pub fn any_interface_connected(wifi: &dyn WifiSubsystem) -> bool {
    let Ok(session) = wifi.open() else {
        return false;
    };
    match session.interfaces() {
        Ok(interfaces) => interfaces
            .iter()
            .any(|iface| iface.state == WirelessInterfaceState::Connected),
        Err(_) => false,
    }
}
