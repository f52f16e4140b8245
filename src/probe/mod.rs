//! Probes and reconciliation
//!
//! Two peer probes run per query and are merged here: the wireless probe
//! (interface association, security attributes) and the connectivity probe
//! (aggregate reachability, medium, addresses). Every result is built
//! fresh per call and every field has a default when its source failed.

pub mod classify;
pub mod connectivity;
pub mod wireless;

use crate::platform::{AdapterKind, Providers};
use crate::types::{NetworkInfoResult, NetworkSecurityResult};

use self::connectivity::MediumHint;

/// Run the security-check operation.
///
/// Wireless-only by design: a wired-only machine has no wireless security
/// to report, so the connectivity probe is not consulted and the result is
/// simply "not connected".
pub fn check_wifi_security(providers: &Providers) -> NetworkSecurityResult {
    let observation = wireless::observe(providers.wifi.as_ref());

    let mut result = NetworkSecurityResult {
        // No permission grant is required on the supported OS.
        has_permission: true,
        is_connected: observation.connected,
        is_wifi: observation.connected,
        error: observation.error,
        ..Default::default()
    };

    if let Some(association) = observation.association {
        let level = classify::classify(association.auth_algorithm);
        result.ssid = Some(association.ssid);
        result.is_secure = Some(level.is_secure());
        result.security_type = Some(level);
        result.signal_level = Some(association.signal_quality);
        result.signal_strength = Some(association.link_rate);
    }

    result
}

/// Run the general-info operation.
pub fn network_info(providers: &Providers) -> NetworkInfoResult {
    let observation =
        connectivity::observe(providers.awareness.as_ref(), providers.wifi.as_ref());

    if observation.degraded {
        // Awareness subsystem gone: every boolean stays false and no
        // further step runs. A degraded result, not an error.
        return NetworkInfoResult::default();
    }

    let connected = observation.ipv4_internet || observation.ipv6_internet;
    let mut result = NetworkInfoResult {
        is_connected: connected,
        has_internet: connected,
        is_validated: observation.validated,
        ..Default::default()
    };

    // Weak medium hints from the connection enumeration.
    for connection in &observation.active_connections {
        match connection.medium_hint {
            MediumHint::Wireless => result.is_wifi = true,
            MediumHint::WiredAssumed => result.is_ethernet = true,
        }
    }

    // Adapter-table refinement: authoritative for addresses and outranks
    // the hints for medium. The aggregate flags above are never touched.
    if let Some(primary) = connectivity::primary_adapter(providers.adapters.as_ref()) {
        match primary.kind {
            AdapterKind::Ethernet => result.is_ethernet = true,
            AdapterKind::Wireless => result.is_wifi = true,
            AdapterKind::Other => {}
        }
        result.ip_address = Some(primary.ip_address);
        result.gateway_address = Some(primary.gateway_address);
    }

    result
}
