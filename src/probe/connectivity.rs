//! Connectivity probe
//!
//! Three sources, consulted in order: the awareness subsystem's aggregate
//! reachability flags, per-connection medium hints cross-referenced with
//! wireless interface state, and the IP adapter table. The reconciler
//! merges them with fixed precedence (adapter table > hints; aggregate
//! flags are never overridden).

use super::wireless;
use crate::platform::{AdapterKind, AdapterTable, NetAwareness, WifiSubsystem};

/// Medium inferred for one active connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumHint {
    /// A connected wireless interface was seen while this connection had
    /// internet reachability.
    Wireless,
    /// No wireless signal; wired is assumed, not proven.
    WiredAssumed,
}

/// One active connection with internet reachability.
#[derive(Debug, Clone)]
pub struct ActiveConnection {
    pub adapter_id: String,
    pub medium_hint: MediumHint,
}

/// Aggregate connectivity plus per-connection hints.
///
/// Always produced; `degraded` marks the case where the awareness
/// subsystem could not be opened at all and every flag is a default.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityObservation {
    pub ipv4_internet: bool,
    pub ipv6_internet: bool,
    pub validated: bool,
    /// Connections with internet reachability, in enumeration order
    pub active_connections: Vec<ActiveConnection>,
    pub degraded: bool,
}

/// Primary adapter selected from the adapter table.
#[derive(Debug, Clone)]
pub struct PrimaryAdapter {
    pub kind: AdapterKind,
    pub ip_address: String,
    pub gateway_address: String,
}

/// Observe aggregate connectivity and per-connection medium hints.
///
/// The awareness session is released when it drops, on every path. Partial
/// failures degrade only their own step.
pub fn observe(awareness: &dyn NetAwareness, wifi: &dyn WifiSubsystem) -> ConnectivityObservation {
    let session = match awareness.open() {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(%err, "network awareness subsystem unavailable");
            return ConnectivityObservation {
                degraded: true,
                ..Default::default()
            };
        }
    };

    let mut observation = ConnectivityObservation::default();

    match session.aggregate_connectivity() {
        Ok(flags) => {
            // Reachability on either family counts as validated as well;
            // captive-portal states are not distinguished.
            observation.ipv4_internet = flags.ipv4_internet;
            observation.ipv6_internet = flags.ipv6_internet;
            observation.validated = flags.any_internet();
        }
        Err(err) => {
            tracing::debug!(%err, "aggregate connectivity query failed");
        }
    }

    match session.active_connections() {
        Ok(connections) => {
            // The wireless cross-check opens its own session; evaluate it
            // at most once per query and reuse the answer.
            let mut wireless_active: Option<bool> = None;
            for connection in connections {
                if !connection.connectivity.any_internet() {
                    continue;
                }
                let is_wireless = *wireless_active
                    .get_or_insert_with(|| wireless::any_interface_connected(wifi));
                observation.active_connections.push(ActiveConnection {
                    adapter_id: connection.adapter_id,
                    medium_hint: if is_wireless {
                        MediumHint::Wireless
                    } else {
                        MediumHint::WiredAssumed
                    },
                });
            }
        }
        Err(err) => {
            tracing::debug!(%err, "connection enumeration failed");
        }
    }

    observation
}

/// Scan the adapter table for the primary adapter.
///
/// The first configured ethernet adapter wins and short-circuits the scan;
/// failing that, the first configured wireless adapter. Adapters holding
/// the placeholder address are never selected, regardless of position or
/// type. Table order is enumeration order, not a preference ranking.
pub fn primary_adapter(adapters: &dyn AdapterTable) -> Option<PrimaryAdapter> {
    let records = match adapters.adapters() {
        Ok(records) => records,
        Err(err) => {
            tracing::debug!(%err, "adapter table unavailable");
            return None;
        }
    };

    let pick = records
        .iter()
        .find(|adapter| adapter.kind == AdapterKind::Ethernet && adapter.is_configured())
        .or_else(|| {
            records
                .iter()
                .find(|adapter| adapter.kind == AdapterKind::Wireless && adapter.is_configured())
        })?;

    Some(PrimaryAdapter {
        kind: pick.kind,
        ip_address: pick.ip_address.clone(),
        gateway_address: pick.gateway_address.clone(),
    })
}
