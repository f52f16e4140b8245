//! Windows implementations of the OS provider traits.
//!
//! Wireless state comes from the WLAN API, aggregate connectivity and the
//! connection enumeration from the Network List Manager COM service, and
//! adapter records from `GetAdaptersInfo`. Every OS allocation is held by
//! an owning guard so early-return paths cannot skip release.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::mem;

use windows::core::GUID;
use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_SUCCESS, HANDLE};
use windows::Win32::NetworkManagement::IpHelper::{GetAdaptersInfo, IP_ADAPTER_INFO};
use windows::Win32::NetworkManagement::WiFi::{
    wlan_interface_state_connected, wlan_intf_opcode_current_connection, WlanCloseHandle,
    WlanEnumInterfaces, WlanFreeMemory, WlanOpenHandle, WlanQueryInterface,
    WLAN_CONNECTION_ATTRIBUTES, WLAN_INTERFACE_INFO_LIST, WLAN_OPCODE_VALUE_TYPE,
};
use windows::Win32::Networking::NetworkListManager::{
    INetworkConnection, INetworkListManager, NetworkListManager, NLM_CONNECTIVITY_IPV4_INTERNET,
    NLM_CONNECTIVITY_IPV6_INTERNET,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
};

use crate::types::AuthAlgorithm;

use super::{
    AdapterKind, AdapterRecord, AdapterTable, AwarenessSession, ConnectionRecord,
    ConnectivityFlags, NetAwareness, ProviderError, WifiSession, WifiSubsystem,
    WirelessConnection, WirelessInterface, WirelessInterfaceState,
};

// IP_ADAPTER_INFO type codes (ipifcons.h)
const MIB_IF_TYPE_ETHERNET: u32 = 6;
const IF_TYPE_IEEE80211: u32 = 71;

const WLAN_CLIENT_VERSION: u32 = 2;

fn unavailable(subsystem: &'static str, code: u32) -> ProviderError {
    ProviderError::Unavailable {
        subsystem,
        message: format!("error code {code}"),
    }
}

fn query_failed(operation: &'static str, message: impl Into<String>) -> ProviderError {
    ProviderError::QueryFailed {
        operation,
        message: message.into(),
    }
}

// ============================================================================
// Wireless subsystem (WLAN API)
// ============================================================================

/// Owned WLAN client handle; closed on drop.
struct WlanHandle(HANDLE);

impl Drop for WlanHandle {
    fn drop(&mut self) {
        unsafe {
            WlanCloseHandle(self.0, None);
        }
    }
}

/// Owned WLAN-allocated buffer; freed on drop.
struct WlanBuffer<T>(*mut T);

impl<T> Drop for WlanBuffer<T> {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                WlanFreeMemory(self.0 as *const c_void);
            }
        }
    }
}

pub struct WindowsWifi;

impl WifiSubsystem for WindowsWifi {
    fn open(&self) -> Result<Box<dyn WifiSession>, ProviderError> {
        let mut negotiated = 0u32;
        let mut handle = HANDLE::default();
        let code =
            unsafe { WlanOpenHandle(WLAN_CLIENT_VERSION, None, &mut negotiated, &mut handle) };
        if code != ERROR_SUCCESS.0 {
            return Err(unavailable("wireless subsystem", code));
        }
        Ok(Box::new(WindowsWifiSession {
            handle: WlanHandle(handle),
            guids: RefCell::new(HashMap::new()),
        }))
    }
}

struct WindowsWifiSession {
    handle: WlanHandle,
    // interface id -> GUID, filled during enumeration
    guids: RefCell<HashMap<String, GUID>>,
}

impl WifiSession for WindowsWifiSession {
    fn interfaces(&self) -> Result<Vec<WirelessInterface>, ProviderError> {
        let mut list_ptr: *mut WLAN_INTERFACE_INFO_LIST = std::ptr::null_mut();
        let code = unsafe { WlanEnumInterfaces(self.handle.0, None, &mut list_ptr) };
        if code != ERROR_SUCCESS.0 {
            return Err(query_failed(
                "interface enumeration",
                format!("error code {code}"),
            ));
        }
        let list = WlanBuffer(list_ptr);

        let mut out = Vec::new();
        unsafe {
            let count = (*list.0).dwNumberOfItems as usize;
            let items = std::slice::from_raw_parts((*list.0).InterfaceInfo.as_ptr(), count);
            for info in items {
                let id = format!("{:?}", info.InterfaceGuid);
                self.guids.borrow_mut().insert(id.clone(), info.InterfaceGuid);
                let state = if info.isState == wlan_interface_state_connected {
                    WirelessInterfaceState::Connected
                } else {
                    WirelessInterfaceState::Disconnected
                };
                out.push(WirelessInterface {
                    id,
                    description: String::from_utf16_lossy(&info.strInterfaceDescription)
                        .trim_end_matches('\0')
                        .to_string(),
                    state,
                });
            }
        }
        Ok(out)
    }

    fn current_connection(
        &self,
        interface_id: &str,
    ) -> Result<Option<WirelessConnection>, ProviderError> {
        let guid = self
            .guids
            .borrow()
            .get(interface_id)
            .copied()
            .ok_or_else(|| {
                query_failed(
                    "connection attributes",
                    format!("unknown interface {interface_id}"),
                )
            })?;

        let mut size = 0u32;
        let mut data: *mut c_void = std::ptr::null_mut();
        let mut value_type = WLAN_OPCODE_VALUE_TYPE::default();
        let code = unsafe {
            WlanQueryInterface(
                self.handle.0,
                &guid,
                wlan_intf_opcode_current_connection,
                None,
                &mut size,
                &mut data,
                Some(&mut value_type),
            )
        };
        if code != ERROR_SUCCESS.0 {
            return Err(query_failed(
                "connection attributes",
                format!("error code {code}"),
            ));
        }
        if data.is_null() {
            return Ok(None);
        }
        let attrs = WlanBuffer(data as *mut WLAN_CONNECTION_ATTRIBUTES);

        let connection = unsafe {
            let assoc = &(*attrs.0).wlanAssociationAttributes;
            // SSID carries an explicit length; it is not NUL-terminated.
            let len = (assoc.dot11Ssid.uSSIDLength as usize).min(assoc.dot11Ssid.ucSSID.len());
            WirelessConnection {
                ssid: assoc.dot11Ssid.ucSSID[..len].to_vec(),
                auth_algorithm: AuthAlgorithm::from_code(
                    (*attrs.0).wlanSecurityAttributes.dot11AuthAlgorithm.0 as u32,
                ),
                signal_quality: assoc.wlanSignalQuality,
                link_rate: assoc.ulRxRate,
            }
        };
        Ok(Some(connection))
    }
}

// ============================================================================
// Network-awareness subsystem (Network List Manager)
// ============================================================================

/// COM apartment guard. Declared last in the session struct so interface
/// pointers are released before `CoUninitialize` runs.
struct ComGuard;

impl ComGuard {
    fn init() -> Result<Self, ProviderError> {
        // S_FALSE just means the thread was already initialized.
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
        if hr.is_err() {
            return Err(ProviderError::Unavailable {
                subsystem: "network awareness subsystem",
                message: format!("CoInitializeEx failed: {hr:?}"),
            });
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}

pub struct WindowsNetAwareness;

impl NetAwareness for WindowsNetAwareness {
    fn open(&self) -> Result<Box<dyn AwarenessSession>, ProviderError> {
        let com = ComGuard::init()?;
        let manager: INetworkListManager =
            unsafe { CoCreateInstance(&NetworkListManager, None, CLSCTX_ALL) }.map_err(|e| {
                ProviderError::Unavailable {
                    subsystem: "network awareness subsystem",
                    message: e.to_string(),
                }
            })?;
        Ok(Box::new(WindowsAwarenessSession {
            manager,
            _com: com,
        }))
    }
}

struct WindowsAwarenessSession {
    manager: INetworkListManager,
    _com: ComGuard,
}

fn nlm_flags(connectivity: i32) -> ConnectivityFlags {
    ConnectivityFlags {
        ipv4_internet: (connectivity & NLM_CONNECTIVITY_IPV4_INTERNET.0) != 0,
        ipv6_internet: (connectivity & NLM_CONNECTIVITY_IPV6_INTERNET.0) != 0,
    }
}

impl AwarenessSession for WindowsAwarenessSession {
    fn aggregate_connectivity(&self) -> Result<ConnectivityFlags, ProviderError> {
        let connectivity = unsafe { self.manager.GetConnectivity() }
            .map_err(|e| query_failed("aggregate connectivity", e.to_string()))?;
        Ok(nlm_flags(connectivity.0))
    }

    fn active_connections(&self) -> Result<Vec<ConnectionRecord>, ProviderError> {
        let enumerator = unsafe { self.manager.GetNetworkConnections() }
            .map_err(|e| query_failed("connection enumeration", e.to_string()))?;

        let mut out = Vec::new();
        loop {
            let mut slot: [Option<INetworkConnection>; 1] = [None];
            let mut fetched = 0u32;
            let hr = unsafe { enumerator.Next(&mut slot, Some(&mut fetched)) };
            if hr.is_err() || fetched == 0 {
                break;
            }
            // The interface pointer is released when `connection` drops at
            // the end of this iteration.
            let Some(connection) = slot[0].take() else {
                break;
            };
            let connectivity = match unsafe { connection.GetConnectivity() } {
                Ok(c) => c,
                Err(_) => continue,
            };
            let adapter_id = match unsafe { connection.GetAdapterId() } {
                Ok(guid) => format!("{guid:?}"),
                Err(_) => continue,
            };
            out.push(ConnectionRecord {
                adapter_id,
                connectivity: nlm_flags(connectivity.0),
            });
        }
        Ok(out)
    }
}

// ============================================================================
// IP adapter table (GetAdaptersInfo)
// ============================================================================

pub struct WindowsAdapterTable;

impl AdapterTable for WindowsAdapterTable {
    fn adapters(&self) -> Result<Vec<AdapterRecord>, ProviderError> {
        // Start with room for one record and retry once with the size the
        // OS asks for.
        let mut len = mem::size_of::<IP_ADAPTER_INFO>() as u32;
        let mut buf = vec![0u8; len as usize];
        let mut code =
            unsafe { GetAdaptersInfo(Some(buf.as_mut_ptr() as *mut IP_ADAPTER_INFO), &mut len) };
        if code == ERROR_BUFFER_OVERFLOW.0 {
            buf = vec![0u8; len as usize];
            code = unsafe {
                GetAdaptersInfo(Some(buf.as_mut_ptr() as *mut IP_ADAPTER_INFO), &mut len)
            };
        }
        if code != ERROR_SUCCESS.0 {
            return Err(ProviderError::Unavailable {
                subsystem: "adapter table",
                message: format!("error code {code}"),
            });
        }

        let mut out = Vec::new();
        let mut cursor = buf.as_ptr() as *const IP_ADAPTER_INFO;
        while !cursor.is_null() {
            let adapter = unsafe { &*cursor };
            let kind = match adapter.Type {
                MIB_IF_TYPE_ETHERNET => AdapterKind::Ethernet,
                IF_TYPE_IEEE80211 => AdapterKind::Wireless,
                _ => AdapterKind::Other,
            };
            out.push(AdapterRecord {
                kind,
                ip_address: fixed_address(&adapter.IpAddressList.IpAddress.String),
                gateway_address: fixed_address(&adapter.GatewayList.IpAddress.String),
            });
            cursor = adapter.Next;
        }
        Ok(out)
    }
}

/// Decode a fixed-size NUL-padded address field.
fn fixed_address(raw: &[i8; 16]) -> String {
    let bytes = unsafe { std::slice::from_raw_parts(raw.as_ptr() as *const u8, raw.len()) };
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
