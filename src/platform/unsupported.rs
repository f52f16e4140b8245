//! Fallback providers for targets without an OS backend.
//!
//! Every `open` reports its subsystem unavailable, so queries take the
//! documented degraded paths instead of failing outright.

use super::{
    AdapterRecord, AdapterTable, AwarenessSession, NetAwareness, ProviderError, WifiSession,
    WifiSubsystem,
};

const MESSAGE: &str = "not supported on this platform";

pub struct UnsupportedWifi;

impl WifiSubsystem for UnsupportedWifi {
    fn open(&self) -> Result<Box<dyn WifiSession>, ProviderError> {
        Err(ProviderError::Unavailable {
            subsystem: "wireless subsystem",
            message: MESSAGE.to_string(),
        })
    }
}

pub struct UnsupportedNetAwareness;

impl NetAwareness for UnsupportedNetAwareness {
    fn open(&self) -> Result<Box<dyn AwarenessSession>, ProviderError> {
        Err(ProviderError::Unavailable {
            subsystem: "network awareness subsystem",
            message: MESSAGE.to_string(),
        })
    }
}

pub struct UnsupportedAdapterTable;

impl AdapterTable for UnsupportedAdapterTable {
    fn adapters(&self) -> Result<Vec<AdapterRecord>, ProviderError> {
        Err(ProviderError::Unavailable {
            subsystem: "adapter table",
            message: MESSAGE.to_string(),
        })
    }
}
