//! Session configuration
//!
//! All tunable link and device settings live in one explicit structure
//! handed to the session at construction, and the hardware settle times
//! around link-speed changes are named constants rather than ambient
//! pauses scattered through the code.

use ninedof_protocol::DataMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settle delay after telling the remote side to change its link speed (ms)
pub const REMOTE_SETTLE_MS: u32 = 100;

/// Settle delay when only the local port is being reconfigured (ms)
pub const LOCAL_SETTLE_MS: u32 = 10;

/// Settle delay after re-opening the port at the new rate (ms)
pub const REOPEN_SETTLE_MS: u32 = 10;

/// Sample interval the device boots with (ms)
pub const DEFAULT_UPDATE_INTERVAL_MS: u16 = 35;

/// Link and device settings applied when a session begins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Rate the transport is first opened at
    pub initial_baud: u32,
    /// Final rate, renegotiated after opening when it differs from
    /// `initial_baud`. An unsupported rate silently keeps the initial
    /// rate.
    pub baud: Option<u32>,
    /// Telemetry payload layout to select on startup
    pub data_mode: DataMode,
    /// Ask the device to stream frames on its own timer from startup
    pub continuous: bool,
    /// Sample interval to configure, or `None` to leave the device at
    /// [`DEFAULT_UPDATE_INTERVAL_MS`]
    pub update_interval_ms: Option<u16>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_baud: 9600,
            baud: None,
            data_mode: DataMode::default(),
            continuous: false,
            update_interval_ms: None,
        }
    }
}
