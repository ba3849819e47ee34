//! Outgoing command protocol
//!
//! Every command is ASCII-prefixed with `#`, followed by a selector byte
//! and an optional argument. The device never acknowledges a command;
//! success is only observable through subsequent telemetry.

use heapless::Vec;

use crate::frame::DataMode;

/// Prefix byte opening every command
pub const COMMAND_PREFIX: u8 = b'#';

/// Longest encoded command (`#i` plus a two-byte interval)
pub const MAX_COMMAND_SIZE: usize = 4;

/// A command addressed to the sensor board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Tell the device to switch its link speed to the rate behind `id`
    /// (see [`baud_id`]). Carried as an ASCII digit.
    SetBaud { id: u8 },
    /// Set the device sample interval in milliseconds, MSB first
    SetInterval(u16),
    /// Enable or disable device-side continuous streaming
    SetContinuous(bool),
    /// Select the telemetry payload layout. Carried as a raw mode byte.
    SetMode(DataMode),
    /// Ask for exactly one frame (non-continuous operation)
    RequestFrame,
    /// Re-zero accelerometer XY and gyroscope XYZ
    ZeroCalibrate,
}

impl Command {
    /// Encode this command to wire bytes.
    pub fn encode(&self) -> Vec<u8, MAX_COMMAND_SIZE> {
        let mut out = Vec::new();
        // Capacity covers the longest encoding; pushes cannot fail.
        let _ = match *self {
            Command::SetBaud { id } => out.extend_from_slice(&[COMMAND_PREFIX, b'b', b'0' + id]),
            Command::SetInterval(ms) => {
                out.extend_from_slice(&[COMMAND_PREFIX, b'i', (ms >> 8) as u8, ms as u8])
            }
            Command::SetContinuous(true) => out.extend_from_slice(b"#o1"),
            Command::SetContinuous(false) => out.extend_from_slice(b"#o0"),
            Command::SetMode(mode) => {
                out.extend_from_slice(&[COMMAND_PREFIX, b'm', mode.wire_byte()])
            }
            Command::RequestFrame => out.extend_from_slice(b"#f"),
            Command::ZeroCalibrate => out.extend_from_slice(b"#z"),
        };
        out
    }
}

/// Map a baud rate to the single-digit identifier the `#b` command
/// carries.
///
/// Nine rates are supported; anything else returns `None` and callers
/// must treat the change as unsupported (no I/O, no state change).
pub const fn baud_id(rate: u32) -> Option<u8> {
    match rate {
        2400 => Some(1),
        4800 => Some(2),
        9600 => Some(3),
        14400 => Some(4),
        19200 => Some(5),
        28800 => Some(6),
        38400 => Some(7),
        57600 => Some(8),
        115200 => Some(9),
        _ => None,
    }
}
