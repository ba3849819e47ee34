//! Telemetry frame recognition
//!
//! A byte-driven finite-state machine aligns on the 4-byte magic prefix,
//! collects the active mode's fixed-length payload, then expects a single
//! terminator byte. `\n` closes a good frame; any other byte marks the
//! frame bad. Either way the parser reports a packet event and re-arms.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 4-byte magic sequence opening every telemetry frame
pub const MAGIC: [u8; 4] = *b"9DoF";

/// Terminator byte of a well-formed frame
pub const TERMINATOR: u8 = b'\n';

/// Largest payload across all data modes (ALL mode)
pub const MAX_PAYLOAD_SIZE: usize = 30;

/// Telemetry payload layout selector.
///
/// Exactly one mode is active at a time; it fixes the payload length the
/// parser collects and the offsets the decoder reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataMode {
    /// Accelerometer + magnetometer (wide values) + gyroscope (narrow), 30 bytes
    #[default]
    All,
    /// Gyroscope only (narrow values), 6 bytes
    Gyro,
    /// Roll / pitch / yaw (wide values), 12 bytes
    Euler,
}

impl DataMode {
    /// Payload length in bytes for this mode
    pub const fn payload_len(self) -> usize {
        match self {
            DataMode::All => 30,
            DataMode::Gyro => 6,
            DataMode::Euler => 12,
        }
    }

    /// Mode byte as carried by the `#m` command
    pub const fn wire_byte(self) -> u8 {
        match self {
            DataMode::All => 0,
            DataMode::Gyro => 1,
            DataMode::Euler => 2,
        }
    }

    /// Parse a wire mode byte.
    ///
    /// Unknown values are unsupported; callers coerce them to the default
    /// mode (ALL) with `unwrap_or_default()`.
    pub const fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(DataMode::All),
            1 => Some(DataMode::Gyro),
            2 => Some(DataMode::Euler),
            _ => None,
        }
    }
}

/// Outcome of a completed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketEvent {
    /// Full-length payload closed by the terminator byte
    Good {
        /// Mode the payload was collected under
        mode: DataMode,
        /// Raw payload bytes, ready for the telemetry decoder
        payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    },
    /// Full-length payload closed by anything other than the terminator
    Bad,
}

/// State machine for recognizing incoming telemetry frames.
///
/// The parser is pure: one byte in per [`FrameParser::feed`], at most one
/// event out, no I/O and no panics. Payload collection is bounded by the
/// active mode's length, which never exceeds [`MAX_PAYLOAD_SIZE`].
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    mode: DataMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first magic byte
    SeekMagic0,
    /// Matched `9`, waiting for `D`
    SeekMagic1,
    /// Matched `9D`, waiting for `o`
    SeekMagic2,
    /// Matched `9Do`, waiting for `F`
    SeekMagic3,
    /// Accumulating payload, then exactly one terminator byte
    Collecting,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new(DataMode::default())
    }
}

impl FrameParser {
    /// Create a parser collecting frames for `mode`
    pub fn new(mode: DataMode) -> Self {
        Self {
            state: ParseState::SeekMagic0,
            buffer: Vec::new(),
            mode,
        }
    }

    /// Currently active data mode
    pub fn mode(&self) -> DataMode {
        self.mode
    }

    /// Switch the active mode.
    ///
    /// Discards any partially collected frame; a mode change invalidates
    /// in-flight framing.
    pub fn set_mode(&mut self, mode: DataMode) {
        self.mode = mode;
        self.reset();
    }

    /// Reset to seeking the start of a frame
    pub fn reset(&mut self) {
        self.state = ParseState::SeekMagic0;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser.
    ///
    /// Returns `Some(event)` when the byte completes a frame (good or
    /// bad), `None` otherwise. A mismatch while seeking silently re-arms
    /// at the first magic byte; the mismatched byte itself is not
    /// re-examined (strict resynchronization, no backtracking).
    pub fn feed(&mut self, byte: u8) -> Option<PacketEvent> {
        match self.state {
            ParseState::SeekMagic0 => {
                if byte == MAGIC[0] {
                    self.state = ParseState::SeekMagic1;
                }
                None
            }
            ParseState::SeekMagic1 => {
                self.state = if byte == MAGIC[1] {
                    ParseState::SeekMagic2
                } else {
                    ParseState::SeekMagic0
                };
                None
            }
            ParseState::SeekMagic2 => {
                self.state = if byte == MAGIC[2] {
                    ParseState::SeekMagic3
                } else {
                    ParseState::SeekMagic0
                };
                None
            }
            ParseState::SeekMagic3 => {
                self.state = if byte == MAGIC[3] {
                    ParseState::Collecting
                } else {
                    ParseState::SeekMagic0
                };
                None
            }
            ParseState::Collecting => {
                if self.buffer.len() >= self.mode.payload_len() {
                    // Payload complete; this byte is the terminator.
                    let event = if byte == TERMINATOR {
                        PacketEvent::Good {
                            mode: self.mode,
                            payload: self.buffer.clone(),
                        }
                    } else {
                        PacketEvent::Bad
                    };
                    self.reset();
                    Some(event)
                } else {
                    // Bounded by the length check above; capacity covers
                    // the largest mode.
                    let _ = self.buffer.push(byte);
                    None
                }
            }
        }
    }

    /// Feed a slice of bytes, stopping at the first packet event.
    ///
    /// Bytes after a completed frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<PacketEvent> {
        for &byte in bytes {
            if let Some(event) = self.feed(byte) {
                return Some(event);
            }
        }
        None
    }
}
