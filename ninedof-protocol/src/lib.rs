//! Wire protocol for the "9DoF" serial sensor stick
//!
//! The board streams fixed-format binary telemetry and accepts a small
//! ASCII command protocol for runtime reconfiguration. Telemetry framing:
//!
//! ```text
//! ┌────────────┬───────────────┬────────────┐
//! │ MAGIC      │ PAYLOAD       │ TERMINATOR │
//! │ "9DoF"  4B │ 30 / 6 / 12 B │ '\n'    1B │
//! └────────────┴───────────────┴────────────┘
//! ```
//!
//! The payload length is fixed by the active [`DataMode`]. There is no
//! length field and no wire checksum: a frame is valid when the magic
//! sequence aligned it and the terminator byte is `\n`. Commands travel
//! the other way, prefixed with `#`, and are never acknowledged.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod telemetry;

pub use command::{baud_id, Command, COMMAND_PREFIX, MAX_COMMAND_SIZE};
pub use frame::{DataMode, FrameParser, PacketEvent, MAGIC, MAX_PAYLOAD_SIZE, TERMINATOR};
pub use telemetry::{EulerFrame, GyroCounts, InertialFrame, GYRO_SCALE};
