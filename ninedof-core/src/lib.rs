//! Board-agnostic session logic for the 9DoF sensor link
//!
//! This crate contains everything above the wire protocol that does not
//! depend on a specific transport or board:
//!
//! - Explicit session configuration (no process-wide mutable settings)
//! - The device session facade: polling, mode/rate/interval
//!   configuration, self-healing single-frame retries
//! - Packet statistics
//!
//! Transport and clock implementations are supplied by the caller through
//! the `ninedof-hal` traits.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod session;
pub mod stats;

pub use config::SessionConfig;
pub use session::Session;
pub use stats::LinkStats;
