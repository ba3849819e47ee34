//! Ninedof Hardware Abstraction Layer
//!
//! This crate defines the capability traits the session logic is generic
//! over, so the same driver code runs against a hardware UART, a USB CDC
//! port, or a test double:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ninedof-core (Session<L, C>)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ninedof-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ hardware UART │       │  test double  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialLink`] - byte-oriented serial transport
//! - [`time::Clock`] - monotonic milliseconds and blocking settle delays

#![no_std]
#![deny(unsafe_code)]

pub mod serial;
pub mod time;

pub use serial::SerialLink;
pub use time::Clock;
