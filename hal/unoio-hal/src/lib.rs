//! unoio Hardware Abstraction Layer
//!
//! This crate defines the register-level interface the digital I/O layer
//! is written against, and the pin routing of the Arduino Uno. Chip
//! crates (`unoio-hal-atmega328p`) implement [`RegisterBank`] on real
//! memory-mapped registers; the `sim` feature provides an in-memory
//! implementation for host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (unoio-firmware, etc.)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  unoio-drivers (Led, Button, Board)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  unoio-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  unoio-hal-   │       │   sim (host)  │
//! │  atmega328p   │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`port::route`] - board pin number to (port, bit)
//! - [`RegisterBank`] - bit set/clear/read and the global interrupt switch
//! - [`DelayNs`] - blocking delay, re-exported from `embedded-hal`

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "sim")]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod port;
pub mod register;
#[cfg(feature = "sim")]
pub mod sim;

// Re-export key items at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use port::{route, Port, MAX_PIN};
pub use register::{Register, RegisterBank};
