//! ATmega328P-specific HAL for unoio
//!
//! This crate implements the `unoio-hal` traits on the ATmega328P found
//! on the Arduino Uno, Nano and Pro Mini:
//!
//! - [`Atmega328p`] - the memory-mapped register file as a [`RegisterBank`]
//! - [`BusyDelay`] - cycle-counting [`DelayNs`](embedded_hal::delay::DelayNs)
//!
//! # Features
//!
//! - `critical-section-impl` - register a `critical-section` implementation
//!   that masks interrupts through SREG (needed by heap allocators)
//! - `defmt` - Enable debug formatting support
//!
//! [`RegisterBank`]: unoio_hal::RegisterBank

#![no_std]

#[cfg(feature = "critical-section-impl")]
mod sreg_lock;
pub mod delay;
pub mod registers;

pub use delay::BusyDelay;
pub use registers::Atmega328p;

// Re-export shared items from unoio-hal
pub use unoio_hal::{route, Port, Register, RegisterBank};
