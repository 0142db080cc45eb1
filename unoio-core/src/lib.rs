//! Board-agnostic core logic for unoio
//!
//! This crate contains everything that does not depend on a particular
//! register implementation:
//!
//! - Capability traits for digital outputs and inputs
//! - The growable LED array and its choreography (chase, flash)
//! - Button-count pattern selection
//! - Board configuration types

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod array;
pub mod config;
pub mod pattern;
pub mod traits;

pub use array::{ArrayError, LedArray, PushError};
pub use config::{BoardConfig, ConfigError};
pub use pattern::{count_pressed, Pattern};
pub use traits::{DigitalInput, DigitalOutput};
