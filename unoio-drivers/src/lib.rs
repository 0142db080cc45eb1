//! Digital I/O drivers
//!
//! This crate provides concrete implementations of the traits defined
//! in unoio-core on top of any `unoio_hal::RegisterBank`:
//!
//! - [`Led`] - digital output (LEDs, relays, buzzers)
//! - [`Button`] - digital input with pin-change interrupt control
//! - [`Board`] - LEDs and buttons assembled from a board configuration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod button;
pub mod led;

pub use board::{Board, BoardError};
pub use button::Button;
pub use led::Led;
