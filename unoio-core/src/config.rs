//! Board configuration
//!
//! Which pins carry LEDs, which carry buttons, and how fast the LEDs
//! blink. The firmware bakes this in from `board.toml`; host tools can
//! read it with serde when the `serde` feature is on.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use unoio_hal::route;

/// Maximum LEDs per board
pub const MAX_LEDS: usize = 16;

/// Maximum buttons per board
pub const MAX_BUTTONS: usize = 8;

/// Default blink half-period
pub const DEFAULT_BLINK_SPEED_MS: u32 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number does not exist on the board
    InvalidPin(u8),
    /// Pin is assigned to more than one device
    DuplicatePin(u8),
    /// Blink speed of zero
    InvalidBlinkSpeed,
    /// More pins than the board configuration holds
    TooManyPins,
}

/// LED and button layout of a board
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// LED pins, in array order
    pub led_pins: Vec<u8, MAX_LEDS>,
    /// Button pins
    pub button_pins: Vec<u8, MAX_BUTTONS>,
    /// Blink half-period in milliseconds
    #[cfg_attr(feature = "serde", serde(default = "default_blink_speed"))]
    pub blink_speed_ms: u32,
}

#[cfg(feature = "serde")]
fn default_blink_speed() -> u32 {
    DEFAULT_BLINK_SPEED_MS
}

impl Default for BoardConfig {
    /// Five LEDs on pins 6 - 10, buttons on 11, 12, 13 and 2
    fn default() -> Self {
        Self {
            led_pins: Vec::from_slice(&[6, 7, 8, 9, 10]).unwrap_or_default(),
            button_pins: Vec::from_slice(&[11, 12, 13, 2]).unwrap_or_default(),
            blink_speed_ms: DEFAULT_BLINK_SPEED_MS,
        }
    }
}

impl BoardConfig {
    /// Create a configuration from pin lists
    pub fn new(
        led_pins: &[u8],
        button_pins: &[u8],
        blink_speed_ms: u32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            led_pins: Vec::from_slice(led_pins).map_err(|_| ConfigError::TooManyPins)?,
            button_pins: Vec::from_slice(button_pins).map_err(|_| ConfigError::TooManyPins)?,
            blink_speed_ms,
        })
    }

    /// Check the configuration against the board
    ///
    /// Devices on unroutable pins still construct (they are simply inert),
    /// and two devices on one pin are not detected at runtime, so this is
    /// where such mistakes get caught.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blink_speed_ms == 0 {
            return Err(ConfigError::InvalidBlinkSpeed);
        }

        let mut used: u32 = 0;
        for &pin in self.led_pins.iter().chain(self.button_pins.iter()) {
            if route(pin).0.is_none() {
                return Err(ConfigError::InvalidPin(pin));
            }
            if used & (1 << pin) != 0 {
                return Err(ConfigError::DuplicatePin(pin));
            }
            used |= 1 << pin;
        }
        Ok(())
    }
}
