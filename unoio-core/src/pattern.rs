//! Button-driven pattern selection
//!
//! The number of buttons held down picks what the LED array does:
//!
//! | Pressed | Pattern              |
//! |---------|----------------------|
//! | 0       | all off              |
//! | 1       | collective flash     |
//! | 2       | forward chase        |
//! | 3       | backward chase       |
//! | 4       | all on               |
//! | other   | all off              |

use embedded_hal::delay::DelayNs;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::array::LedArray;
use crate::traits::{DigitalInput, DigitalOutput};

/// What an [`LedArray`] does during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Every LED off
    #[default]
    AllOff,
    /// All LEDs flash together
    BlinkCollectively,
    /// One LED at a time, first to last
    BlinkForward,
    /// One LED at a time, last to first
    BlinkBackward,
    /// Every LED on
    AllOn,
}

impl Pattern {
    /// Pattern selected by `pressed` buttons
    pub const fn from_pressed(pressed: usize) -> Self {
        match pressed {
            1 => Pattern::BlinkCollectively,
            2 => Pattern::BlinkForward,
            3 => Pattern::BlinkBackward,
            4 => Pattern::AllOn,
            _ => Pattern::AllOff,
        }
    }

    /// Whether one pass of this pattern blocks on the delay
    pub const fn blinks(self) -> bool {
        matches!(
            self,
            Pattern::BlinkCollectively | Pattern::BlinkForward | Pattern::BlinkBackward
        )
    }
}

/// Count the inputs that currently read pressed
pub fn count_pressed<'a, I, It>(inputs: It) -> usize
where
    I: DigitalInput + 'a,
    It: IntoIterator<Item = &'a I>,
{
    inputs.into_iter().filter(|input| input.is_pressed()).count()
}

impl<D: DigitalOutput> LedArray<D> {
    /// Run one pass of `pattern`
    ///
    /// Blinking patterns block for their full duration; `AllOn` and
    /// `AllOff` return immediately.
    pub fn run(&mut self, pattern: Pattern, delay: &mut dyn DelayNs, duration_ms: u32) {
        match pattern {
            Pattern::AllOff => self.off_all(),
            Pattern::BlinkCollectively => self.blink_collectively(delay, duration_ms),
            Pattern::BlinkForward => self.blink_forward(delay, duration_ms),
            Pattern::BlinkBackward => self.blink_backward(delay, duration_ms),
            Pattern::AllOn => self.on_all(),
        }
    }
}
