//! Board assembly
//!
//! Builds the LEDs and buttons described by a [`BoardConfig`] on one
//! register bank and runs the button-selected pattern on the LEDs.
//!
//! ```ignore
//! let regs = unsafe { Atmega328p::steal() };
//! let mut board = Board::new(regs, &BoardConfig::default())?;
//! let mut delay = BusyDelay::default();
//! loop {
//!     board.step(&mut delay);
//! }
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use unoio_core::array::{ArrayError, LedArray};
use unoio_core::config::{BoardConfig, ConfigError, MAX_BUTTONS};
use unoio_core::pattern::{count_pressed, Pattern};
use unoio_core::traits::DigitalInput;
use unoio_hal::RegisterBank;

use crate::button::Button;
use crate::led::Led;

/// Errors while assembling a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// The LED array could not grow
    Array(ArrayError),
    /// The configuration does not fit the board
    Config(ConfigError),
}

impl From<ArrayError> for BoardError {
    fn from(e: ArrayError) -> Self {
        BoardError::Array(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Config(e)
    }
}

/// LEDs and buttons of one board
pub struct Board<R> {
    leds: LedArray<Led<R>>,
    buttons: Vec<Button<R>, MAX_BUTTONS>,
    blink_speed_ms: u32,
}

impl<R: RegisterBank + Clone> Board<R> {
    /// Create every device named in `config`
    ///
    /// The configuration is not validated here: unroutable pins produce
    /// inert devices. Call [`BoardConfig::validate`] first to reject them.
    pub fn new(regs: R, config: &BoardConfig) -> Result<Self, BoardError> {
        Self::assemble(regs, config, LedArray::new(0)?)
    }

    /// Like [`new`](Self::new), but the LED array never grows beyond
    /// `limit` LEDs
    pub fn with_led_limit(regs: R, config: &BoardConfig, limit: usize) -> Result<Self, BoardError> {
        Self::assemble(regs, config, LedArray::with_limit(0, limit)?)
    }

    /// Populate `leds` and the buttons
    ///
    /// On failure every device created so far is cleared again.
    fn assemble(
        regs: R,
        config: &BoardConfig,
        mut leds: LedArray<Led<R>>,
    ) -> Result<Self, BoardError> {
        for &pin in config.led_pins.iter() {
            if let Err(e) = leds.push(Led::new(regs.clone(), pin)) {
                let error = e.error;
                e.into_device().delete();
                leds.clear_content();
                return Err(error.into());
            }
        }

        let mut buttons: Vec<Button<R>, MAX_BUTTONS> = Vec::new();
        for &pin in config.button_pins.iter() {
            if let Err(button) = buttons.push(Button::new(regs.clone(), pin)) {
                button.delete();
                leds.clear_content();
                for button in buttons.iter_mut() {
                    button.clear();
                }
                return Err(ConfigError::TooManyPins.into());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Board ready: {} LEDs, {} buttons",
            leds.len(),
            buttons.len()
        );

        Ok(Self {
            leds,
            buttons,
            blink_speed_ms: config.blink_speed_ms,
        })
    }
}

impl<R: RegisterBank> Board<R> {
    /// The LED array
    pub fn leds(&self) -> &LedArray<Led<R>> {
        &self.leds
    }

    /// The LED array, mutably
    pub fn leds_mut(&mut self) -> &mut LedArray<Led<R>> {
        &mut self.leds
    }

    /// The buttons, in configuration order
    pub fn buttons(&self) -> &[Button<R>] {
        &self.buttons
    }

    /// The buttons, mutably
    pub fn buttons_mut(&mut self) -> &mut [Button<R>] {
        &mut self.buttons
    }

    /// Blink half-period in milliseconds
    pub fn blink_speed_ms(&self) -> u32 {
        self.blink_speed_ms
    }

    /// Number of buttons currently pressed
    pub fn pressed(&self) -> usize {
        count_pressed(&self.buttons)
    }

    /// Poll the buttons and run one pass of the selected pattern
    ///
    /// Returns the pattern that ran.
    pub fn step(&mut self, delay: &mut dyn DelayNs) -> Pattern {
        let pattern = Pattern::from_pressed(self.pressed());
        self.leds.run(pattern, delay, self.blink_speed_ms);
        pattern
    }

    /// Release every pin of the board
    pub fn teardown(mut self) {
        self.leds.clear_content();
        for button in self.buttons.iter_mut() {
            button.clear();
        }
        self.leds.delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unoio_hal::sim::{SimDelay, SimRegisters, Wait};
    use unoio_hal::{Port, Register};

    const LEDS: [u8; 3] = [6, 7, 8];
    const BUTTONS: [u8; 4] = [11, 12, 13, 2];

    fn board(regs: &SimRegisters) -> Board<&SimRegisters> {
        let config = BoardConfig::new(&LEDS, &BUTTONS, 10).unwrap();
        Board::new(regs, &config).unwrap()
    }

    fn press(regs: &SimRegisters, count: usize) {
        for (i, &pin) in BUTTONS.iter().enumerate() {
            regs.drive_pin(pin, i < count);
        }
    }

    /// Output latches restricted to the LED bits (buttons keep their
    /// pull-up bits set in the same registers)
    fn led_bits(outputs: [u8; 3]) -> [u8; 3] {
        let [b, _, d] = outputs;
        [b & 0b0000_0001, 0, d & 0b1100_0000]
    }

    fn lit_count(outputs: [u8; 3]) -> u32 {
        led_bits(outputs).iter().map(|port| port.count_ones()).sum()
    }

    #[test]
    fn test_new_builds_devices_in_order() {
        let regs = SimRegisters::new();
        let board = board(&regs);

        assert_eq!(board.leds().len(), 3);
        assert_eq!(board.buttons().len(), 4);
        assert_eq!(board.leds().get(2).and_then(|led| led.port()), Some(Port::B));
        assert_eq!(board.blink_speed_ms(), 10);
        // Pins 6 and 7 on port D, 8 on port B are outputs
        assert_eq!(regs.value(Register::Direction(Port::D)), 0b1100_0000);
        assert_eq!(regs.value(Register::Direction(Port::B)), 0b0000_0001);
    }

    #[test]
    fn test_no_buttons_turns_everything_off() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::observing(&regs);
        board.leds_mut().on_all();

        press(&regs, 0);
        assert_eq!(board.step(&mut delay), Pattern::AllOff);
        assert_eq!(board.leds().num_on(), 0);
        assert_eq!(delay.elapsed_ms(), 0);
    }

    #[test]
    fn test_two_buttons_select_forward_chase() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::observing(&regs);

        press(&regs, 2);
        assert_eq!(board.pressed(), 2);
        assert_eq!(board.step(&mut delay), Pattern::BlinkForward);

        // One LED lit per wait, moving 6 -> 7 -> 8
        let lit: std::vec::Vec<Wait> = delay
            .waits()
            .iter()
            .map(|w| Wait { outputs: led_bits(w.outputs), ..*w })
            .collect();
        assert_eq!(
            lit,
            [
                Wait { duration_ms: 10, outputs: [0, 0, 0b0100_0000] },
                Wait { duration_ms: 10, outputs: [0, 0, 0b1000_0000] },
                Wait { duration_ms: 10, outputs: [0b0000_0001, 0, 0] },
            ]
        );
        assert_eq!(led_bits(regs.outputs()), [0, 0, 0]);
    }

    #[test]
    fn test_three_buttons_select_backward_chase() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::observing(&regs);

        press(&regs, 3);
        assert_eq!(board.step(&mut delay), Pattern::BlinkBackward);

        let lit: std::vec::Vec<[u8; 3]> =
            delay.waits().iter().map(|w| led_bits(w.outputs)).collect();
        assert_eq!(
            lit,
            [[0b0000_0001, 0, 0], [0, 0, 0b1000_0000], [0, 0, 0b0100_0000]]
        );
    }

    #[test]
    fn test_one_button_flashes_all_together() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::observing(&regs);

        press(&regs, 1);
        assert_eq!(board.step(&mut delay), Pattern::BlinkCollectively);

        let waits = delay.waits();
        assert_eq!(waits.len(), 2);
        assert_eq!(lit_count(waits[0].outputs), 3);
        assert_eq!(lit_count(waits[1].outputs), 0);
        assert_eq!(delay.elapsed_ms(), 20);
    }

    #[test]
    fn test_four_buttons_turn_all_on_without_blinking() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::observing(&regs);

        press(&regs, 4);
        assert_eq!(board.step(&mut delay), Pattern::AllOn);
        assert!(delay.waits().is_empty());
        assert_eq!(board.leds().num_on(), 3);
        assert!(LEDS.iter().all(|&pin| regs.pin_output(pin)));
    }

    #[test]
    fn test_floating_buttons_read_pressed() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::new();

        // No driver on any button: every pull-up reads high
        assert_eq!(board.pressed(), 4);
        assert_eq!(board.step(&mut delay), Pattern::AllOn);

        regs.drive_pin(BUTTONS[0], false);
        assert_eq!(board.pressed(), 3);
    }

    #[test]
    fn test_led_limit_failure_releases_pins() {
        let regs = SimRegisters::new();
        let config = BoardConfig::new(&LEDS, &BUTTONS, 10).unwrap();

        let result = Board::with_led_limit(&regs, &config, 2);

        assert!(matches!(result, Err(BoardError::Array(ArrayError::LimitReached))));
        for port in [Port::B, Port::C, Port::D] {
            assert_eq!(regs.value(Register::Direction(port)), 0);
            assert_eq!(regs.value(Register::Output(port)), 0);
        }
    }

    #[test]
    fn test_unroutable_pins_build_inert_devices() {
        let regs = SimRegisters::new();
        let config = BoardConfig::new(&[6, 25], &[40], 10).unwrap();
        let mut board = Board::new(&regs, &config).unwrap();
        let mut delay = SimDelay::new();

        assert!(!board.leds().get(1).unwrap().is_bound());
        assert_eq!(board.pressed(), 0);
        board.leds_mut().on_all();
        assert_eq!(regs.outputs(), [0, 0, 0b0100_0000]);
        assert_eq!(board.step(&mut delay), Pattern::AllOff);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let regs = SimRegisters::new();
        let mut board = board(&regs);
        let mut delay = SimDelay::new();
        board.buttons_mut()[0].enable_interrupt();
        press(&regs, 4);
        board.step(&mut delay);

        board.teardown();

        for port in [Port::B, Port::C, Port::D] {
            assert_eq!(regs.value(Register::Direction(port)), 0);
            assert_eq!(regs.value(Register::Output(port)), 0);
            assert_eq!(regs.value(Register::PinChangeMask(port)), 0);
        }
    }
}
