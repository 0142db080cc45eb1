//! LED output
//!
//! Drives an LED (or any other digital load) from one port bit.

use core::convert::Infallible;

use unoio_core::traits::DigitalOutput;
use unoio_hal::{route, Port, Register, RegisterBank};

/// LED on a single output bit
///
/// The LED is active-high: `on` sets the output bit. Built on an
/// unroutable pin, the LED is unbound and never touches a register.
#[derive(Debug)]
pub struct Led<R> {
    regs: R,
    port: Option<Port>,
    bit: u8,
    /// Current logical state (true = lit)
    is_on: bool,
}

impl<R: RegisterBank> Led<R> {
    /// Create an LED on board pin `pin`
    ///
    /// Configures the bit as an output and drives it low.
    pub fn new(regs: R, pin: u8) -> Self {
        let (port, bit) = route(pin);
        if let Some(port) = port {
            regs.set_bit(Register::Direction(port), bit);
            regs.clear_bit(Register::Output(port), bit);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("LED on pin {} -> {}.{}", pin, port, bit);

        Self {
            regs,
            port,
            bit,
            is_on: false,
        }
    }

    /// Port the LED is bound to, `None` if unbound
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    /// Bit within the port (0 when unbound)
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Check if the LED drives hardware
    pub fn is_bound(&self) -> bool {
        self.port.is_some()
    }

    /// Clear the hardware and consume the LED
    pub fn delete(mut self) {
        self.clear();
    }

    fn write(&mut self, high: bool) {
        if let Some(port) = self.port {
            self.regs.write_bit(Register::Output(port), self.bit, high);
        }
        self.is_on = high;
    }
}

impl<R: RegisterBank> DigitalOutput for Led<R> {
    fn on(&mut self) {
        self.write(true);
    }

    fn off(&mut self) {
        self.write(false);
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn clear(&mut self) {
        if let Some(port) = self.port.take() {
            self.regs.clear_bit(Register::Direction(port), self.bit);
            self.regs.clear_bit(Register::Output(port), self.bit);

            #[cfg(feature = "defmt")]
            defmt::debug!("LED {}.{} released", port, self.bit);
        }
        self.bit = 0;
        self.is_on = false;
    }
}

impl<R: RegisterBank> embedded_hal::digital::ErrorType for Led<R> {
    type Error = Infallible;
}

impl<R: RegisterBank> embedded_hal::digital::OutputPin for Led<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.off();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.on();
        Ok(())
    }
}

impl<R: RegisterBank> embedded_hal::digital::StatefulOutputPin for Led<R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_on)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_on)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        DigitalOutput::toggle(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use unoio_hal::sim::{SimDelay, SimRegisters};

    #[test]
    fn test_new_configures_output_low() {
        let regs = SimRegisters::new();
        regs.set_bit(Register::Output(Port::B), 0);

        let led = Led::new(&regs, 8);

        assert_eq!(led.port(), Some(Port::B));
        assert_eq!(led.bit(), 0);
        assert!(!led.is_on());
        assert_eq!(regs.value(Register::Direction(Port::B)), 0b0000_0001);
        assert!(!regs.pin_output(8));
    }

    #[test]
    fn test_on_off_drive_the_bit() {
        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 6);

        led.on();
        assert!(led.is_on());
        assert!(regs.pin_output(6));

        led.off();
        assert!(!led.is_on());
        assert!(!regs.pin_output(6));
    }

    #[test]
    fn test_on_and_off_are_idempotent() {
        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 15);

        led.on();
        let once = regs.outputs();
        led.on();
        assert_eq!(regs.outputs(), once);
        assert!(led.is_on());

        led.off();
        let once = regs.outputs();
        led.off();
        assert_eq!(regs.outputs(), once);
        assert!(!led.is_on());
    }

    #[test]
    fn test_only_own_bit_changes() {
        let regs = SimRegisters::new();
        let mut a = Led::new(&regs, 6);
        let mut b = Led::new(&regs, 7);

        a.on();
        b.on();
        a.off();

        assert_eq!(regs.value(Register::Output(Port::D)), 0b1000_0000);
    }

    #[test]
    fn test_blink_toggles_and_waits() {
        let regs = SimRegisters::new();
        let mut delay = SimDelay::observing(&regs);
        let mut led = Led::new(&regs, 13);

        led.blink(&mut delay, 100);
        led.blink(&mut delay, 100);

        assert_eq!(delay.elapsed_ms(), 200);
        assert_eq!(delay.waits()[0].outputs, [0b0010_0000, 0, 0]);
        assert_eq!(delay.waits()[1].outputs, [0, 0, 0]);
        assert!(!led.is_on());
    }

    #[test]
    fn test_clear_unbinds() {
        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 9);
        led.on();

        led.clear();
        assert!(!led.is_bound());
        assert_eq!(led.bit(), 0);
        assert!(!led.is_on());
        assert_eq!(regs.value(Register::Direction(Port::B)), 0);
        assert_eq!(regs.value(Register::Output(Port::B)), 0);

        // Accepted, but no hardware effect
        led.on();
        led.toggle();
        assert_eq!(regs.outputs(), [0, 0, 0]);
    }

    #[test]
    fn test_unroutable_pin_is_inert() {
        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 42);

        assert!(!led.is_bound());
        led.on();
        assert!(led.is_on());
        assert_eq!(regs.outputs(), [0, 0, 0]);
        assert_eq!(regs.value(Register::Direction(Port::D)), 0);
    }

    #[test]
    fn test_delete_releases_pin() {
        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 19);
        led.on();
        led.delete();

        assert_eq!(regs.value(Register::Direction(Port::C)), 0);
        assert_eq!(regs.value(Register::Output(Port::C)), 0);
    }

    #[test]
    fn test_embedded_hal_traits() {
        use embedded_hal::digital::{OutputPin, StatefulOutputPin};

        let regs = SimRegisters::new();
        let mut led = Led::new(&regs, 2);

        led.set_high().unwrap();
        assert!(regs.pin_output(2));
        assert!(led.is_set_high().unwrap());

        StatefulOutputPin::toggle(&mut led).unwrap();
        assert!(led.is_set_low().unwrap());
        assert!(!regs.pin_output(2));
    }

    proptest! {
        #[test]
        fn toggle_twice_restores(pin in any::<u8>(), start_on in any::<bool>()) {
            let regs = SimRegisters::new();
            let mut led = Led::new(&regs, pin);
            if start_on {
                led.on();
            }
            let state = led.is_on();
            let outputs = regs.outputs();

            led.toggle();
            prop_assert_ne!(led.is_on(), state);
            led.toggle();

            prop_assert_eq!(led.is_on(), state);
            prop_assert_eq!(regs.outputs(), outputs);
        }
    }
}
