//! Push button input
//!
//! Reads a button (or any other digital signal) from one port bit and
//! controls its pin-change interrupt.
//!
//! The ATmega328P has three pin-change interrupt groups, one per port:
//!
//! | Port | Board pins | Group | Vector      |
//! |------|------------|-------|-------------|
//! | B    | 8 - 13     | 0     | PCINT0_vect |
//! | C    | A0 - A5    | 1     | PCINT1_vect |
//! | D    | 0 - 7      | 2     | PCINT2_vect |
//!
//! The group is fixed by the pin the button was built on. Interrupts fire
//! on both edges; the handler has to compare levels to tell a press from
//! a release.

use core::convert::Infallible;

use unoio_core::traits::DigitalInput;
use unoio_hal::{route, Port, Register, RegisterBank};

/// Button on a single input bit with the internal pull-up enabled
#[derive(Debug)]
pub struct Button<R> {
    regs: R,
    port: Option<Port>,
    bit: u8,
    /// Mirrors the pin's PCMSK bit
    interrupt_enabled: bool,
}

impl<R: RegisterBank> Button<R> {
    /// Create a button on board pin `pin`
    ///
    /// Configures the bit as an input with pull-up. The pin-change
    /// interrupt starts out masked.
    pub fn new(regs: R, pin: u8) -> Self {
        let (port, bit) = route(pin);
        if let Some(port) = port {
            regs.clear_bit(Register::Direction(port), bit);
            regs.set_bit(Register::Output(port), bit);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Button on pin {} -> {}.{}", pin, port, bit);

        Self {
            regs,
            port,
            bit,
            interrupt_enabled: false,
        }
    }

    /// Port the button is bound to, `None` if unbound
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    /// Bit within the port (0 when unbound)
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Check if the button reads hardware
    pub fn is_bound(&self) -> bool {
        self.port.is_some()
    }

    /// Pin-change interrupt group serving this button
    pub fn interrupt_group(&self) -> Option<u8> {
        self.port.map(Port::interrupt_group)
    }

    /// Clear the hardware and consume the button
    pub fn delete(mut self) {
        self.clear();
    }
}

impl<R: RegisterBank> DigitalInput for Button<R> {
    fn is_pressed(&self) -> bool {
        match self.port {
            Some(port) => self.regs.read_bit(Register::Input(port), self.bit),
            None => false,
        }
    }

    fn enable_interrupt(&mut self) {
        let Some(port) = self.port else {
            return;
        };
        self.regs.enable_interrupts_globally();
        self.regs
            .set_bit(Register::PinChangeControl, port.interrupt_group());
        self.regs.set_bit(Register::PinChangeMask(port), self.bit);
        self.interrupt_enabled = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCINT unmasked on {}.{}", port, self.bit);
    }

    fn disable_interrupt(&mut self) {
        if let Some(port) = self.port {
            // PCIE stays set, other pins of the group may still use it
            self.regs.clear_bit(Register::PinChangeMask(port), self.bit);

            #[cfg(feature = "defmt")]
            defmt::debug!("PCINT masked on {}.{}", port, self.bit);
        }
        self.interrupt_enabled = false;
    }

    fn is_interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    fn clear(&mut self) {
        self.disable_interrupt();
        if let Some(port) = self.port.take() {
            self.regs.clear_bit(Register::Output(port), self.bit);
        }
        self.bit = 0;
    }
}

impl<R: RegisterBank> embedded_hal::digital::ErrorType for Button<R> {
    type Error = Infallible;
}

impl<R: RegisterBank> embedded_hal::digital::InputPin for Button<R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_pressed())
    }
}
