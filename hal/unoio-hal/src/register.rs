//! Register bank abstraction
//!
//! The devices in `unoio-drivers` never touch memory directly. They
//! address registers symbolically and go through a [`RegisterBank`],
//! which is the memory-mapped chip on target and an in-memory model
//! on the host.

use crate::port::Port;

/// 8-bit I/O register addressed by the digital I/O layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Data direction register (DDRx); set = output
    Direction(Port),
    /// Output register (PORTx); drives outputs, enables pull-ups on inputs
    Output(Port),
    /// Input register (PINx); current logic level of the port
    Input(Port),
    /// Pin-change interrupt control register (PCICR)
    PinChangeControl,
    /// Pin-change mask register for the port's interrupt group (PCMSKn)
    PinChangeMask(Port),
}

/// Bit-level access to the I/O registers
///
/// Methods take `&self`: the registers are shared by every device on
/// the board, and implementations provide their own interior mutability
/// (volatile MMIO on target, cells in simulation).
///
/// Implementations must only modify the addressed bit.
pub trait RegisterBank {
    /// Set a bit (logic 1) without affecting the others
    fn set_bit(&self, reg: Register, bit: u8);

    /// Clear a bit (logic 0) without affecting the others
    fn clear_bit(&self, reg: Register, bit: u8);

    /// Read a single bit
    fn read_bit(&self, reg: Register, bit: u8) -> bool;

    /// Globally enable interrupts
    ///
    /// Idempotent. There is no counterpart: devices only mask
    /// their own pin, other pins may rely on the global switch.
    fn enable_interrupts_globally(&self);

    /// Set or clear a bit depending on `high`
    fn write_bit(&self, reg: Register, bit: u8, high: bool) {
        if high {
            self.set_bit(reg, bit);
        } else {
            self.clear_bit(reg, bit);
        }
    }
}

impl<T: RegisterBank + ?Sized> RegisterBank for &T {
    fn set_bit(&self, reg: Register, bit: u8) {
        (**self).set_bit(reg, bit);
    }

    fn clear_bit(&self, reg: Register, bit: u8) {
        (**self).clear_bit(reg, bit);
    }

    fn read_bit(&self, reg: Register, bit: u8) -> bool {
        (**self).read_bit(reg, bit)
    }

    fn enable_interrupts_globally(&self) {
        (**self).enable_interrupts_globally();
    }
}
