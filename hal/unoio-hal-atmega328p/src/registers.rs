//! Memory-mapped I/O registers of the ATmega328P
//!
//! Addresses are data-space addresses (I/O address + 0x20), so plain
//! volatile loads and stores reach them.

use core::ptr;

use unoio_hal::{Port, Register, RegisterBank};

pub const PINB: usize = 0x23;
pub const DDRB: usize = 0x24;
pub const PORTB: usize = 0x25;
pub const PINC: usize = 0x26;
pub const DDRC: usize = 0x27;
pub const PORTC: usize = 0x28;
pub const PIND: usize = 0x29;
pub const DDRD: usize = 0x2A;
pub const PORTD: usize = 0x2B;
pub const SREG: usize = 0x5F;
pub const PCICR: usize = 0x68;
pub const PCMSK0: usize = 0x6B;
pub const PCMSK1: usize = 0x6C;
pub const PCMSK2: usize = 0x6D;

/// Global interrupt enable bit in SREG
pub const SREG_I: u8 = 7;

/// Data-space address of a register
pub const fn address(reg: Register) -> usize {
    match reg {
        Register::Direction(Port::B) => DDRB,
        Register::Direction(Port::C) => DDRC,
        Register::Direction(Port::D) => DDRD,
        Register::Output(Port::B) => PORTB,
        Register::Output(Port::C) => PORTC,
        Register::Output(Port::D) => PORTD,
        Register::Input(Port::B) => PINB,
        Register::Input(Port::C) => PINC,
        Register::Input(Port::D) => PIND,
        Register::PinChangeControl => PCICR,
        Register::PinChangeMask(Port::B) => PCMSK0,
        Register::PinChangeMask(Port::C) => PCMSK1,
        Register::PinChangeMask(Port::D) => PCMSK2,
    }
}

#[inline(always)]
pub(crate) unsafe fn read(addr: usize) -> u8 {
    ptr::read_volatile(addr as *const u8)
}

#[inline(always)]
pub(crate) unsafe fn write(addr: usize, value: u8) {
    ptr::write_volatile(addr as *mut u8, value);
}

/// The ATmega328P register file
///
/// Zero-sized; all copies address the same hardware. Bit updates are
/// read-modify-write and are not atomic with respect to interrupt
/// handlers touching the same register.
#[derive(Debug, Clone, Copy)]
pub struct Atmega328p {
    _private: (),
}

impl Atmega328p {
    /// Get a handle to the register file
    ///
    /// # Safety
    ///
    /// Must only be called when running on an ATmega328P. On any other
    /// target the register addresses are meaningless.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterBank for Atmega328p {
    fn set_bit(&self, reg: Register, bit: u8) {
        let addr = address(reg);
        // SAFETY: `steal` guarantees we run on the ATmega328P
        unsafe { write(addr, read(addr) | (1 << bit)) }
    }

    fn clear_bit(&self, reg: Register, bit: u8) {
        let addr = address(reg);
        // SAFETY: `steal` guarantees we run on the ATmega328P
        unsafe { write(addr, read(addr) & !(1 << bit)) }
    }

    fn read_bit(&self, reg: Register, bit: u8) -> bool {
        // SAFETY: `steal` guarantees we run on the ATmega328P
        unsafe { read(address(reg)) & (1 << bit) != 0 }
    }

    fn enable_interrupts_globally(&self) {
        // SAFETY: `steal` guarantees we run on the ATmega328P
        let sreg = unsafe { read(SREG) };
        if sreg & (1 << SREG_I) != 0 {
            return;
        }
        // SAFETY: as above
        unsafe { write(SREG, sreg | (1 << SREG_I)) }

        #[cfg(feature = "defmt")]
        defmt::trace!("SREG.I set, interrupts enabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_registers_are_grouped() {
        for port in [Port::B, Port::C, Port::D] {
            let pin = address(Register::Input(port));
            assert_eq!(address(Register::Direction(port)), pin + 1);
            assert_eq!(address(Register::Output(port)), pin + 2);
        }
    }

    #[test]
    fn test_mask_register_follows_interrupt_group() {
        for port in [Port::B, Port::C, Port::D] {
            assert_eq!(
                address(Register::PinChangeMask(port)),
                PCMSK0 + port.interrupt_group() as usize
            );
        }
        assert_eq!(address(Register::PinChangeControl), PCICR);
    }
}
