//! In-memory register bank for host-side testing
//!
//! [`SimRegisters`] keeps every register the digital I/O layer touches in
//! a `Cell`, so devices can share it by reference just like the real
//! memory-mapped registers. [`SimDelay`] stands in for the blocking delay
//! and snapshots the output registers every time it is asked to wait,
//! which is how tests observe LED patterns "while they are lit".

use alloc::vec::Vec;
use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::port::{route, Port};
use crate::register::{Register, RegisterBank};

const PORTS: [Port; 3] = [Port::B, Port::C, Port::D];

// Register file layout: DDR/PORT/PIN for B, C, D, then PCICR, then PCMSK0..2
const REGISTER_COUNT: usize = 13;

fn port_offset(port: Port) -> usize {
    match port {
        Port::B => 0,
        Port::C => 1,
        Port::D => 2,
    }
}

fn index(reg: Register) -> usize {
    match reg {
        Register::Direction(port) => port_offset(port) * 3,
        Register::Output(port) => port_offset(port) * 3 + 1,
        Register::Input(port) => port_offset(port) * 3 + 2,
        Register::PinChangeControl => 9,
        Register::PinChangeMask(port) => 10 + port.interrupt_group() as usize,
    }
}

/// Simulated ATmega328P I/O register file
///
/// `Input` registers hold the externally driven level of each bit. Reading
/// an input bit resolves it the way the pin would:
///
/// - direction bit set: the output latch
/// - driven externally: the driven level
/// - otherwise: the pull-up, i.e. the output latch (PORTx) bit
#[derive(Debug, Default)]
pub struct SimRegisters {
    regs: [Cell<u8>; REGISTER_COUNT],
    /// Bits of each port with an external driver attached
    driven: [Cell<u8>; 3],
    global_interrupts: Cell<bool>,
}

impl SimRegisters {
    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a register
    ///
    /// For `Input` registers this is the externally driven level only.
    pub fn value(&self, reg: Register) -> u8 {
        self.regs[index(reg)].get()
    }

    /// Whether interrupts have been enabled globally
    pub fn interrupts_enabled(&self) -> bool {
        self.global_interrupts.get()
    }

    /// Drive the external level of a board pin
    ///
    /// Pins outside the routable range are ignored.
    pub fn drive_pin(&self, pin: u8, high: bool) {
        if let (Some(port), bit) = route(pin) {
            let driven = &self.driven[port_offset(port)];
            driven.set(driven.get() | (1 << bit));
            let cell = &self.regs[index(Register::Input(port))];
            if high {
                cell.set(cell.get() | (1 << bit));
            } else {
                cell.set(cell.get() & !(1 << bit));
            }
        }
    }

    /// Disconnect the external driver of a board pin
    ///
    /// The pin floats afterwards and reads its pull-up.
    pub fn release_pin(&self, pin: u8) {
        if let (Some(port), bit) = route(pin) {
            let driven = &self.driven[port_offset(port)];
            driven.set(driven.get() & !(1 << bit));
        }
    }

    /// Output latch of a board pin (false for unroutable pins)
    pub fn pin_output(&self, pin: u8) -> bool {
        match route(pin) {
            (Some(port), bit) => self.value(Register::Output(port)) & (1 << bit) != 0,
            (None, _) => false,
        }
    }

    /// Output latches of ports B, C and D, in that order
    pub fn outputs(&self) -> [u8; 3] {
        PORTS.map(|port| self.value(Register::Output(port)))
    }
}

impl RegisterBank for SimRegisters {
    fn set_bit(&self, reg: Register, bit: u8) {
        let cell = &self.regs[index(reg)];
        cell.set(cell.get() | (1 << bit));
    }

    fn clear_bit(&self, reg: Register, bit: u8) {
        let cell = &self.regs[index(reg)];
        cell.set(cell.get() & !(1 << bit));
    }

    fn read_bit(&self, reg: Register, bit: u8) -> bool {
        let mask = 1 << bit;
        let reg = match reg {
            Register::Input(port) if self.value(Register::Direction(port)) & mask != 0 => {
                Register::Output(port)
            }
            Register::Input(port) if self.driven[port_offset(port)].get() & mask == 0 => {
                Register::Output(port)
            }
            other => other,
        };
        self.value(reg) & mask != 0
    }

    fn enable_interrupts_globally(&self) {
        self.global_interrupts.set(true);
    }
}

/// One observed wait of a [`SimDelay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    /// Requested duration in milliseconds
    pub duration_ms: u32,
    /// Output latches of ports B, C and D while waiting
    pub outputs: [u8; 3],
}

/// Delay that returns immediately and records what it was asked to do
pub struct SimDelay<'a> {
    regs: Option<&'a SimRegisters>,
    elapsed_ns: u64,
    waits: Vec<Wait>,
}

impl<'a> SimDelay<'a> {
    /// Delay that only accumulates time
    pub fn new() -> Self {
        Self {
            regs: None,
            elapsed_ns: 0,
            waits: Vec::new(),
        }
    }

    /// Delay that snapshots the outputs of `regs` on every wait
    pub fn observing(regs: &'a SimRegisters) -> Self {
        Self {
            regs: Some(regs),
            ..Self::new()
        }
    }

    /// Total simulated time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Millisecond waits in the order they happened
    pub fn waits(&self) -> &[Wait] {
        &self.waits
    }

    /// Forget recorded waits and elapsed time
    pub fn reset(&mut self) {
        self.elapsed_ns = 0;
        self.waits.clear();
    }
}

impl Default for SimDelay<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += u64::from(ms) * 1_000_000;
        let outputs = self.regs.map(SimRegisters::outputs).unwrap_or_default();
        self.waits.push(Wait {
            duration_ms: ms,
            outputs,
        });
    }
}
