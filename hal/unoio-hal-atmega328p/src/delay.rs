//! Busy-wait delay
//!
//! Burns CPU cycles in a loop. There is no timer behind it, so the
//! precision depends on the clock setting and on interrupts stealing
//! cycles while it spins.

use embedded_hal::delay::DelayNs;

/// Default CPU clock of the Arduino Uno
pub const DEFAULT_CPU_HZ: u32 = 16_000_000;

/// Approximate cycle cost of one spin iteration on the AVR
///
/// One iteration of [`spin`] spills and reloads a `u16` through
/// `black_box` (2 x `std` + 2 x `ldd`, 8 cycles), decrements it with
/// `sbiw` (2 cycles) and branches back with `brne` (2 cycles).
const CYCLES_PER_ITERATION: u64 = 12;

/// Blocking delay calibrated for a CPU clock
#[derive(Debug, Clone, Copy)]
pub struct BusyDelay {
    cpu_hz: u32,
}

impl Default for BusyDelay {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_HZ)
    }
}

impl BusyDelay {
    /// Create a delay for a CPU running at `cpu_hz`
    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz }
    }

    /// Spin iterations needed to wait `ns` nanoseconds
    pub const fn iterations(&self, ns: u32) -> u64 {
        let cycles = ns as u64 * self.cpu_hz as u64 / 1_000_000_000;
        cycles / CYCLES_PER_ITERATION
    }
}

impl DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut remaining = self.iterations(ns);
        while remaining > 0 {
            let chunk = remaining.min(u64::from(u16::MAX)) as u16;
            spin(chunk);
            remaining -= u64::from(chunk);
        }
    }
}

/// Spin for `iterations` rounds of a 16-bit down-counter
#[inline(never)]
fn spin(iterations: u16) {
    let mut n = iterations;
    while n > 0 {
        // Keeps the loop from being optimized away
        n = core::hint::black_box(n) - 1;
    }
}
