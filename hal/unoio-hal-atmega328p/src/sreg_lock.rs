//! Single-core critical section
//!
//! Saves the global interrupt flag, disables interrupts and restores the
//! saved flag on release. Nested sections restore correctly because only
//! the outermost one saw interrupts enabled.

use crate::registers::{read, write, SREG, SREG_I};

struct SregCriticalSection;

critical_section::set_impl!(SregCriticalSection);

// SAFETY: the ATmega328P has a single core, masking interrupts is enough
// for exclusive access.
unsafe impl critical_section::Impl for SregCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        let sreg = read(SREG);
        write(SREG, sreg & !(1 << SREG_I));
        sreg & (1 << SREG_I) != 0
    }

    unsafe fn release(was_enabled: critical_section::RawRestoreState) {
        if was_enabled {
            write(SREG, read(SREG) | (1 << SREG_I));
        }
    }
}
