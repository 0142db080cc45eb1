//! Digital output capability

use alloc::boxed::Box;

use embedded_hal::delay::DelayNs;

/// Capability set of a digital output (LED, relay, buzzer, ...)
///
/// Implementations keep a logical on/off state next to the hardware bit.
/// `toggle` dispatches on that stored state, never on a read-back of the
/// pin. An output that is not bound to hardware accepts every call and
/// only updates its logical state.
pub trait DigitalOutput {
    /// Drive the output high
    fn on(&mut self);

    /// Drive the output low
    fn off(&mut self);

    /// Logical state as last set through this interface
    fn is_on(&self) -> bool;

    /// Switch to the opposite state
    fn toggle(&mut self) {
        if self.is_on() {
            self.off();
        } else {
            self.on();
        }
    }

    /// Toggle once, then block for `duration_ms`
    ///
    /// One call is one half-period. Call it in a loop for continuous
    /// blinking.
    fn blink(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        self.toggle();
        delay.delay_ms(duration_ms);
    }

    /// Release the hardware bit and fall back to the unbound state
    ///
    /// Further calls are accepted but have no hardware effect.
    fn clear(&mut self);
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    fn on(&mut self) {
        (**self).on();
    }

    fn off(&mut self) {
        (**self).off();
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }

    fn toggle(&mut self) {
        (**self).toggle();
    }

    fn blink(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        (**self).blink(delay, duration_ms);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for Box<T> {
    fn on(&mut self) {
        (**self).on();
    }

    fn off(&mut self) {
        (**self).off();
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }

    fn toggle(&mut self) {
        (**self).toggle();
    }

    fn blink(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        (**self).blink(delay, duration_ms);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
