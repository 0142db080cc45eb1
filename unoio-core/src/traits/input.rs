//! Digital input capability

use alloc::boxed::Box;

/// Capability set of a digital input with pin-change interrupt control
///
/// Pin-change interrupts fire on both edges. Telling a press from a
/// release is up to the handler, typically by comparing the current level
/// with the previous one.
///
/// Implementations must keep [`is_interrupt_enabled`](Self::is_interrupt_enabled)
/// equal to the state of the pin's mask bit after every call.
pub trait DigitalInput {
    /// Raw, undebounced level of the input
    ///
    /// Unbound inputs always read `false`.
    fn is_pressed(&self) -> bool;

    /// Unmask the pin-change interrupt of this input
    ///
    /// Also switches interrupts on globally.
    fn enable_interrupt(&mut self);

    /// Mask the pin-change interrupt of this input
    ///
    /// Leaves the global interrupt switch alone.
    fn disable_interrupt(&mut self);

    /// Whether the pin-change interrupt is unmasked
    fn is_interrupt_enabled(&self) -> bool;

    /// Flip the interrupt mask of this input
    fn toggle_interrupt(&mut self) {
        if self.is_interrupt_enabled() {
            self.disable_interrupt();
        } else {
            self.enable_interrupt();
        }
    }

    /// Mask the interrupt, release the hardware bit and fall back to the
    /// unbound state
    fn clear(&mut self);
}

impl<T: DigitalInput + ?Sized> DigitalInput for &mut T {
    fn is_pressed(&self) -> bool {
        (**self).is_pressed()
    }

    fn enable_interrupt(&mut self) {
        (**self).enable_interrupt();
    }

    fn disable_interrupt(&mut self) {
        (**self).disable_interrupt();
    }

    fn is_interrupt_enabled(&self) -> bool {
        (**self).is_interrupt_enabled()
    }

    fn toggle_interrupt(&mut self) {
        (**self).toggle_interrupt();
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

impl<T: DigitalInput + ?Sized> DigitalInput for Box<T> {
    fn is_pressed(&self) -> bool {
        (**self).is_pressed()
    }

    fn enable_interrupt(&mut self) {
        (**self).enable_interrupt();
    }

    fn disable_interrupt(&mut self) {
        (**self).disable_interrupt();
    }

    fn is_interrupt_enabled(&self) -> bool {
        (**self).is_interrupt_enabled()
    }

    fn toggle_interrupt(&mut self) {
        (**self).toggle_interrupt();
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
