//! Growable LED array with choreography
//!
//! [`LedArray`] owns an ordered sequence of outputs and drives them as a
//! group: all on, all off, a collective flash, or a chase running forward
//! or backward through the array.
//!
//! # Memory
//!
//! Growth is fallible. Storage is reserved before anything is committed,
//! so a failed `push`, `resize` or `new` leaves the array exactly as it
//! was and reports [`ArrayError`]. On a 2 KB part the heap runs out long
//! before `Vec` would abort, so an optional element limit lets the
//! application cap the array below what the heap can hold.
//!
//! # Ownership
//!
//! The array owns the device values, not the hardware behind them.
//! Removing or dropping a device does not clear its pin; call
//! [`LedArray::clear_content`] first when the pins must be released.

use alloc::vec::Vec;
use core::slice;

use embedded_hal::delay::DelayNs;

use crate::traits::DigitalOutput;

/// Errors reported when the array cannot grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArrayError {
    /// The allocator could not provide the storage
    OutOfMemory,
    /// The configured element limit would be exceeded
    LimitReached,
}

/// A rejected [`LedArray::push`], handing the device back to the caller
#[derive(Debug)]
pub struct PushError<D> {
    /// The device that was not added
    pub device: D,
    /// Why it was not added
    pub error: ArrayError,
}

impl<D> PushError<D> {
    /// Take back the device that could not be pushed
    pub fn into_device(self) -> D {
        self.device
    }
}

/// Ordered, growable collection of digital outputs
#[derive(Debug)]
pub struct LedArray<D> {
    leds: Vec<D>,
    /// Maximum number of elements, if capped
    limit: Option<usize>,
}

impl<D> Default for LedArray<D> {
    fn default() -> Self {
        Self {
            leds: Vec::new(),
            limit: None,
        }
    }
}

impl<D: DigitalOutput> LedArray<D> {
    /// Create an empty array with storage for `initial_size` devices
    pub fn new(initial_size: usize) -> Result<Self, ArrayError> {
        let mut array = Self::default();
        array.reserve_total(initial_size)?;
        Ok(array)
    }

    /// Create an empty array that never grows beyond `limit` devices
    pub fn with_limit(initial_size: usize, limit: usize) -> Result<Self, ArrayError> {
        let mut array = Self {
            leds: Vec::new(),
            limit: Some(limit),
        };
        array.reserve_total(initial_size)?;
        Ok(array)
    }

    /// Number of devices in the array
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    /// Check if the array holds no devices
    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// Number of devices the current storage can hold
    pub fn capacity(&self) -> usize {
        self.leds.capacity()
    }

    /// Element limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Device at `index`
    pub fn get(&self, index: usize) -> Option<&D> {
        self.leds.get(index)
    }

    /// Mutable device at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut D> {
        self.leds.get_mut(index)
    }

    /// Iterate over the devices in index order
    pub fn iter(&self) -> slice::Iter<'_, D> {
        self.leds.iter()
    }

    /// Iterate mutably over the devices in index order
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, D> {
        self.leds.iter_mut()
    }

    /// Number of devices currently on
    pub fn num_on(&self) -> usize {
        self.leds.iter().filter(|led| led.is_on()).count()
    }

    /// Make sure storage for `total` devices exists
    ///
    /// Nothing is modified unless the reservation succeeds.
    fn reserve_total(&mut self, total: usize) -> Result<(), ArrayError> {
        if self.limit.is_some_and(|limit| total > limit) {
            return Err(ArrayError::LimitReached);
        }
        let additional = total.saturating_sub(self.leds.len());
        self.leds
            .try_reserve_exact(additional)
            .map_err(|_| ArrayError::OutOfMemory)
    }

    /// Append a device at the end
    ///
    /// On failure the array is unchanged and the device comes back inside
    /// the error.
    pub fn push(&mut self, led: D) -> Result<(), PushError<D>> {
        if let Err(error) = self.reserve_total(self.leds.len() + 1) {
            #[cfg(feature = "defmt")]
            defmt::warn!("LED array push failed at len {}: {}", self.leds.len(), error);
            return Err(PushError { device: led, error });
        }
        self.leds.push(led);
        Ok(())
    }

    /// Remove and return the last device
    ///
    /// Storage shrinks to the remaining length; removing the last device
    /// releases it entirely. If the smaller storage cannot be allocated the
    /// array is left untouched and [`ArrayError::OutOfMemory`] is returned.
    pub fn pop(&mut self) -> Result<Option<D>, ArrayError> {
        let Some(new_len) = self.leds.len().checked_sub(1) else {
            return Ok(None);
        };
        let mut storage = Self::exact_storage(new_len)?;
        let led = self.leds.pop();
        storage.extend(self.leds.drain(..));
        self.leds = storage;
        Ok(led)
    }

    /// Change the number of devices to `new_len`
    ///
    /// Growing fills the new slots with devices produced by `fill`, in
    /// index order. Shrinking drops the devices past `new_len` without
    /// clearing their pins and moves the rest into storage of exactly
    /// `new_len` slots. On failure nothing changes and `fill` is never
    /// called.
    pub fn resize<F>(&mut self, new_len: usize, fill: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> D,
    {
        if new_len < self.leds.len() || new_len == 0 {
            let mut storage = Self::exact_storage(new_len)?;
            self.leds.truncate(new_len);
            storage.extend(self.leds.drain(..));
            self.leds = storage;
            return Ok(());
        }
        if let Err(error) = self.reserve_total(new_len) {
            #[cfg(feature = "defmt")]
            defmt::warn!("LED array resize to {} failed: {}", new_len, error);
            return Err(error);
        }
        self.leds.resize_with(new_len, fill);
        Ok(())
    }

    /// Fresh storage with room for exactly `len` devices
    ///
    /// `Vec::shrink_to` aborts when the allocator refuses; this reports
    /// the failure instead.
    fn exact_storage(len: usize) -> Result<Vec<D>, ArrayError> {
        let mut storage = Vec::new();
        if storage.try_reserve_exact(len).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("LED array shrink to {} failed", len);
            return Err(ArrayError::OutOfMemory);
        }
        Ok(storage)
    }

    /// Clear every device's hardware
    ///
    /// The devices stay in the array; only their pins are released.
    pub fn clear_content(&mut self) {
        for led in self.leds.iter_mut() {
            led.clear();
        }
    }

    /// Free the array and its storage
    ///
    /// The devices are dropped as they are; call
    /// [`clear_content`](Self::clear_content) beforehand to release their
    /// pins.
    pub fn delete(self) {}

    /// Turn every device on, in index order
    pub fn on_all(&mut self) {
        for led in self.leds.iter_mut() {
            led.on();
        }
    }

    /// Turn every device off, in index order
    pub fn off_all(&mut self) {
        for led in self.leds.iter_mut() {
            led.off();
        }
    }

    /// Chase from the first device to the last
    ///
    /// Each device is lit for `duration_ms` and switched off before the
    /// next one comes on.
    pub fn blink_forward(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        for led in self.leds.iter_mut() {
            flash(led, delay, duration_ms);
        }
    }

    /// Chase from the last device to the first
    pub fn blink_backward(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        for led in self.leds.iter_mut().rev() {
            flash(led, delay, duration_ms);
        }
    }

    /// Flash all devices together once
    ///
    /// On for `duration_ms`, then off for `duration_ms`.
    pub fn blink_collectively(&mut self, delay: &mut dyn DelayNs, duration_ms: u32) {
        self.on_all();
        delay.delay_ms(duration_ms);
        self.off_all();
        delay.delay_ms(duration_ms);
    }
}

fn flash<D: DigitalOutput>(led: &mut D, delay: &mut dyn DelayNs, duration_ms: u32) {
    led.on();
    delay.delay_ms(duration_ms);
    led.off();
}

impl<'a, D> IntoIterator for &'a LedArray<D> {
    type Item = &'a D;
    type IntoIter = slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter()
    }
}

impl<'a, D> IntoIterator for &'a mut LedArray<D> {
    type Item = &'a mut D;
    type IntoIter = slice::IterMut<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter_mut()
    }
}
