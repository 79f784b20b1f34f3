//! System time tracking for the polling loop

use embedded_hal::blocking::delay::DelayMs;

/// Monotonic millisecond counter. Wraps after ~49 days.
pub trait Clock {
    fn millis(&self) -> u32;
}

/// Milliseconds elapsed between `since` and `now`, using unsigned wrapping arithmetic.
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Busy-wait delay built on top of a [`Clock`]
pub struct Delay<'a, C: Clock> {
    clock: &'a C,
}

impl<'a, C: Clock> Delay<'a, C> {
    pub fn new(clock: &'a C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> DelayMs<u16> for Delay<'_, C> {
    fn delay_ms(&mut self, ms: u16) {
        let start = self.clock.millis();
        while elapsed_ms(self.clock.millis(), start) < u32::from(ms) {}
    }
}
