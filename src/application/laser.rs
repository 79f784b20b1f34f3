//! Laser on/off state with the auto-shutoff timer.

use crate::os::elapsed_ms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaserSession {
    active: bool,
    started_at: u32,
    timeout_ms: u32,
}

impl LaserSession {
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            active: false,
            started_at: 0,
            timeout_ms,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tick count at which the current (or last) session began
    #[inline]
    pub fn started_at(&self) -> u32 {
        self.started_at
    }

    /// Flip the laser state, stamping the start time when it turns on.
    /// Returns the new state.
    pub fn toggle(&mut self, now: u32) -> bool {
        self.active = !self.active;
        if self.active {
            self.started_at = now;
        }
        self.active
    }

    /// Active for at least `timeout_ms` ticks
    pub fn expired(&self, now: u32) -> bool {
        self.active && elapsed_ms(now, self.started_at) >= self.timeout_ms
    }

    pub fn shut_off(&mut self) {
        self.active = false;
    }
}
