//! Bounded angular position of one servo axis.

use crate::config::AxisConfig;
use crate::drivers::Direction;

/// Which travel bound a limit-set press overwrote, with its new value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitChange {
    Min(i16),
    Max(i16),
}

/// Position in degrees plus a user-adjustable `[min, max]` travel window.
///
/// `min <= max` is not enforced: a limit press can leave the window
/// inverted, and jogging then follows the plain clamp formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Axis {
    position: i16,
    min: i16,
    max: i16,
    step: i16,
}

impl Axis {
    pub const fn from_config(config: &AxisConfig) -> Self {
        Self {
            position: config.initial_position,
            min: config.min,
            max: config.max,
            step: config.step,
        }
    }

    #[inline]
    pub fn position(&self) -> i16 {
        self.position
    }

    #[inline]
    pub fn min(&self) -> i16 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i16 {
        self.max
    }

    #[inline]
    pub fn step(&self) -> i16 {
        self.step
    }

    /// Integer midpoint of the travel window, truncated toward zero
    #[inline]
    pub fn midpoint(&self) -> i16 {
        (self.min + self.max) / 2
    }

    /// Move one detent. Decrements stop at `min`, increments stop at `max`.
    pub fn jog(&mut self, direction: Direction) -> i16 {
        self.position = match direction {
            Direction::Decrement => self.position.saturating_sub(self.step).max(self.min),
            Direction::Increment => self.position.saturating_add(self.step).min(self.max),
        };
        self.position
    }

    /// Store the current position as whichever bound it is closer to.
    pub fn set_limit(&mut self) -> LimitChange {
        if self.position < self.midpoint() {
            self.min = self.position;
            LimitChange::Min(self.min)
        } else {
            self.max = self.position;
            LimitChange::Max(self.max)
        }
    }
}
