//! Mechanical quadrature encoder with an integrated push switch.
//!
//! Only falling edges of channel A are counted (one count per detent); the
//! level of channel B at that moment gives the direction.

/// Rotation direction of one detent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Decrement,
    Increment,
}

impl Direction {
    /// B low while A falls means counter-clockwise
    #[inline]
    pub fn from_b_level(b_high: bool) -> Self {
        if b_high {
            Direction::Increment
        } else {
            Direction::Decrement
        }
    }
}

/// The three inputs of one encoder
pub struct EncoderPins<I> {
    pub a: I,
    pub b: I,
    pub switch: I,
}

impl<I> EncoderPins<I> {
    pub fn new(a: I, b: I, switch: I) -> Self {
        Self { a, b, switch }
    }
}
