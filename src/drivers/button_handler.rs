//! Falling-edge detection for pull-up biased inputs.
//!
//! Every input on the panel idles high and is pulled low when its switch
//! closes, so "pressed" is a high-to-low transition between two samples.

/// Pure edge function over two consecutive samples (`true` = high).
///
/// Returns whether a falling edge occurred and the value to remember for the
/// next sample.
#[inline]
pub fn falling_edge(previous_high: bool, current_high: bool) -> (bool, bool) {
    (previous_high && !current_high, current_high)
}

/// Remembers the previous sample of one input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDetector {
    last_high: bool,
}

impl EdgeDetector {
    /// Starts from the idle-high level, so an input already held low at
    /// power-up reports an edge on the first sample.
    pub const fn new() -> Self {
        Self { last_high: true }
    }

    /// Feed a fresh sample, returns `true` on a high-to-low transition
    pub fn update(&mut self, current_high: bool) -> bool {
        let (triggered, last) = falling_edge(self.last_high, current_high);
        self.last_high = last;
        triggered
    }

    #[inline]
    pub fn last_high(&self) -> bool {
        self.last_high
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
