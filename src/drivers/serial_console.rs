//! Line-oriented diagnostic output.
//!
//! Purely informational: nothing reads these lines back, so write errors on
//! the underlying sink are dropped.

use ufmt::{uDisplay, uWrite};

pub struct SerialConsole<W: uWrite> {
    out: W,
}

impl<W: uWrite> SerialConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_str(&mut self, s: &str) {
        self.out.write_str(s).ok();
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn write<V: uDisplay + ?Sized>(&mut self, value: &V) {
        ufmt::uwrite!(&mut self.out, "{}", value).ok();
    }

    /// `label` immediately followed by `value`, e.g. `X-axis moved to: 42`
    pub fn write_value<V: uDisplay>(&mut self, label: &str, value: V) {
        ufmt::uwrite!(&mut self.out, "{}{}\r\n", label, value).ok();
    }

    pub fn inner(&self) -> &W {
        &self.out
    }

    pub fn free(self) -> W {
        self.out
    }
}
