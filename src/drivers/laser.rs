//! Laser diode output. The driver stage sinks current, so a low pin is beam on.

use embedded_hal::digital::v2::OutputPin;

/// Laser output remembering its last commanded state.
pub struct LaserDiode<PIN: OutputPin> {
    pin: PIN,
    is_on: bool,
}

impl<PIN: OutputPin> LaserDiode<PIN> {
    /// Take the pin and switch the laser OFF.
    pub fn active_low(mut pin: PIN) -> Self {
        pin.set_high().ok();
        Self { pin, is_on: false }
    }

    /// Drive the laser logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        if on {
            self.pin.set_low().ok();
        } else {
            self.pin.set_high().ok();
        }
        self.is_on = on;
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }
}
