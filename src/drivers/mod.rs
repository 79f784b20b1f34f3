pub mod button_handler;
pub mod encoder;
pub mod laser;
pub mod panel;
pub mod serial_console;
pub mod servo;

pub use button_handler::{falling_edge, EdgeDetector};
pub use encoder::{Direction, EncoderPins};
pub use laser::LaserDiode;
pub use panel::Panel;
pub use serial_console::SerialConsole;
pub use servo::{angle_to_duty, move_servo};

/// Which servo/encoder pair an operation refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisId {
    /// Pan
    X,
    /// Tilt
    Y,
}

impl AxisId {
    pub fn label(self) -> &'static str {
        match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
        }
    }
}

/// Everything the controller needs from the hardware.
///
/// Input levels are raw logic levels: `true` is high, which is the idle state
/// for every pull-up biased input on the panel.
pub trait Board {
    fn trigger_high(&mut self) -> bool;
    fn encoder_a_high(&mut self, axis: AxisId) -> bool;
    fn encoder_b_high(&mut self, axis: AxisId) -> bool;
    fn encoder_switch_high(&mut self, axis: AxisId) -> bool;

    /// Drive the laser logically on or off
    fn set_laser(&mut self, on: bool);

    /// Write a 16-bit full-scale duty value to the axis' servo channel
    fn write_servo(&mut self, axis: AxisId, duty: u16);
}
