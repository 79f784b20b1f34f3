//! Binds the turret's pins to the [`Board`] interface.

use super::servo::scale_duty;
use super::{AxisId, Board, EncoderPins, LaserDiode};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::PwmPin;

/// Trigger button, two encoders, laser output and two servo channels.
pub struct Panel<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: PwmPin<Duty = u16>,
{
    trigger: I,
    x_encoder: EncoderPins<I>,
    y_encoder: EncoderPins<I>,
    laser: LaserDiode<O>,
    x_servo: P,
    y_servo: P,
}

impl<I, O, P> Panel<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: PwmPin<Duty = u16>,
{
    /// Takes ownership of the pins and enables both servo channels.
    pub fn new(
        trigger: I,
        x_encoder: EncoderPins<I>,
        y_encoder: EncoderPins<I>,
        laser: LaserDiode<O>,
        mut x_servo: P,
        mut y_servo: P,
    ) -> Self {
        x_servo.enable();
        y_servo.enable();
        Self {
            trigger,
            x_encoder,
            y_encoder,
            laser,
            x_servo,
            y_servo,
        }
    }

    pub fn laser_on(&self) -> bool {
        self.laser.is_on()
    }

    fn encoder(&self, axis: AxisId) -> &EncoderPins<I> {
        match axis {
            AxisId::X => &self.x_encoder,
            AxisId::Y => &self.y_encoder,
        }
    }
}

// A failed read looks like an idle (high) input
#[inline]
fn level<I: InputPin>(pin: &I) -> bool {
    pin.is_high().unwrap_or(true)
}

impl<I, O, P> Board for Panel<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: PwmPin<Duty = u16>,
{
    fn trigger_high(&mut self) -> bool {
        level(&self.trigger)
    }

    fn encoder_a_high(&mut self, axis: AxisId) -> bool {
        level(&self.encoder(axis).a)
    }

    fn encoder_b_high(&mut self, axis: AxisId) -> bool {
        level(&self.encoder(axis).b)
    }

    fn encoder_switch_high(&mut self, axis: AxisId) -> bool {
        level(&self.encoder(axis).switch)
    }

    fn set_laser(&mut self, on: bool) {
        self.laser.set(on);
    }

    fn write_servo(&mut self, axis: AxisId, duty: u16) {
        let servo = match axis {
            AxisId::X => &mut self.x_servo,
            AxisId::Y => &mut self.y_servo,
        };
        let max = servo.get_max_duty();
        servo.set_duty(scale_duty(duty, max));
    }
}
