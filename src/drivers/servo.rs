//! Hobby servo actuator.
//!
//! Angles map linearly onto a 1-2ms pulse inside a 20ms (50Hz) frame. Duty
//! values are expressed against a 16-bit full-scale counter and rescaled to
//! whatever resolution the PWM channel actually has.

use super::{AxisId, Board, SerialConsole};
use crate::config::{
    PWM_MAX_DUTY, PWM_MIN_DUTY, PWM_RESOLUTION_BITS, SERVO_MAX_ANGLE, SERVO_MIN_ANGLE,
};
use ufmt::uWrite;

/// Clamp `angle` to the servo range and convert it to a 16-bit duty value.
///
/// Uses truncating integer arithmetic, so 90 degrees lands on 4915.
pub fn angle_to_duty(angle: i16) -> u16 {
    let angle = i32::from(angle.clamp(SERVO_MIN_ANGLE, SERVO_MAX_ANGLE));
    let in_span = i32::from(SERVO_MAX_ANGLE - SERVO_MIN_ANGLE);
    let out_span = i32::from(PWM_MAX_DUTY) - i32::from(PWM_MIN_DUTY);

    let duty = (angle - i32::from(SERVO_MIN_ANGLE)) * out_span / in_span + i32::from(PWM_MIN_DUTY);
    duty as u16
}

/// Rescale a 16-bit full-scale duty onto a channel whose TOP is `max_duty`.
pub fn scale_duty(duty: u16, max_duty: u16) -> u16 {
    let scaled = (u32::from(duty) * (u32::from(max_duty) + 1)) >> PWM_RESOLUTION_BITS;
    scaled.min(u32::from(max_duty)) as u16
}

/// Move one servo to `angle`, logging the duty written.
pub fn move_servo<B, W>(board: &mut B, console: &mut SerialConsole<W>, axis: AxisId, angle: i16) -> u16
where
    B: Board,
    W: uWrite,
{
    let duty = angle_to_duty(angle);
    console.write_value("Setting duty cycle to: ", duty);
    board.write_servo(axis, duty);
    duty
}
