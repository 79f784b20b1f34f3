//! Configuration constants for the laser turret firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 115_200;

/// Servo frame rate
pub const PWM_FREQUENCY_HZ: u16 = 50;

/// Duty values are expressed against a full-scale 16-bit counter
pub const PWM_RESOLUTION_BITS: u8 = 16;

/// ~1ms pulse with 16-bit resolution at 50Hz
pub const PWM_MIN_DUTY: u16 = 3277;

/// ~2ms pulse with 16-bit resolution at 50Hz
pub const PWM_MAX_DUTY: u16 = 6554;

pub const SERVO_MIN_ANGLE: i16 = 0;
pub const SERVO_MAX_ANGLE: i16 = 180;

/// Laser is switched off automatically after 5 minutes of continuous use
pub const LASER_TIMEOUT_MS: u32 = 300_000;

/// Angles visited by the X servo during the power-on self-test, with the
/// pulse width an observer should see on a scope
pub const SELF_TEST_SWEEP: [(i16, &str); 3] = [(0, "1ms"), (90, "1.5ms"), (180, "2ms")];

/// Settle time between self-test steps in milliseconds
pub const SELF_TEST_SETTLE_MS: u16 = 2000;

/// Per-axis jog and travel configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisConfig {
    /// Degrees moved per encoder detent
    pub step: i16,
    pub initial_position: i16,
    pub min: i16,
    pub max: i16,
}

/// Pan axis: fine 1 degree steps
pub const X_AXIS: AxisConfig = AxisConfig {
    step: 1,
    initial_position: 90,
    min: 0,
    max: 90,
};

/// Tilt axis: coarse 5 degree steps
pub const Y_AXIS: AxisConfig = AxisConfig {
    step: 5,
    initial_position: 90,
    min: 0,
    max: 90,
};
