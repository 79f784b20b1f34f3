//! # Laser Turret Firmware
//!
//! Pan/tilt laser pointer for the ATmega128: two hobby servos, a laser diode,
//! a trigger button and two rotary encoders with push switches.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`config`] | Compile-time constants (PWM, axes, timeout) |
//! | [`os`] | Millisecond tick and blocking delay |
//! | `hal` | ATmega128 register-level GPIO, PWM and UART (AVR builds only) |
//! | [`drivers`] | Edge detection, encoder, laser, servo, console and board wiring |
//! | [`application`] | Input/position controller and startup sequence |
//!
//! Everything outside `hal` is written against `embedded-hal` and `ufmt`, so the
//! controller runs under host `cargo test` as well as on the target.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;
pub mod os;

pub use application::{Axis, AxisId, Controller, LaserSession, LimitChange};
pub use drivers::{Board, Panel, SerialConsole};
pub use os::Clock;
