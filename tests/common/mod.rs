#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::PwmPin;
use laser_turret_firmware::drivers::{AxisId, Board};

/// Console sink that keeps everything written to it
#[derive(Default)]
pub struct Capture(pub String);

impl ufmt::uWrite for Capture {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.push_str(s);
        Ok(())
    }
}

/// PWM channel recording every duty written; clones share the record.
#[derive(Clone)]
pub struct FakePwm {
    max: u16,
    enabled: Rc<RefCell<bool>>,
    pub duties: Rc<RefCell<Vec<u16>>>,
}

impl FakePwm {
    pub fn with_max(max: u16) -> Self {
        Self {
            max,
            enabled: Rc::new(RefCell::new(false)),
            duties: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.borrow()
    }

    pub fn written(&self) -> Vec<u16> {
        self.duties.borrow().clone()
    }
}

impl PwmPin for FakePwm {
    type Duty = u16;

    fn disable(&mut self) {
        *self.enabled.borrow_mut() = false;
    }

    fn enable(&mut self) {
        *self.enabled.borrow_mut() = true;
    }

    fn get_duty(&self) -> u16 {
        self.duties.borrow().last().copied().unwrap_or(0)
    }

    fn get_max_duty(&self) -> u16 {
        self.max
    }

    fn set_duty(&mut self, duty: u16) {
        self.duties.borrow_mut().push(duty);
    }
}

/// Board whose input levels are set field by field
pub struct ScriptedBoard {
    pub trigger: bool,
    pub a: [bool; 2],
    pub b: [bool; 2],
    pub switch: [bool; 2],
    pub laser: bool,
    pub servo: [Option<u16>; 2],
}

impl ScriptedBoard {
    pub fn idle() -> Self {
        Self {
            trigger: true,
            a: [true; 2],
            b: [true; 2],
            switch: [true; 2],
            laser: false,
            servo: [None; 2],
        }
    }
}

pub fn idx(axis: AxisId) -> usize {
    match axis {
        AxisId::X => 0,
        AxisId::Y => 1,
    }
}

impl Board for ScriptedBoard {
    fn trigger_high(&mut self) -> bool {
        self.trigger
    }

    fn encoder_a_high(&mut self, axis: AxisId) -> bool {
        self.a[idx(axis)]
    }

    fn encoder_b_high(&mut self, axis: AxisId) -> bool {
        self.b[idx(axis)]
    }

    fn encoder_switch_high(&mut self, axis: AxisId) -> bool {
        self.switch[idx(axis)]
    }

    fn set_laser(&mut self, on: bool) {
        self.laser = on;
    }

    fn write_servo(&mut self, axis: AxisId, duty: u16) {
        self.servo[idx(axis)] = Some(duty);
    }
}
