//! Input/position controller.
//!
//! One cooperative polling loop, no interrupts involved apart from the
//! millisecond tick. Each [`Controller::poll`] samples every input once,
//! edge-detects it against the previous sample and applies, in order:
//!
//! 1. trigger press: toggle the laser
//! 2. encoder detents: jog X then Y (laser on only)
//! 3. encoder switch presses: set an X then Y travel limit (laser on only)
//! 4. auto-shutoff once the laser has been on for [`LASER_TIMEOUT_MS`]
//!
//! The order matters when a press and the timeout land in the same pass.

mod axis;
mod laser;

pub use self::axis::{Axis, LimitChange};
pub use self::laser::LaserSession;
pub use crate::drivers::AxisId;

use crate::config::{
    AxisConfig, LASER_TIMEOUT_MS, SELF_TEST_SETTLE_MS, SELF_TEST_SWEEP, X_AXIS, Y_AXIS,
};
use crate::drivers::{move_servo, Board, Direction, EdgeDetector, SerialConsole};
use crate::os::Clock;
use embedded_hal::blocking::delay::DelayMs;
use ufmt::uWrite;

pub struct Controller {
    laser: LaserSession,
    x: Axis,
    y: Axis,

    // Previous samples, all idle-high at reset
    trigger: EdgeDetector,
    x_turn: EdgeDetector,
    y_turn: EdgeDetector,
    x_switch: EdgeDetector,
    y_switch: EdgeDetector,
}

impl Controller {
    pub const fn new() -> Self {
        Self::with_config(&X_AXIS, &Y_AXIS, LASER_TIMEOUT_MS)
    }

    pub const fn with_config(x: &AxisConfig, y: &AxisConfig, laser_timeout_ms: u32) -> Self {
        Self {
            laser: LaserSession::new(laser_timeout_ms),
            x: Axis::from_config(x),
            y: Axis::from_config(y),
            trigger: EdgeDetector::new(),
            x_turn: EdgeDetector::new(),
            y_turn: EdgeDetector::new(),
            x_switch: EdgeDetector::new(),
            y_switch: EdgeDetector::new(),
        }
    }

    #[inline]
    pub fn laser_active(&self) -> bool {
        self.laser.is_active()
    }

    #[inline]
    pub fn laser(&self) -> &LaserSession {
        &self.laser
    }

    pub fn axis(&self, id: AxisId) -> &Axis {
        match id {
            AxisId::X => &self.x,
            AxisId::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, id: AxisId) -> &mut Axis {
        match id {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
        }
    }

    /// Power-on sequence: laser off, sweep the X servo through the self-test
    /// angles, park both servos at their start positions and report.
    pub fn startup<B, W, D>(&mut self, board: &mut B, console: &mut SerialConsole<W>, delay: &mut D)
    where
        B: Board,
        W: uWrite,
        D: DelayMs<u16>,
    {
        board.set_laser(false);

        for (angle, pulse) in SELF_TEST_SWEEP {
            console.write_str("Testing servo X to ");
            console.write(&angle);
            console.write_str(" deg (");
            console.write_str(pulse);
            console.write_line(" pulse expectation)");
            move_servo(board, console, AxisId::X, angle);
            delay.delay_ms(SELF_TEST_SETTLE_MS);
        }

        move_servo(board, console, AxisId::X, self.x.position());
        move_servo(board, console, AxisId::Y, self.y.position());

        console.write_line("System initialized.");
        console.write_value("Current X: ", self.x.position());
        console.write_value("Current Y: ", self.y.position());
    }

    /// One pass of the polling loop at tick `now`.
    pub fn poll<B, W>(&mut self, board: &mut B, console: &mut SerialConsole<W>, now: u32)
    where
        B: Board,
        W: uWrite,
    {
        if self.trigger.update(board.trigger_high()) {
            if self.laser.toggle(now) {
                console.write_line("Laser activated.");
            } else {
                console.write_line("Laser deactivated.");
            }
        }

        let active = self.laser.is_active();
        if active {
            board.set_laser(true);
        }

        // Edge memories advance every pass; only the actions are gated.
        if self.x_turn.update(board.encoder_a_high(AxisId::X)) && active {
            self.jog(board, console, AxisId::X);
        }
        if self.y_turn.update(board.encoder_a_high(AxisId::Y)) && active {
            self.jog(board, console, AxisId::Y);
        }
        if self.x_switch.update(board.encoder_switch_high(AxisId::X)) && active {
            self.set_limit(console, AxisId::X);
        }
        if self.y_switch.update(board.encoder_switch_high(AxisId::Y)) && active {
            self.set_limit(console, AxisId::Y);
        }

        if !active {
            board.set_laser(false);
        } else if self.laser.expired(now) {
            self.laser.shut_off();
            board.set_laser(false);
            console.write_line("Laser auto-disabled after timeout.");
        }
    }

    /// Poll forever against `clock`.
    pub fn run<B, W, C>(&mut self, board: &mut B, console: &mut SerialConsole<W>, clock: &C) -> !
    where
        B: Board,
        W: uWrite,
        C: Clock,
    {
        loop {
            self.poll(board, console, clock.millis());
        }
    }

    fn jog<B: Board, W: uWrite>(&mut self, board: &mut B, console: &mut SerialConsole<W>, id: AxisId) {
        let direction = Direction::from_b_level(board.encoder_b_high(id));
        let position = self.axis_mut(id).jog(direction);
        move_servo(board, console, id, position);
        console.write_str(id.label());
        console.write_value("-axis moved to: ", position);
    }

    fn set_limit<W: uWrite>(&mut self, console: &mut SerialConsole<W>, id: AxisId) {
        console.write_str(id.label());
        match self.axis_mut(id).set_limit() {
            LimitChange::Min(value) => console.write_value("-axis minimum limit set to: ", value),
            LimitChange::Max(value) => console.write_value("-axis maximum limit set to: ", value),
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Input levels set directly by the test, outputs recorded.
    struct FakeBoard {
        trigger: bool,
        a: [bool; 2],
        b: [bool; 2],
        switch: [bool; 2],
        laser: Option<bool>,
        duties: Vec<(AxisId, u16)>,
    }

    impl FakeBoard {
        fn idle() -> Self {
            Self {
                trigger: true,
                a: [true; 2],
                b: [true; 2],
                switch: [true; 2],
                laser: None,
                duties: Vec::new(),
            }
        }
    }

    fn idx(axis: AxisId) -> usize {
        match axis {
            AxisId::X => 0,
            AxisId::Y => 1,
        }
    }

    impl Board for FakeBoard {
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
            self.laser = Some(on);
        }
        fn write_servo(&mut self, axis: AxisId, duty: u16) {
            self.duties.push((axis, duty));
        }
    }

    #[derive(Default)]
    struct Log(String);

    impl uWrite for Log {
        type Error = Infallible;
        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    struct Rig {
        ctl: Controller,
        board: FakeBoard,
        console: SerialConsole<Log>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                ctl: Controller::new(),
                board: FakeBoard::idle(),
                console: SerialConsole::new(Log::default()),
            }
        }

        fn poll(&mut self, now: u32) {
            self.ctl.poll(&mut self.board, &mut self.console, now);
        }

        fn press_trigger(&mut self, now: u32) {
            self.board.trigger = false;
            self.poll(now);
            self.board.trigger = true;
            self.poll(now);
        }

        fn turn(&mut self, axis: AxisId, direction: Direction, now: u32) {
            self.board.b[idx(axis)] = direction == Direction::Increment;
            self.board.a[idx(axis)] = false;
            self.poll(now);
            self.board.a[idx(axis)] = true;
            self.poll(now);
        }

        fn press_switch(&mut self, axis: AxisId, now: u32) {
            self.board.switch[idx(axis)] = false;
            self.poll(now);
            self.board.switch[idx(axis)] = true;
            self.poll(now);
        }

        fn log(&self) -> &str {
            &self.console.inner().0
        }
    }

    #[test]
    fn initial_state() {
        let ctl = Controller::new();
        assert!(!ctl.laser_active());
        assert_eq!(ctl.axis(AxisId::X).position(), 90);
        assert_eq!(ctl.axis(AxisId::Y).position(), 90);
        assert_eq!((ctl.axis(AxisId::X).min(), ctl.axis(AxisId::X).max()), (0, 90));
        assert_eq!((ctl.axis(AxisId::Y).min(), ctl.axis(AxisId::Y).max()), (0, 90));
    }

    #[test]
    fn trigger_press_pairs_cancel() {
        let mut rig = Rig::new();
        rig.press_trigger(10);
        assert!(rig.ctl.laser_active());
        assert_eq!(rig.ctl.laser().started_at(), 10);
        assert_eq!(rig.board.laser, Some(true));

        rig.press_trigger(20);
        assert!(!rig.ctl.laser_active());
        assert_eq!(rig.board.laser, Some(false));
        assert_eq!(rig.log(), "Laser activated.\r\nLaser deactivated.\r\n");
    }

    #[test]
    fn holding_trigger_toggles_once() {
        let mut rig = Rig::new();
        rig.board.trigger = false;
        for now in 0..50 {
            rig.poll(now);
        }
        assert!(rig.ctl.laser_active());
    }

    #[test]
    fn encoders_inert_while_laser_off() {
        let mut rig = Rig::new();
        for _ in 0..20 {
            rig.turn(AxisId::X, Direction::Decrement, 0);
            rig.turn(AxisId::Y, Direction::Decrement, 0);
            rig.press_switch(AxisId::X, 0);
            rig.press_switch(AxisId::Y, 0);
        }
        assert_eq!(*rig.ctl.axis(AxisId::X), Axis::from_config(&X_AXIS));
        assert_eq!(*rig.ctl.axis(AxisId::Y), Axis::from_config(&Y_AXIS));
        assert!(rig.board.duties.is_empty());
        assert_eq!(rig.log(), "");
    }

    #[test]
    fn held_encoder_line_does_not_fire_when_laser_turns_on() {
        let mut rig = Rig::new();
        rig.board.a[0] = false;
        rig.poll(0);
        rig.press_trigger(1);
        assert!(rig.ctl.laser_active());
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 90);
    }

    #[test]
    fn detent_in_the_activating_pass_moves_axis() {
        let mut rig = Rig::new();
        rig.board.trigger = false;
        rig.board.a[0] = false;
        rig.board.b[0] = false;
        rig.poll(0);

        assert!(rig.ctl.laser_active());
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 89);
        assert_eq!(rig.board.duties, vec![(AxisId::X, 4897)]);
        assert_eq!(
            rig.log(),
            "Laser activated.\r\nSetting duty cycle to: 4897\r\nX-axis moved to: 89\r\n"
        );
    }

    #[test]
    fn jog_logs_duty_then_position() {
        let mut rig = Rig::new();
        rig.press_trigger(0);
        rig.turn(AxisId::X, Direction::Decrement, 1);
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 89);
        assert_eq!(rig.board.duties, vec![(AxisId::X, 4897)]);
        assert!(rig
            .log()
            .ends_with("Setting duty cycle to: 4897\r\nX-axis moved to: 89\r\n"));
    }

    #[test]
    fn y_axis_steps_by_five() {
        let mut rig = Rig::new();
        rig.press_trigger(0);
        rig.turn(AxisId::Y, Direction::Decrement, 1);
        rig.turn(AxisId::Y, Direction::Decrement, 2);
        assert_eq!(rig.ctl.axis(AxisId::Y).position(), 80);
        rig.turn(AxisId::Y, Direction::Increment, 3);
        assert_eq!(rig.ctl.axis(AxisId::Y).position(), 85);
        assert!(rig.log().ends_with("Y-axis moved to: 85\r\n"));
    }

    #[test]
    fn ten_detents_down_then_clamped_at_min() {
        let mut rig = Rig::new();
        rig.press_trigger(0);
        for _ in 0..10 {
            rig.turn(AxisId::X, Direction::Decrement, 1);
        }
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 80);
        for _ in 0..100 {
            rig.turn(AxisId::X, Direction::Decrement, 2);
            let x = rig.ctl.axis(AxisId::X);
            assert!(x.min() <= x.position() && x.position() <= x.max());
        }
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 0);
    }

    #[test]
    fn switch_sets_nearer_limit() {
        let mut rig = Rig::new();
        rig.press_trigger(0);
        for _ in 0..70 {
            rig.turn(AxisId::X, Direction::Decrement, 1);
        }
        assert_eq!(rig.ctl.axis(AxisId::X).position(), 20);
        rig.press_switch(AxisId::X, 2);
        assert_eq!(rig.ctl.axis(AxisId::X).min(), 20);
        assert!(rig.log().ends_with("X-axis minimum limit set to: 20\r\n"));

        rig.press_switch(AxisId::Y, 3);
        assert_eq!(rig.ctl.axis(AxisId::Y).max(), 90);
        assert!(rig.log().ends_with("Y-axis maximum limit set to: 90\r\n"));
    }

    #[test]
    fn auto_shutoff_at_timeout() {
        let mut rig = Rig::new();
        rig.press_trigger(1000);
        rig.poll(1000 + LASER_TIMEOUT_MS - 1);
        assert!(rig.ctl.laser_active());
        assert_eq!(rig.board.laser, Some(true));

        rig.poll(1000 + LASER_TIMEOUT_MS);
        assert!(!rig.ctl.laser_active());
        assert_eq!(rig.board.laser, Some(false));
        assert!(rig.log().ends_with("Laser auto-disabled after timeout.\r\n"));
    }

    #[test]
    fn trigger_wins_over_timeout_in_same_pass() {
        let mut rig = Rig::new();
        rig.press_trigger(0);
        rig.board.trigger = false;
        rig.poll(LASER_TIMEOUT_MS + 5);
        assert!(!rig.ctl.laser_active());
        assert!(rig.log().ends_with("Laser deactivated.\r\n"));
    }

    #[test]
    fn startup_sweeps_and_reports() {
        struct NoDelay(u32);
        impl DelayMs<u16> for NoDelay {
            fn delay_ms(&mut self, ms: u16) {
                self.0 += u32::from(ms);
            }
        }

        let mut rig = Rig::new();
        let mut delay = NoDelay(0);
        rig.ctl.startup(&mut rig.board, &mut rig.console, &mut delay);

        assert_eq!(rig.board.laser, Some(false));
        assert_eq!(delay.0, 3 * u32::from(SELF_TEST_SETTLE_MS));
        assert_eq!(
            rig.board.duties,
            vec![
                (AxisId::X, 3277),
                (AxisId::X, 4915),
                (AxisId::X, 6554),
                (AxisId::X, 4915),
                (AxisId::Y, 4915),
            ]
        );
        assert!(rig
            .log()
            .starts_with("Testing servo X to 0 deg (1ms pulse expectation)\r\n"));
        assert!(rig
            .log()
            .ends_with("System initialized.\r\nCurrent X: 90\r\nCurrent Y: 90\r\n"));
    }
}
