//! Servo PWM on Timer1.
//!
//! Timer1 runs in fast PWM mode 14 (ICR1 as TOP) with a /8 prescaler, so one
//! count is 0.5us and a 50Hz frame is 40000 counts. OC1A and OC1B drive the
//! pan and tilt servos.

use crate::config::{CPU_FREQ_HZ, PWM_FREQUENCY_HZ};
use avr_device::atmega128a::TC1;
use embedded_hal::PwmPin;

const PRESCALER: u32 = 8;
const CS11: u8 = 1 << 1;
const WGM11: u8 = 1 << 1;
const WGM12: u8 = 1 << 3;
const WGM13: u8 = 1 << 4;
const COM1A1: u8 = 1 << 7;
const COM1B1: u8 = 1 << 5;

/// 16MHz / (50Hz * 8) - 1 = 39999
pub const SERVO_TOP: u16 = (CPU_FREQ_HZ / (PWM_FREQUENCY_HZ as u32 * PRESCALER) - 1) as u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PwmChannel {
    Timer1A,
    Timer1B,
}

/// Timer1 configured for servo frames
pub struct ServoTimer {
    _tc1: TC1,
}

impl ServoTimer {
    pub fn new(tc1: TC1) -> Self {
        unsafe {
            tc1.tccr1a.write(|w| w.bits(WGM11));
            tc1.icr1.write(|w| w.bits(SERVO_TOP));
            tc1.ocr1a.write(|w| w.bits(0));
            tc1.ocr1b.write(|w| w.bits(0));
            tc1.tccr1b.write(|w| w.bits(WGM13 | WGM12 | CS11));
        }
        Self { _tc1: tc1 }
    }

    /// Hand out the two compare channels
    pub fn split(self) -> (Channel, Channel) {
        (
            Channel {
                channel: PwmChannel::Timer1A,
            },
            Channel {
                channel: PwmChannel::Timer1B,
            },
        )
    }
}

/// One output compare unit of Timer1
pub struct Channel {
    channel: PwmChannel,
}

impl Channel {
    fn regs(&self) -> &avr_device::atmega128a::tc1::RegisterBlock {
        unsafe { &*TC1::ptr() }
    }

    fn com_bit(&self) -> u8 {
        match self.channel {
            PwmChannel::Timer1A => COM1A1,
            PwmChannel::Timer1B => COM1B1,
        }
    }
}

impl PwmPin for Channel {
    type Duty = u16;

    fn disable(&mut self) {
        let bit = self.com_bit();
        avr_device::interrupt::free(|_| unsafe {
            self.regs().tccr1a.modify(|r, w| w.bits(r.bits() & !bit));
        });
    }

    fn enable(&mut self) {
        let bit = self.com_bit();
        avr_device::interrupt::free(|_| unsafe {
            self.regs().tccr1a.modify(|r, w| w.bits(r.bits() | bit));
        });
    }

    fn get_duty(&self) -> u16 {
        match self.channel {
            PwmChannel::Timer1A => self.regs().ocr1a.read().bits(),
            PwmChannel::Timer1B => self.regs().ocr1b.read().bits(),
        }
    }

    fn get_max_duty(&self) -> u16 {
        SERVO_TOP
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(SERVO_TOP);
        // 16-bit register writes must not be split by an interrupt
        avr_device::interrupt::free(|_| unsafe {
            match self.channel {
                PwmChannel::Timer1A => self.regs().ocr1a.write(|w| w.bits(duty)),
                PwmChannel::Timer1B => self.regs().ocr1b.write(|w| w.bits(duty)),
            }
        });
    }
}
