use avr_device::atmega128a::{PORTA, PORTB, PORTC, PORTD, PORTE, PORTF};
use avr_device::interrupt;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
}

/// A single port bit. Port and bit are kept at runtime so every input on the
/// board shares one type.
#[derive(Debug)]
pub struct Pin<MODE> {
    port: Port,
    bit: u8,
    _mode: PhantomData<MODE>,
}

// Expands `$body` once per port with `$pin`, `$ddr` and `$out` bound to that
// port's PINx, DDRx and PORTx registers.
macro_rules! with_port {
    ($port:expr, |$pin:ident, $ddr:ident, $out:ident| $body:expr) => {
        match $port {
            Port::A => {
                let r = unsafe { &*PORTA::ptr() };
                let ($pin, $ddr, $out) = (&r.pina, &r.ddra, &r.porta);
                $body
            }
            Port::B => {
                let r = unsafe { &*PORTB::ptr() };
                let ($pin, $ddr, $out) = (&r.pinb, &r.ddrb, &r.portb);
                $body
            }
            Port::C => {
                let r = unsafe { &*PORTC::ptr() };
                let ($pin, $ddr, $out) = (&r.pinc, &r.ddrc, &r.portc);
                $body
            }
            Port::D => {
                let r = unsafe { &*PORTD::ptr() };
                let ($pin, $ddr, $out) = (&r.pind, &r.ddrd, &r.portd);
                $body
            }
            Port::E => {
                let r = unsafe { &*PORTE::ptr() };
                let ($pin, $ddr, $out) = (&r.pine, &r.ddre, &r.porte);
                $body
            }
            Port::F => {
                let r = unsafe { &*PORTF::ptr() };
                let ($pin, $ddr, $out) = (&r.pinf, &r.ddrf, &r.portf);
                $body
            }
        }
    };
}

impl<MODE: PinMode> Pin<MODE> {
    #[inline]
    fn mask(&self) -> u8 {
        1 << self.bit
    }

    /// Clear the DDR bit and enable the internal pull-up
    pub fn into_pull_up_input(self) -> Pin<Input> {
        let mask = self.mask();
        interrupt::free(|_| {
            with_port!(self.port, |_pin, ddr, out| unsafe {
                ddr.modify(|r, w| w.bits(r.bits() & !mask));
                out.modify(|r, w| w.bits(r.bits() | mask));
            })
        });
        Pin {
            port: self.port,
            bit: self.bit,
            _mode: PhantomData,
        }
    }

    /// Set the DDR bit, starting from `high`
    pub fn into_output(self, high: bool) -> Pin<Output> {
        let mask = self.mask();
        interrupt::free(|_| {
            with_port!(self.port, |_pin, ddr, out| unsafe {
                if high {
                    out.modify(|r, w| w.bits(r.bits() | mask));
                } else {
                    out.modify(|r, w| w.bits(r.bits() & !mask));
                }
                ddr.modify(|r, w| w.bits(r.bits() | mask));
            })
        });
        Pin {
            port: self.port,
            bit: self.bit,
            _mode: PhantomData,
        }
    }
}

impl Pin<Input> {
    #[inline]
    pub fn is_high(&self) -> bool {
        let mask = self.mask();
        with_port!(self.port, |pin, _ddr, _out| pin.read().bits() & mask != 0)
    }
}

impl Pin<Output> {
    #[inline]
    pub fn set_high(&mut self) {
        let mask = self.mask();
        interrupt::free(|_| {
            with_port!(self.port, |_pin, _ddr, out| unsafe {
                out.modify(|r, w| w.bits(r.bits() | mask));
            })
        });
    }

    #[inline]
    pub fn set_low(&mut self) {
        let mask = self.mask();
        interrupt::free(|_| {
            with_port!(self.port, |_pin, _ddr, out| unsafe {
                out.modify(|r, w| w.bits(r.bits() & !mask));
            })
        });
    }
}

impl InputPin for Pin<Input> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(Pin::is_high(self))
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!Pin::is_high(self))
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        Pin::set_high(self);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        Pin::set_low(self);
        Ok(())
    }
}

/// Unconfigured pin, as it comes out of reset
pub struct Floating;
impl PinMode for Floating {}

const fn pin(port: Port, bit: u8) -> Pin<Floating> {
    Pin {
        port,
        bit,
        _mode: PhantomData,
    }
}

// Turret board pin definitions
pub mod board {
    use super::*;
    use crate::drivers::EncoderPins;

    /// Every pin the turret uses, configured for its role
    pub struct Pins {
        /// Laser driver, active low
        pub laser: Pin<Output>,
        pub trigger: Pin<Input>,
        pub x_encoder: EncoderPins<Pin<Input>>,
        pub y_encoder: EncoderPins<Pin<Input>>,
        /// OC1A, pan servo
        pub servo_x: Pin<Output>,
        /// OC1B, tilt servo
        pub servo_y: Pin<Output>,
    }

    impl Pins {
        /// Consumes the port peripherals so nothing else can reconfigure them.
        pub fn new(_porta: PORTA, _portb: PORTB, _portd: PORTD) -> Self {
            Self {
                // High first: the laser must never flash on during reset
                laser: pin(Port::A, 0).into_output(true),
                trigger: pin(Port::D, 0).into_pull_up_input(),
                x_encoder: EncoderPins::new(
                    pin(Port::D, 1).into_pull_up_input(),
                    pin(Port::D, 2).into_pull_up_input(),
                    pin(Port::D, 3).into_pull_up_input(),
                ),
                y_encoder: EncoderPins::new(
                    pin(Port::D, 4).into_pull_up_input(),
                    pin(Port::D, 5).into_pull_up_input(),
                    pin(Port::D, 6).into_pull_up_input(),
                ),
                servo_x: pin(Port::B, 5).into_output(false),
                servo_y: pin(Port::B, 6).into_output(false),
            }
        }
    }
}
