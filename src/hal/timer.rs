//! Timer0 millisecond tick

use crate::config::CPU_FREQ_HZ;
use crate::os::Clock;
use avr_device::atmega128a::TC0;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;

// Timer0 clock select values (CS02:0). Timer0 on the ATmega128 has its own
// prescaler table, different from Timer1/3.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div32 = 3,
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div1024 = 7,
}

const WGM01_CTC: u8 = 1 << 3;
const OCIE0: u8 = 1 << 1;

// 16MHz / 64 = 250kHz, 250 counts = 1ms
const TICK_PRESCALER: u32 = 64;
const COMPARE_TOP: u8 = (CPU_FREQ_HZ / TICK_PRESCALER / 1000 - 1) as u8;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Timer0 in CTC mode raising TIMER0_COMP once per millisecond
pub struct SysTick {
    _tc0: TC0,
}

impl SysTick {
    /// Start the tick. Interrupts still need to be enabled globally.
    pub fn start(tc0: TC0) -> Self {
        unsafe {
            tc0.tccr0.write(|w| w.bits(WGM01_CTC | Prescaler::Div64 as u8));
            tc0.tcnt0.write(|w| w.bits(0));
            tc0.ocr0.write(|w| w.bits(COMPARE_TOP));
            tc0.timsk.modify(|r, w| w.bits(r.bits() | OCIE0));
        }
        interrupt::free(|cs| MILLIS.borrow(cs).set(0));
        Self { _tc0: tc0 }
    }
}

impl Clock for SysTick {
    #[inline]
    fn millis(&self) -> u32 {
        interrupt::free(|cs| MILLIS.borrow(cs).get())
    }
}

#[avr_device::interrupt(atmega128a)]
fn TIMER0_COMP() {
    interrupt::free(|cs| {
        let counter = MILLIS.borrow(cs);
        counter.set(counter.get().wrapping_add(1));
    });
}
