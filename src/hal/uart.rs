//! Interrupt-driven USART0 transmitter for the diagnostic console.

use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use avr_device::atmega128a::USART0;
use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;
use core::convert::Infallible;

// Buffer size must be power of 2 for efficient masking
const BUFFER_SIZE: usize = 64;
const BUFFER_MASK: usize = BUFFER_SIZE - 1;

// Double speed mode: 16MHz / (8 * 115200) - 1 = 16 (2.1% error)
const UBRR: u16 = (CPU_FREQ_HZ / (8 * UART_BAUD) - 1) as u16;

const U2X0: u8 = 1 << 1;
const TXEN0: u8 = 1 << 3;
const UDRIE0: u8 = 1 << 5;
const UCSZ_8BIT: u8 = (1 << 2) | (1 << 1);

pub struct Buffer {
    data: [u8; BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl Buffer {
    const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    fn write(&mut self, byte: u8) -> bool {
        let next_write = (self.write_idx + 1) & BUFFER_MASK;
        if next_write != self.read_idx {
            self.data[self.write_idx] = byte;
            self.write_idx = next_write;
            true
        } else {
            false
        }
    }

    fn read(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & BUFFER_MASK;
            Some(byte)
        } else {
            None
        }
    }
}

static TX_BUFFER: Mutex<RefCell<Buffer>> = Mutex::new(RefCell::new(Buffer::new()));

pub struct Uart {
    usart: USART0,
}

impl Uart {
    /// 8N1 transmit only at [`UART_BAUD`]
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0h.write(|w| w.bits((UBRR >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(UBRR as u8));
            usart.ucsr0a.write(|w| w.bits(U2X0));
            usart.ucsr0c.write(|w| w.bits(UCSZ_8BIT));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    /// Queue one byte, `WouldBlock` while the ring is full
    pub fn try_write_byte(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        let queued = interrupt::free(|cs| TX_BUFFER.borrow(cs).borrow_mut().write(byte));
        // Either way the drain interrupt has to be running
        unsafe {
            self.usart.ucsr0b.modify(|r, w| w.bits(r.bits() | UDRIE0));
        }
        if queued {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        nb::block!(self.try_write_byte(byte)).ok();
    }
}

impl ufmt::uWrite for Uart {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}

#[avr_device::interrupt(atmega128a)]
fn USART0_UDRE() {
    interrupt::free(|cs| {
        let usart = unsafe { &*USART0::ptr() };
        if let Some(byte) = TX_BUFFER.borrow(cs).borrow_mut().read() {
            unsafe {
                usart.udr0.write(|w| w.bits(byte));
            }
        } else {
            // Buffer empty - disable TX interrupt
            unsafe {
                usart.ucsr0b.modify(|r, w| w.bits(r.bits() & !UDRIE0));
            }
        }
    });
}
