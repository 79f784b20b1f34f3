#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_device::atmega128a::Peripherals;
    use laser_turret_firmware::drivers::{LaserDiode, Panel, SerialConsole};
    use laser_turret_firmware::hal::{board::Pins, ServoTimer, SysTick, Uart};
    use laser_turret_firmware::os::Delay;
    use laser_turret_firmware::Controller;
    use panic_halt as _;

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();

        // Laser pin is driven inactive before anything else runs
        let pins = Pins::new(dp.PORTA, dp.PORTB, dp.PORTD);
        let (servo_x, servo_y) = ServoTimer::new(dp.TC1).split();
        let clock = SysTick::start(dp.TC0);
        let mut console = SerialConsole::new(Uart::new(dp.USART0));

        // Enable interrupts globally: tick and UART drain
        unsafe { avr_device::interrupt::enable() };

        let mut panel = Panel::new(
            pins.trigger,
            pins.x_encoder,
            pins.y_encoder,
            LaserDiode::active_low(pins.laser),
            servo_x,
            servo_y,
        );

        let mut controller = Controller::new();
        controller.startup(&mut panel, &mut console, &mut Delay::new(&clock));
        controller.run(&mut panel, &mut console, &clock)
    }
}

// Host builds (unit and integration tests) only need the library
#[cfg(not(target_arch = "avr"))]
fn main() {}
