pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use gpio::board;
pub use gpio::{Input, Output, Pin};
pub use pwm::{Channel, ServoTimer};
pub use timer::SysTick;
pub use uart::Uart;
