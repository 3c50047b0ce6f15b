pub mod microcontroller;
pub mod peripherals;
pub use self::microcontroller::Microcontroller;
