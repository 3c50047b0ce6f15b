use std::mem;
use esp_idf_svc::hal::gpio::*;

const PIN_COUNT: usize = 24;
const DIGITAL_PINS_BOUNDS: (usize, usize) = (0, 23);
// Used by the SPI flash
const RESERVED_PIN: usize = 14;

#[derive(Debug)]
pub enum PeripheralError {
    NotAPin
}

/// Represents an esp32 pin that has not been handed out yet
#[derive(Default)]
pub enum Peripheral {
    Pin(u8),
    #[default]
    None
}

macro_rules! downgrade_gpio {
    ($pin_num:expr, $($num:literal => $gpio:ident),* $(,)?) => {
        match $pin_num {
            $($num => unsafe { $gpio::new() }.downgrade(),)*
            _ => return Err(PeripheralError::NotAPin),
        }
    };
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }

    /// If the Peripheral is a Pin returns the corresponding AnyIoPin.
    /// If not it returns PeripheralError::NotAPin
    pub fn into_any_io_pin(self) -> Result<AnyIOPin, PeripheralError> {
        let Peripheral::Pin(pin_num) = self else {
            return Err(PeripheralError::NotAPin);
        };
        let pin = downgrade_gpio!(pin_num,
            0 => Gpio0, 1 => Gpio1, 2 => Gpio2, 3 => Gpio3, 4 => Gpio4, 5 => Gpio5,
            6 => Gpio6, 7 => Gpio7, 8 => Gpio8, 9 => Gpio9, 10 => Gpio10, 11 => Gpio11,
            12 => Gpio12, 13 => Gpio13, 15 => Gpio15, 16 => Gpio16, 17 => Gpio17,
            18 => Gpio18, 19 => Gpio19, 20 => Gpio20, 21 => Gpio21, 22 => Gpio22, 23 => Gpio23,
        );
        Ok(pin)
    }
}

/// The esp32C6 pins. Subsequent gets of the same pin will return Peripheral::None.
pub struct Peripherals {
    pins: [Peripheral; PIN_COUNT],
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let pins = std::array::from_fn(|pin_num| {
            if pin_num == RESERVED_PIN {
                Peripheral::None
            } else {
                Peripheral::Pin(pin_num as u8)
            }
        });
        Peripherals { pins }
    }

    pub fn get_digital_pin(&mut self, pin_num: usize) -> Peripheral {
        if pin_num >= DIGITAL_PINS_BOUNDS.0 && pin_num <= DIGITAL_PINS_BOUNDS.1 {
            return self.pins[pin_num].take()
        }
        Peripheral::None
    }
}
