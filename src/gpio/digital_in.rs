use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};
use embedded_hal_async::digital::Wait;
use esp_idf_svc::{hal::gpio::{AnyIOPin, Input, Level, PinDriver, Pull}, sys::{EspError, ESP_ERR_INVALID_STATE}};

use crate::microcontroller_src::peripherals::Peripheral;

#[derive(Debug)]
pub enum DigitalInError {
    CannotSetPullForPin,
    CannotSetPinAsInput,
    StateAlreadySet,
    InvalidPin,
    InvalidPeripheral,
}

impl digital::Error for DigitalInError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

fn map_interrupt_errors(err: EspError) -> DigitalInError {
    if err.code() == ESP_ERR_INVALID_STATE as i32 {
        DigitalInError::StateAlreadySet
    } else {
        DigitalInError::InvalidPin
    }
}

/// Driver for receiving digital inputs from a particular Pin
pub struct DigitalIn<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Input>,
}

impl <'a>DigitalIn<'a> {
    /// Create a new DigitalIn for a Pin, pull is set to Down so a floating echo reads Low
    pub fn new(per: Peripheral) -> Result<DigitalIn<'a>, DigitalInError> {
        let gpio = per.into_any_io_pin().map_err(|_| DigitalInError::InvalidPeripheral)?;
        let pin_driver = PinDriver::input(gpio).map_err(|_| DigitalInError::CannotSetPinAsInput)?;

        let mut digital_in = DigitalIn { pin_driver };
        digital_in.set_pull(Pull::Down)?;
        Ok(digital_in)
    }

    /// Set the pin Pull either to Pull Up or Down
    pub fn set_pull(&mut self, pull_type: Pull) -> Result<(), DigitalInError> {
        self.pin_driver.set_pull(pull_type).map_err(|_| DigitalInError::CannotSetPullForPin)
    }

    /// Gets the current pin level
    pub fn get_level(&self) -> Level {
        self.pin_driver.get_level()
    }
}

impl ErrorType for DigitalIn<'_> {
    type Error = DigitalInError;
}

impl InputPin for DigitalIn<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get_level() == Level::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get_level() == Level::Low)
    }
}

/// Each wait arms the pin interrupt and releases the CPU until it triggers
impl Wait for DigitalIn<'_> {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.pin_driver.wait_for_high().await.map_err(map_interrupt_errors)
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.pin_driver.wait_for_low().await.map_err(map_interrupt_errors)
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.pin_driver.wait_for_rising_edge().await.map_err(map_interrupt_errors)
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.pin_driver.wait_for_falling_edge().await.map_err(map_interrupt_errors)
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.pin_driver.wait_for_any_edge().await.map_err(map_interrupt_errors)
    }
}
