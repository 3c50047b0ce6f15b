use std::io::{self, Stdout};

use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use log::info;

use crate::{
    control::ControlLoop,
    gpio::*,
    microcontroller_src::peripherals::Peripherals,
    proximity_error::ProximityError,
    sensors::HCSR04,
    utils::{clock::EspTimerClock, pin_assignment::PinAssignment},
};

pub type EspHCSR04<'a> = HCSR04<DigitalOut<'a>, DigitalIn<'a>, Delay, EspTimerClock>;
pub type EspProximityIndicator<'a> = ProximityIndicator<DigitalOut<'a>>;
pub type EspControlLoop<'a> = ControlLoop<EspHCSR04<'a>, DigitalOut<'a>, FreeRtos, Stdout>;

/// Primary abstraction for interacting with the microcontroller, handing out the pins, clock and
/// delays the proximity control loop needs.
///
/// - `peripherals`: The pins that have not been configured yet.
pub struct Microcontroller {
    peripherals: Peripherals,
}

impl Microcontroller {

    /// Creates a new Microcontroller instance and starts the esp logger
    ///
    /// # Returns
    ///
    /// The new Microcontroller
    pub fn new() -> Self {
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        Microcontroller { peripherals: Peripherals::new() }
    }

    /// Creates a DigitalIn on the ESP pin with number 'pin_num' to read digital inputs.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital input.
    ///
    /// # Returns
    ///
    /// A `Result` with the `DigitalIn`, or a `DigitalInError` if the pin does not exist or was already taken
    pub fn set_pin_as_digital_in<'a>(&mut self, pin_num: usize) -> Result<DigitalIn<'a>, DigitalInError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalIn::new(pin_peripheral)
    }

    /// Creates a DigitalOut on the ESP pin with number 'pin_num' to write digital outputs. The pin starts Low.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital output.
    ///
    /// # Returns
    ///
    /// A `Result` with the `DigitalOut`, or a `DigitalOutError` if the pin does not exist or was already taken
    pub fn set_pin_as_digital_out<'a>(&mut self, pin_num: usize) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalOut::new(pin_peripheral)
    }

    /// Configures the trigger and echo pins of the assignment and creates an HCSR04 with them
    pub fn set_pins_for_hc_sr04<'a>(&mut self, pins: &PinAssignment) -> Result<EspHCSR04<'a>, ProximityError> {
        let trig = self.set_pin_as_digital_out(pins.trigger).map_err(ProximityError::DigitalOutError)?;
        let echo = self.set_pin_as_digital_in(pins.echo).map_err(ProximityError::DigitalInError)?;
        HCSR04::new(trig, echo, Delay::new_default(), EspTimerClock).map_err(ProximityError::HCSR04Error)
    }

    /// Configures the three led pins of the assignment, all of them off
    pub fn set_pins_for_proximity_indicator<'a>(&mut self, pins: &PinAssignment) -> Result<EspProximityIndicator<'a>, ProximityError> {
        let green = self.set_pin_as_digital_out(pins.green).map_err(ProximityError::DigitalOutError)?;
        let yellow = self.set_pin_as_digital_out(pins.yellow).map_err(ProximityError::DigitalOutError)?;
        let red = self.set_pin_as_digital_out(pins.red).map_err(ProximityError::DigitalOutError)?;
        ProximityIndicator::new(green, yellow, red).map_err(ProximityError::IndicatorError)
    }

    /// Validates the pin assignment and builds the control loop with it, reporting to stdout
    ///
    /// # Arguments
    ///
    /// - `pins`: The pins for the sensor and the leds.
    ///
    /// # Returns
    ///
    /// A `Result` with the `EspControlLoop`, or a `ProximityError` if any pin could not be configured
    pub fn set_pins_for_control_loop<'a>(&mut self, pins: &PinAssignment) -> Result<EspControlLoop<'a>, ProximityError> {
        pins.validate().map_err(ProximityError::PinAssignmentError)?;
        let sensor = self.set_pins_for_hc_sr04(pins)?;
        let indicator = self.set_pins_for_proximity_indicator(pins)?;
        info!("trigger on gpio{}, echo on gpio{}, leds on gpio{}/{}/{}", pins.trigger, pins.echo, pins.green, pins.yellow, pins.red);
        Ok(ControlLoop::new(sensor, indicator, FreeRtos, io::stdout()))
    }

    /// Blocks the current task for the received amount of miliseconds, letting others run
    pub fn sleep(&self, miliseconds: u32) {
        FreeRtos::delay_ms(miliseconds)
    }
}

impl Default for Microcontroller {
    fn default() -> Self {
        Self::new()
    }
}
