use embedded_hal::digital::OutputPin;

use crate::control::{IndicatorColor, ProximityState};

#[derive(Debug, PartialEq, Eq)]
pub enum IndicatorError {
    CannotSetLed(IndicatorColor),
}

/// Three leds of which exactly one is on after every [ProximityIndicator::set_state]
pub struct ProximityIndicator<P> {
    green: P,
    yellow: P,
    red: P,
}

impl <P: OutputPin> ProximityIndicator<P> {

    /// Creates a new ProximityIndicator with every led turned off
    ///
    /// # Arguments
    ///
    /// - `green`: Led lit when the object is Far.
    /// - `yellow`: Led lit when the object is at a Medium distance.
    /// - `red`: Led lit when the object is Near.
    ///
    /// # Returns
    ///
    /// A `Result` with the new ProximityIndicator, or an `IndicatorError` if a led could not be turned off
    pub fn new(green: P, yellow: P, red: P) -> Result<Self, IndicatorError> {
        let mut indicator = ProximityIndicator { green, yellow, red };
        indicator.turn_off_all()?;
        Ok(indicator)
    }

    /// Turns every led off, then turns on the one of the received state
    pub fn set_state(&mut self, state: ProximityState) -> Result<(), IndicatorError> {
        self.turn_off_all()?;
        self.set_led(state.color(), true)
    }

    /// Turns every led off
    pub fn turn_off_all(&mut self) -> Result<(), IndicatorError> {
        self.set_led(IndicatorColor::Green, false)?;
        self.set_led(IndicatorColor::Yellow, false)?;
        self.set_led(IndicatorColor::Red, false)
    }

    fn set_led(&mut self, color: IndicatorColor, on: bool) -> Result<(), IndicatorError> {
        let led = match color {
            IndicatorColor::Green => &mut self.green,
            IndicatorColor::Yellow => &mut self.yellow,
            IndicatorColor::Red => &mut self.red,
        };
        let res = if on { led.set_high() } else { led.set_low() };
        res.map_err(|_| IndicatorError::CannotSetLed(color))
    }
}
