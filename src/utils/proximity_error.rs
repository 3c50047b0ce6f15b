use crate::{
    gpio::IndicatorError,
    sensors::HCSR04Error,
    utils::pin_assignment::PinAssignmentError,
};

#[cfg(feature = "esp32")]
use crate::gpio::{DigitalInError, DigitalOutError};

#[derive(Debug)]
pub enum ProximityError {
    HCSR04Error(HCSR04Error),
    IndicatorError(IndicatorError),
    PinAssignmentError(PinAssignmentError),
    ReportError,
    #[cfg(feature = "esp32")]
    DigitalInError(DigitalInError),
    #[cfg(feature = "esp32")]
    DigitalOutError(DigitalOutError),
}
