use super::HCSR04Error;

/// Anything able to tell how far the object in front of it is
pub trait DistanceSensor {
    /// Performs one measurement and returns the distance in centimeters
    fn measure(&mut self) -> Result<f64, HCSR04Error>;
}
