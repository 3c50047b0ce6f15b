mod utils;
#[cfg(feature = "esp32")]
mod microcontroller_src;

pub mod control;
pub mod gpio;
pub mod sensors;

#[cfg(feature = "esp32")]
pub use microcontroller_src::Microcontroller;
#[cfg(feature = "esp32")]
pub use microcontroller_src::microcontroller::{EspControlLoop, EspHCSR04, EspProximityIndicator};
pub use utils::clock;
pub use utils::pin_assignment::{PinAssignment, PinAssignmentError};
pub use utils::proximity_error;
