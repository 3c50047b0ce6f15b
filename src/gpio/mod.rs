#[cfg(feature = "esp32")]
mod digital_in;
#[cfg(feature = "esp32")]
mod digital_out;
mod proximity_indicator;

#[cfg(feature = "esp32")]
pub use {
    digital_in::*,
    digital_out::*,
};
pub use proximity_indicator::*;
