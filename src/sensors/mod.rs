mod distance_sensor;
mod hc_sr04;

pub use {
    distance_sensor::*,
    hc_sr04::*,
};
