//! Measures the distance with an HC-SR04 every 200 ms, prints it and lights the green, yellow
//! or red led depending on whether the object is far, at a medium distance or near.

use log::error;
use proximity_leds::{Microcontroller, PinAssignment};

fn main() {
    let mut micro = Microcontroller::new();
    let pins = PinAssignment::default();

    match micro.set_pins_for_control_loop(&pins) {
        Ok(mut control_loop) => {
            if let Err(err) = control_loop.run() {
                error!("control loop stopped: {:?}", err);
            }
        }
        Err(err) => error!("could not configure the pins: {:?}", err),
    }

    loop {
        micro.sleep(1000);
    }
}
