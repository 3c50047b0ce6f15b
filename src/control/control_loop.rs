use std::{convert::Infallible, io::Write};

use embedded_hal::{delay::DelayNs, digital::OutputPin};
use log::{debug, info};

use super::ProximityState;
use crate::{
    gpio::ProximityIndicator,
    proximity_error::ProximityError,
    sensors::DistanceSensor,
};

/// Time waited at the end of every iteration
pub const LOOP_PERIOD_MS: u32 = 200;

/// Measures, classifies, reports and shows the proximity of the object in front of the sensor.
///
/// - `sensor`: Source of the distance measurements.
/// - `indicator`: Leds showing the current state.
/// - `delay`: Used to wait [LOOP_PERIOD_MS] between iterations.
/// - `report`: Receives one `Distancia: <cm> cm` line per iteration.
/// - `state`: Last computed state, Far until the first measurement.
pub struct ControlLoop<S, P, D, W> {
    sensor: S,
    indicator: ProximityIndicator<P>,
    delay: D,
    report: W,
    state: ProximityState,
}

impl <S: DistanceSensor, P: OutputPin, D: DelayNs, W: Write> ControlLoop<S, P, D, W> {
    pub fn new(sensor: S, indicator: ProximityIndicator<P>, delay: D, report: W) -> Self {
        ControlLoop { sensor, indicator, delay, report, state: ProximityState::default() }
    }

    pub fn state(&self) -> ProximityState {
        self.state
    }

    pub fn report(&self) -> &W {
        &self.report
    }

    /// Runs one iteration: measure, classify, report, update the leds and wait.
    ///
    /// # Returns
    ///
    /// A `Result` with the new state, or a `ProximityError` if any of the steps failed
    pub fn step(&mut self) -> Result<ProximityState, ProximityError> {
        let distance = self.sensor.measure().map_err(ProximityError::HCSR04Error)?;

        let previous = self.state;
        self.state = ProximityState::from_distance(distance);
        debug!("measured {:.1} cm, state {:?}", distance, self.state);
        if previous != self.state {
            info!("proximity changed from {:?} to {:?}", previous, self.state);
        }

        writeln!(self.report, "Distancia: {:.1} cm", distance).map_err(|_| ProximityError::ReportError)?;
        self.indicator.set_state(self.state).map_err(ProximityError::IndicatorError)?;
        self.delay.delay_ms(LOOP_PERIOD_MS);
        Ok(self.state)
    }

    /// Repeats [ControlLoop::step] forever. It only returns if an iteration fails
    pub fn run(&mut self) -> Result<Infallible, ProximityError> {
        loop {
            self.step()?;
        }
    }
}
