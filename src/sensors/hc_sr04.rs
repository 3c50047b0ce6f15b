use core::hint::spin_loop;
use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}};
use embedded_hal_async::digital::Wait;
use futures::executor::block_on;
use log::warn;

use super::DistanceSensor;
use crate::utils::clock::Clock;

/// Microseconds the echo stays high for each centimeter between the sensor and the object
pub const ECHO_US_PER_CM: f64 = 58.0;
const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum HCSR04Error {
    CannotSetTrigger,
    CannotReadEcho,
    EchoTimeout,
}

/// Simple abstraction of the HCSR04 that facilitates its handling
///
/// - `trig`: Output that starts the sonic burst.
/// - `echo`: Input that stays high as long as the burst takes to come back.
/// - `delay`: Busy delay used for the trigger pulse.
/// - `clock`: Monotonic microsecond clock used to time the echo.
/// - `echo_timeout_us`: If set, [DistanceSensor::measure] gives up waiting for the echo after this many microseconds.
pub struct HCSR04<T, E, D, C> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
    echo_timeout_us: Option<i64>,
}

/// Converts the amount of microseconds the echo was high into centimeters
pub fn echo_time_to_cm(echo_us: i64) -> f64 {
    echo_us as f64 / ECHO_US_PER_CM
}

impl <T: OutputPin, E, D: DelayNs, C: Clock> HCSR04<T, E, D, C> {

    /// Creates a new HCSR04, leaving the trigger pin Low
    ///
    /// # Arguments
    ///
    /// - `trig`: The pin connected to the sensor trigger, already set as an output.
    /// - `echo`: The pin connected to the sensor echo, already set as an input.
    /// - `delay`: A delay with microsecond resolution.
    /// - `clock`: The clock used to time the echo pulse.
    ///
    /// # Returns
    ///
    /// A `Result` with the new HCSR04, or `HCSR04Error::CannotSetTrigger` if the trigger could not be driven low
    pub fn new(mut trig: T, echo: E, delay: D, clock: C) -> Result<Self, HCSR04Error> {
        trig.set_low().map_err(|_| HCSR04Error::CannotSetTrigger)?;
        Ok(HCSR04 { trig, echo, delay, clock, echo_timeout_us: None })
    }

    /// Makes [DistanceSensor::measure] use [HCSR04::get_distance_with_timeout] with the received timeout
    pub fn with_echo_timeout(mut self, timeout_us: i64) -> Self {
        self.echo_timeout_us = Some(timeout_us);
        self
    }

    fn send_trigger_pulse(&mut self) -> Result<(), HCSR04Error> {
        // First set the trigger to Low for a few micro-seconds to get a clean signal
        // Then set the trigger pin high for 10 micro-seconds to send the sonic burst
        self.trig.set_low().map_err(|_| HCSR04Error::CannotSetTrigger)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trig.set_high().map_err(|_| HCSR04Error::CannotSetTrigger)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().map_err(|_| HCSR04Error::CannotSetTrigger)
    }

    fn distance_between(&self, send_echo_time: i64, rec_echo_time: i64) -> f64 {
        echo_time_to_cm(self.clock.elapsed_micros(send_echo_time, rec_echo_time))
    }
}

impl <T: OutputPin, E: InputPin, D: DelayNs, C: Clock> HCSR04<T, E, D, C> {

    /// Returns the distance of the object in front of the sensor in centimeters.
    ///
    /// The echo is waited for by polling, without any timeout. If the echo never changes its level
    /// this function never returns.
    ///
    /// # Returns
    ///
    /// A `Result` with a f64 representing the distance of the object in front in centimeters
    pub fn get_distance(&mut self) -> Result<f64, HCSR04Error> {
        self.send_trigger_pulse()?;

        while self.echo.is_low().map_err(|_| HCSR04Error::CannotReadEcho)? {
            spin_loop();
        }
        let send_echo_time = self.clock.now_micros();

        while self.echo.is_high().map_err(|_| HCSR04Error::CannotReadEcho)? {
            spin_loop();
        }
        let rec_echo_time = self.clock.now_micros();

        Ok(self.distance_between(send_echo_time, rec_echo_time))
    }

    /// Same as [HCSR04::get_distance], but each of the two waits on the echo gives up after
    /// `timeout_us` microseconds.
    ///
    /// # Returns
    ///
    /// A `Result` with the distance in centimeters, or `HCSR04Error::EchoTimeout` if the echo did not
    /// rise or fall in time
    pub fn get_distance_with_timeout(&mut self, timeout_us: i64) -> Result<f64, HCSR04Error> {
        self.send_trigger_pulse()?;
        let send_echo_time = self.wait_for_echo_level(true, timeout_us)?;
        let rec_echo_time = self.wait_for_echo_level(false, timeout_us)?;
        Ok(self.distance_between(send_echo_time, rec_echo_time))
    }

    /// Polls the echo until it reads `high`, returning the instant it did
    fn wait_for_echo_level(&mut self, high: bool, timeout_us: i64) -> Result<i64, HCSR04Error> {
        let wait_start = self.clock.now_micros();
        loop {
            let level = self.echo.is_high().map_err(|_| HCSR04Error::CannotReadEcho)?;
            let now = self.clock.now_micros();
            if level == high {
                return Ok(now);
            }
            if self.clock.elapsed_micros(wait_start, now) >= timeout_us {
                warn!("echo did not go {} within {} us", if high { "high" } else { "low" }, timeout_us);
                return Err(HCSR04Error::EchoTimeout);
            }
            spin_loop();
        }
    }
}

impl <T: OutputPin, E: Wait, D: DelayNs, C: Clock> HCSR04<T, E, D, C> {

    /// Returns the distance of the object in front of the sensor in centimeters, waiting for the
    /// echo through interrupts instead of polling, so the CPU is released meanwhile
    ///
    /// # Returns
    ///
    /// A `Result` with a f64 representing the distance of the object in front in centimeters
    pub async fn get_distance_async(&mut self) -> Result<f64, HCSR04Error> {
        self.send_trigger_pulse()?;

        self.echo.wait_for_high().await.map_err(|_| HCSR04Error::CannotReadEcho)?;
        let send_echo_time = self.clock.now_micros();

        self.echo.wait_for_low().await.map_err(|_| HCSR04Error::CannotReadEcho)?;
        let rec_echo_time = self.clock.now_micros();

        Ok(self.distance_between(send_echo_time, rec_echo_time))
    }

    /// Blocks on [HCSR04::get_distance_async]
    pub fn get_distance_interrupt(&mut self) -> Result<f64, HCSR04Error> {
        block_on(self.get_distance_async())
    }
}

impl <T: OutputPin, E: InputPin, D: DelayNs, C: Clock> DistanceSensor for HCSR04<T, E, D, C> {
    fn measure(&mut self) -> Result<f64, HCSR04Error> {
        match self.echo_timeout_us {
            Some(timeout_us) => self.get_distance_with_timeout(timeout_us),
            None => self.get_distance(),
        }
    }
}
