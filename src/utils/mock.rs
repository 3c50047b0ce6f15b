//! Test doubles for the pins, delays and clock used by the sensor and the indicator

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io,
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, ErrorKind, ErrorType, InputPin, OutputPin},
};
use embedded_hal_async::digital::Wait;

use crate::{
    sensors::{DistanceSensor, HCSR04Error},
    utils::clock::Clock,
};

pub type SharableRef<T> = Rc<RefCell<T>>;

const DEFAULT_POLL_LIMIT: usize = 10_000;

/// Everything the doubles record, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HardwareEvent {
    Level(&'static str, bool),
    DelayNs(u32),
}

pub type HardwareTrace = SharableRef<Vec<HardwareEvent>>;

pub fn new_trace() -> HardwareTrace {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin whose level can be read back through any of its clones
#[derive(Clone)]
pub struct MockPin {
    name: &'static str,
    level: SharableRef<bool>,
    broken: bool,
    trace: Option<HardwareTrace>,
}

impl MockPin {
    pub fn new(name: &'static str) -> Self {
        MockPin { name, level: Rc::new(RefCell::new(false)), broken: false, trace: None }
    }

    pub fn starting_high(name: &'static str) -> Self {
        let pin = Self::new(name);
        *pin.level.borrow_mut() = true;
        pin
    }

    pub fn traced(name: &'static str, trace: &HardwareTrace) -> Self {
        MockPin { trace: Some(trace.clone()), ..Self::new(name) }
    }

    pub fn broken(name: &'static str) -> Self {
        MockPin { broken: true, ..Self::new(name) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_set_high(&self) -> bool {
        *self.level.borrow()
    }

    fn set(&mut self, high: bool) -> Result<(), MockPinError> {
        if self.broken {
            return Err(MockPinError);
        }
        *self.level.borrow_mut() = high;
        if let Some(trace) = &self.trace {
            trace.borrow_mut().push(HardwareEvent::Level(self.name, high));
        }
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

/// Green, yellow and red pins, all starting high so tests can tell they were driven low
pub fn indicator_pins() -> [MockPin; 3] {
    [MockPin::starting_high("green"), MockPin::starting_high("yellow"), MockPin::starting_high("red")]
}

/// Names of the pins that are currently high
pub fn lit(pins: &[MockPin]) -> Vec<&'static str> {
    pins.iter().filter(|p| p.is_set_high()).map(|p| p.name()).collect()
}

/// Echo input that answers every read with the next scripted level. Once the script is over
/// it stays at its resting level, and panics after `poll_limit` reads without a change. That
/// panic is the only way a test gets out of a measurement whose echo never arrives.
pub struct MockEcho {
    levels: VecDeque<bool>,
    resting_level: bool,
    idle_polls: usize,
    poll_limit: usize,
    broken: bool,
}

impl MockEcho {
    pub fn from_levels(levels: Vec<bool>) -> Self {
        MockEcho {
            levels: levels.into(),
            resting_level: false,
            idle_polls: 0,
            poll_limit: DEFAULT_POLL_LIMIT,
            broken: false,
        }
    }

    /// A low, high, low sequence for each of the `amount` measurements
    pub fn with_pulses(amount: usize) -> Self {
        let levels = (0..amount).flat_map(|_| [false, false, true, true, false]).collect();
        Self::from_levels(levels)
    }

    pub fn stuck_at(level: bool) -> Self {
        MockEcho { resting_level: level, ..Self::from_levels(vec![]) }
    }

    pub fn broken() -> Self {
        MockEcho { broken: true, ..Self::from_levels(vec![]) }
    }

    pub fn remaining(&self) -> usize {
        self.levels.len()
    }

    fn next_level(&mut self) -> Result<bool, MockPinError> {
        if self.broken {
            return Err(MockPinError);
        }
        match self.levels.pop_front() {
            Some(level) => {
                self.idle_polls = 0;
                Ok(level)
            }
            None => {
                self.idle_polls += 1;
                if self.idle_polls > self.poll_limit {
                    panic!("echo pin never changed after {} polls", self.poll_limit);
                }
                Ok(self.resting_level)
            }
        }
    }
}

impl ErrorType for MockEcho {
    type Error = MockPinError;
}

impl InputPin for MockEcho {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.next_level()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.next_level().map(|level| !level)
    }
}

impl Wait for MockEcho {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        while !self.next_level()? {}
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        while self.next_level()? {}
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_low().await?;
        self.wait_for_high().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_high().await?;
        self.wait_for_low().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        let first = self.next_level()?;
        while self.next_level()? == first {}
        Ok(())
    }
}

/// Clock that returns the scripted instants first and then keeps advancing by `step`
pub struct MockClock {
    instants: RefCell<VecDeque<i64>>,
    last: Cell<i64>,
    step: i64,
}

impl MockClock {
    pub fn scripted(instants: Vec<i64>) -> Self {
        MockClock { instants: RefCell::new(instants.into()), last: Cell::new(0), step: 1 }
    }

    pub fn ticking(start: i64, step: i64) -> Self {
        MockClock { instants: RefCell::new(VecDeque::new()), last: Cell::new(start - step), step }
    }
}

impl Clock for MockClock {
    fn now_micros(&self) -> i64 {
        let now = match self.instants.borrow_mut().pop_front() {
            Some(instant) => instant,
            None => self.last.get() + self.step,
        };
        self.last.set(now);
        now
    }
}

/// Delay that returns immediately, remembering every requested wait in nanoseconds
#[derive(Clone, Default)]
pub struct MockDelay {
    delays: SharableRef<Vec<u32>>,
    trace: Option<HardwareTrace>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traced(trace: &HardwareTrace) -> Self {
        MockDelay { trace: Some(trace.clone()), ..Self::default() }
    }

    pub fn delays_ns(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays.borrow_mut().push(ns);
        if let Some(trace) = &self.trace {
            trace.borrow_mut().push(HardwareEvent::DelayNs(ns));
        }
    }
}

/// Distance source that hands out a fixed list of measurements
pub struct ScriptedSensor {
    distances: VecDeque<f64>,
}

impl ScriptedSensor {
    pub fn new(distances: &[f64]) -> Self {
        ScriptedSensor { distances: distances.iter().copied().collect() }
    }
}

impl DistanceSensor for ScriptedSensor {
    fn measure(&mut self) -> Result<f64, HCSR04Error> {
        self.distances.pop_front().ok_or(HCSR04Error::EchoTimeout)
    }
}

/// Report sink that rejects every write
pub struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "report sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
