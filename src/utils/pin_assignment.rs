const DEFAULT_TRIGGER_PIN: usize = 2;
const DEFAULT_ECHO_PIN: usize = 3;
const DEFAULT_GREEN_LED_PIN: usize = 10;
const DEFAULT_YELLOW_LED_PIN: usize = 11;
const DEFAULT_RED_LED_PIN: usize = 12;

#[derive(Debug, PartialEq, Eq)]
pub enum PinAssignmentError {
    RepeatedPin(usize),
}

/// Pin numbers used by the sensor and the indicator. It is built once at startup and
/// only lent to whoever configures the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub trigger: usize,
    pub echo: usize,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl Default for PinAssignment {
    fn default() -> Self {
        PinAssignment {
            trigger: DEFAULT_TRIGGER_PIN,
            echo: DEFAULT_ECHO_PIN,
            green: DEFAULT_GREEN_LED_PIN,
            yellow: DEFAULT_YELLOW_LED_PIN,
            red: DEFAULT_RED_LED_PIN,
        }
    }
}

impl PinAssignment {
    /// Every pin in the order they get configured: trigger, echo, green, yellow, red
    pub fn pins(&self) -> [usize; 5] {
        [self.trigger, self.echo, self.green, self.yellow, self.red]
    }

    /// Verifies that no pin number is used twice.
    ///
    /// # Returns
    ///
    /// A `Result` with Ok if every pin is different, or `PinAssignmentError::RepeatedPin`
    /// with the first pin number found twice.
    pub fn validate(&self) -> Result<(), PinAssignmentError> {
        let pins = self.pins();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(PinAssignmentError::RepeatedPin(*pin));
            }
        }
        Ok(())
    }
}
