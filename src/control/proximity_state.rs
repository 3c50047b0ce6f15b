/// Distances below this are Near
pub const NEAR_THRESHOLD_CM: f64 = 10.0;
/// Distances from this one on are Far
pub const FAR_THRESHOLD_CM: f64 = 30.0;

/// Proximity band of the object in front of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProximityState {
    #[default]
    Far,
    Medium,
    Near,
}

/// Color of the led that shows each ProximityState
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Green,
    Yellow,
    Red,
}

impl ProximityState {
    /// Classifies a distance in centimeters. Only the distance is taken into account, the
    /// previous state does not matter. A NaN distance is classified as Far.
    pub fn from_distance(distance_cm: f64) -> Self {
        if distance_cm < NEAR_THRESHOLD_CM {
            ProximityState::Near
        } else if distance_cm < FAR_THRESHOLD_CM {
            ProximityState::Medium
        } else {
            ProximityState::Far
        }
    }

    pub fn color(self) -> IndicatorColor {
        match self {
            ProximityState::Far => IndicatorColor::Green,
            ProximityState::Medium => IndicatorColor::Yellow,
            ProximityState::Near => IndicatorColor::Red,
        }
    }
}

/// Shorthand for [ProximityState::from_distance]
pub fn classify(distance_cm: f64) -> ProximityState {
    ProximityState::from_distance(distance_cm)
}
