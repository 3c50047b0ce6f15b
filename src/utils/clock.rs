/// Monotonic microsecond time source used to time the echo pulse
pub trait Clock {
    /// Returns the current instant in microseconds
    fn now_micros(&self) -> i64;

    /// Signed amount of microseconds elapsed between two instants taken from this clock
    fn elapsed_micros(&self, start: i64, end: i64) -> i64 {
        end - start
    }
}

/// Clock backed by the esp_timer, counting microseconds since boot
#[cfg(feature = "esp32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EspTimerClock;

#[cfg(feature = "esp32")]
impl Clock for EspTimerClock {
    fn now_micros(&self) -> i64 {
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }
}
