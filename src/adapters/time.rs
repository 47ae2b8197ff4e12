//! Monotonic millisecond clock.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Both truncate to `u32` milliseconds, which wraps after ~49.7 days;
//! consumers only ever take `wrapping_sub` differences.

pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot, wrapping.
    #[cfg(target_os = "espidf")]
    pub fn now_ms(&self) -> u32 {
        // SAFETY: esp_timer_get_time is thread-safe and has no preconditions.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1_000) as u32
    }

    /// Milliseconds since construction, wrapping.
    #[cfg(not(target_os = "espidf"))]
    pub fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}
