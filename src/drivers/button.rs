//! Alarm-cancel button: hold measurement and active-low pin reader.
//!
//! ## Hardware
//!
//! Active-low momentary switch with the internal pull-up enabled.  The main
//! loop polls the pin every iteration; there is no ISR.
//!
//! ## Hold measurement
//!
//! | Input edge          | Effect                         | Returned hold      |
//! |--------------------|--------------------------------|--------------------|
//! | released → pressed | record `press_start_ms`        | 0                  |
//! | pressed → pressed  | -                              | `now - start`      |
//! | pressed → released | forget start                   | 0                  |
//!
//! The debouncer knows nothing about alarms: whether a long hold cancels
//! anything is decided by the classifier.

use embedded_hal::digital::InputPin;

/// Continuous-hold tracker.  Stack-only, wraparound-safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonDebouncer {
    pressed: bool,
    press_start_ms: u32,
}

impl ButtonDebouncer {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            press_start_ms: 0,
        }
    }

    /// Feed the raw pressed level; returns how long it has been held.
    pub fn update(&mut self, pressed_now: bool, now_ms: u32) -> u32 {
        match (self.pressed, pressed_now) {
            (false, true) => {
                self.pressed = true;
                self.press_start_ms = now_ms;
                0
            }
            (true, true) => now_ms.wrapping_sub(self.press_start_ms),
            (_, false) => {
                self.reset();
                0
            }
        }
    }

    /// Forget any hold in progress.  A button still down at the next
    /// `update` is treated as a fresh press.
    pub fn reset(&mut self) {
        self.pressed = false;
        self.press_start_ms = 0;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Active-low push button on any `embedded-hal` input pin.
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// `true` while the switch pulls the line low.  A read error reads as
    /// released so a faulty pin can never hold an alarm cancel.
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
