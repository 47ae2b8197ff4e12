//! Alarm siren: red LED plus piezo buzzer.
//!
//! [`SirenPattern`] is the pure part: given the classifier state and the
//! clock it says what the LED and buzzer should be doing.  [`SirenDriver`]
//! pushes that to the pins, writing only when the output changes so the
//! loop can call it every iteration without hammering the LEDC registers.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: LED on a GPIO, buzzer on LEDC channel 0 (50 % duty square wave).
//! On host/test: tracks state in-memory only.

use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::fsm::SystemState;
use crate::scheduler::{SirenPhase, siren_phase};

/// What the alarm outputs should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SirenOutput {
    pub led_on: bool,
    /// Buzzer frequency; `None` is silence.
    pub tone_hz: Option<u32>,
}

impl SirenOutput {
    pub const SILENT: Self = Self {
        led_on: false,
        tone_hz: None,
    };
}

/// Two-tone siren, alternating every `period_ms` while alarmed.
#[derive(Debug, Clone, Copy)]
pub struct SirenPattern {
    period_ms: u32,
    high_hz: u32,
    low_hz: u32,
}

impl SirenPattern {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            period_ms: config.siren_period_ms,
            high_hz: config.siren_high_hz,
            low_hz: config.siren_low_hz,
        }
    }

    pub fn output(&self, state: SystemState, now_ms: u32) -> SirenOutput {
        match state {
            SystemState::Alarm => match siren_phase(now_ms, self.period_ms) {
                SirenPhase::High => SirenOutput {
                    led_on: true,
                    tone_hz: Some(self.high_hz),
                },
                SirenPhase::Low => SirenOutput {
                    led_on: false,
                    tone_hz: Some(self.low_hz),
                },
            },
            SystemState::Monitoring | SystemState::Judging => SirenOutput::SILENT,
        }
    }
}

/// Pin-level siren driver.
pub struct SirenDriver {
    led_gpio: i32,
    current: SirenOutput,
    writes: u32,
}

impl SirenDriver {
    pub fn new(led_gpio: i32) -> Self {
        Self {
            led_gpio,
            current: SirenOutput::SILENT,
            writes: 0,
        }
    }

    pub fn apply(&mut self, output: SirenOutput) {
        if output == self.current {
            return;
        }
        if output.led_on != self.current.led_on {
            hw_init::gpio_write(self.led_gpio, output.led_on);
        }
        if output.tone_hz != self.current.tone_hz {
            hw_init::buzzer_tone(output.tone_hz);
        }
        self.current = output;
        self.writes = self.writes.wrapping_add(1);
    }

    pub fn current(&self) -> SirenOutput {
        self.current
    }

    /// Number of output changes pushed to hardware.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}
