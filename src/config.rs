//! System configuration parameters
//!
//! All tunable parameters for the FallGuard wearable.  Defaults are the
//! compile-time values; any subset can be overridden at build time by
//! setting `FALLGUARD_CONFIG_JSON` to a JSON object, e.g.
//! `{"impact_threshold_g": 2.5, "long_press_ms": 3000}`.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fsm::window::WINDOW_SLOTS;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Classification ---
    /// Acceleration magnitude (g) above which a sample counts as an impact
    pub impact_threshold_g: f32,
    /// Acceleration magnitude (g) above which a sample counts as motion
    pub stability_threshold_g: f32,
    /// Observation window after an impact (milliseconds)
    pub judge_window_ms: u32,
    /// Seconds with motion needed to dismiss an impact as a false alarm
    pub required_active_seconds: u8,

    // --- Cancellation ---
    /// Continuous hold needed to cancel an alarm (milliseconds)
    pub long_press_ms: u32,

    // --- Siren ---
    /// Half-period of the alarm siren (milliseconds per tone phase)
    pub siren_period_ms: u32,
    /// Tone played while the alarm LED is lit (Hz)
    pub siren_high_hz: u32,
    /// Tone played while the alarm LED is dark (Hz)
    pub siren_low_hz: u32,

    // --- Timing ---
    /// Minimum interval between status display refreshes (milliseconds)
    pub display_refresh_ms: u32,
    /// Telemetry log interval (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Sensor health ---
    /// Consecutive failed accelerometer reads before a dropout is reported
    pub sensor_dropout_reads: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Classification
            impact_threshold_g: 2.0,
            stability_threshold_g: 1.3,
            judge_window_ms: 5000,
            required_active_seconds: 3,

            // Cancellation
            long_press_ms: 2000,

            // Siren
            siren_period_ms: 300,
            siren_high_hz: 2000,
            siren_low_hz: 1000,

            // Timing
            display_refresh_ms: 100,     // 10 Hz
            telemetry_interval_ms: 1000, // 1 Hz

            // Sensor health
            sensor_dropout_reads: 5,
        }
    }
}

impl SystemConfig {
    /// Impact threshold in g², the unit the classifier compares against.
    pub fn impact_threshold_sq(&self) -> f32 {
        self.impact_threshold_g * self.impact_threshold_g
    }

    /// Motion threshold in g².
    pub fn stability_threshold_sq(&self) -> f32 {
        self.stability_threshold_g * self.stability_threshold_g
    }

    /// Reject values the classifier or loop cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.impact_threshold_g.is_finite() && self.impact_threshold_g > 0.0) {
            return Err(ConfigError::ValidationFailed("impact_threshold_g must be positive"));
        }
        if !(self.stability_threshold_g.is_finite() && self.stability_threshold_g > 0.0) {
            return Err(ConfigError::ValidationFailed("stability_threshold_g must be positive"));
        }
        if self.stability_threshold_g >= self.impact_threshold_g {
            return Err(ConfigError::ValidationFailed(
                "stability_threshold_g must be below impact_threshold_g",
            ));
        }
        if self.judge_window_ms == 0 {
            return Err(ConfigError::ValidationFailed("judge_window_ms is zero"));
        }
        if self.judge_window_ms > WINDOW_SLOTS as u32 * 1000 {
            return Err(ConfigError::ValidationFailed(
                "judge_window_ms exceeds motion window capacity",
            ));
        }
        if self.required_active_seconds == 0 || self.required_active_seconds as usize > WINDOW_SLOTS {
            return Err(ConfigError::ValidationFailed(
                "required_active_seconds must be 1..=5",
            ));
        }
        if u32::from(self.required_active_seconds) > self.reachable_seconds() {
            return Err(ConfigError::ValidationFailed(
                "required_active_seconds exceeds the seconds judge_window_ms can mark",
            ));
        }
        if self.long_press_ms == 0 {
            return Err(ConfigError::ValidationFailed("long_press_ms is zero"));
        }
        if self.siren_period_ms == 0 || self.siren_high_hz == 0 || self.siren_low_hz == 0 {
            return Err(ConfigError::ValidationFailed("siren timing must be non-zero"));
        }
        if self.display_refresh_ms == 0 || self.telemetry_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop intervals must be non-zero"));
        }
        if self.sensor_dropout_reads == 0 {
            return Err(ConfigError::ValidationFailed("sensor_dropout_reads is zero"));
        }
        Ok(())
    }

    /// Buckets one judging window can mark.  The sample that closes the
    /// window is classified first, so it may land one bucket past the last
    /// whole second.
    pub fn reachable_seconds(&self) -> u32 {
        (self.judge_window_ms / 1000 + 1).min(WINDOW_SLOTS as u32)
    }

    /// Parse a (possibly partial) JSON override and validate the result.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time configuration: the `FALLGUARD_CONFIG_JSON` override when
    /// present and valid, otherwise the defaults.
    pub fn load() -> Self {
        Self::resolve(option_env!("FALLGUARD_CONFIG_JSON"))
    }

    fn resolve(override_json: Option<&str>) -> Self {
        match override_json {
            Some(json) => match Self::from_json(json) {
                Ok(config) => {
                    info!("Config: build-time override applied");
                    config
                }
                Err(e) => {
                    warn!("Config: override rejected ({}), using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
