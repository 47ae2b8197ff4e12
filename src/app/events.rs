//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware logs them to serial.

use crate::fsm::{SystemState, Verdict};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(SystemState),

    /// The classifier moved between states.
    StateChanged { from: SystemState, to: SystemState },

    /// A sample crossed the impact threshold while monitoring.
    ImpactDetected { magnitude_sq: f32, at_ms: u32 },

    /// The judging window elapsed and was scored.
    WindowClosed { active_count: u8, verdict: Verdict },

    /// A long press silenced the alarm.
    AlarmCancelled { held_ms: u32 },

    /// The accelerometer has failed this many reads in a row.
    SensorDropout { consecutive: u16 },

    /// A good read followed a reported dropout.
    SensorRecovered,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub state: SystemState,
    pub magnitude_g: f32,
    pub active_count: u8,
    pub held_ms: u32,
    pub sensor_faults: u32,
    pub uptime_ms: u32,
}
