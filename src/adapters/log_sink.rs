//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} | |a|={:.2}g | active={} | hold={}ms | \
                     imu_faults={} | up={}ms",
                    t.state.name(),
                    t.magnitude_g,
                    t.active_count,
                    t.held_ms,
                    t.sensor_faults,
                    t.uptime_ms,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::ImpactDetected { magnitude_sq, at_ms } => {
                info!(
                    "IMPACT | {:.2}g at {}ms",
                    magnitude_sq.max(0.0).sqrt(),
                    at_ms
                );
            }
            AppEvent::WindowClosed {
                active_count,
                verdict,
            } => {
                info!("JUDGE | {} active s -> {:?}", active_count, verdict);
            }
            AppEvent::AlarmCancelled { held_ms } => {
                info!("CANCEL | held {}ms", held_ms);
            }
            AppEvent::SensorDropout { consecutive } => {
                warn!("SENSOR | dropout, {} failed reads", consecutive);
            }
            AppEvent::SensorRecovered => {
                info!("SENSOR | recovered");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}
