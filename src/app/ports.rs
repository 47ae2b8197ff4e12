//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (accelerometer, button, siren, screen, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::drivers::display::StatusFrame;
use crate::drivers::siren::SirenOutput;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one accelerometer sample per loop iteration.
pub trait SensorPort {
    /// Squared acceleration magnitude in g².
    ///
    /// An `Err` is not fatal: the service counts it and classifies a 0.0
    /// sample in its place.
    fn read_squared_magnitude(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait ButtonPort {
    /// Raw level, already converted from active-low.  No debouncing.
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the LED + buzzer pair.
pub trait AlarmPort {
    /// Drive the outputs.  Called every iteration; implementations should
    /// skip redundant hardware writes.
    fn apply(&mut self, output: SirenOutput);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → screen)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Render a frame.  Failures are the adapter's to log; the core never
    /// sees them.
    fn render(&mut self, frame: &StatusFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
