//! Mock hardware adapters for integration tests.
//!
//! Record every port call so tests can assert on the full output history
//! without touching real I2C, GPIO or LEDC registers.

use fallguard::app::events::AppEvent;
use fallguard::app::ports::{AlarmPort, ButtonPort, DisplayPort, EventSink, SensorPort};
use fallguard::drivers::display::StatusFrame;
use fallguard::drivers::siren::SirenOutput;
use fallguard::error::SensorError;

// ── MockBoard ─────────────────────────────────────────────────

/// Accelerometer, button and siren in one, like the real adapter.
pub struct MockBoard {
    /// Returned by every read until changed.
    pub sample: Result<f32, SensorError>,
    pub pressed: bool,
    pub reads: usize,
    /// Every output the service asked for, in order.
    pub siren: Vec<SirenOutput>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            sample: Ok(1.0),
            pressed: false,
            reads: 0,
            siren: Vec::new(),
        }
    }

    pub fn last_siren(&self) -> SirenOutput {
        self.siren.last().copied().unwrap_or(SirenOutput::SILENT)
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockBoard {
    fn read_squared_magnitude(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        self.sample
    }
}

impl ButtonPort for MockBoard {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

impl AlarmPort for MockBoard {
    fn apply(&mut self, output: SirenOutput) {
        self.siren.push(output);
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<StatusFrame>,
    /// Clock value of the tick in progress, set by the test rig.
    pub now_ms: u32,
    /// When each entry of `frames` was rendered.
    pub rendered_at: Vec<u32>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&StatusFrame> {
        self.frames.last()
    }

    /// Smallest interval between two consecutive renders.
    pub fn min_gap_ms(&self) -> Option<u32> {
        self.rendered_at
            .windows(2)
            .map(|w| w[1].wrapping_sub(w[0]))
            .min()
    }
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, frame: &StatusFrame) {
        self.frames.push(frame.clone());
        self.rendered_at.push(self.now_ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Events other than periodic telemetry.
    pub fn significant(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, AppEvent::Telemetry(_)))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
