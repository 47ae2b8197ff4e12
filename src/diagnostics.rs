//! Classifier diagnostics for the status display and telemetry.
//!
//! The square root is only taken here, for humans; the classification path
//! works entirely in g².

use heapless::String;

use crate::fsm::SystemState;
use crate::fsm::window::{MotionWindow, WINDOW_SLOTS};

/// Point-in-time view of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub state: SystemState,
    /// Latest sample (g²).
    pub magnitude_sq: f32,
    /// Seconds with motion in the current or last window.
    pub active_count: u8,
    /// Time since the impact; zero outside `Judging`.
    pub elapsed_in_window_ms: u32,
    pub window: MotionWindow,
    /// Current continuous button hold.
    pub held_ms: u32,
    /// Accelerometer reads that failed since boot.
    pub sensor_faults: u32,
}

/// One character of the judging progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCell {
    /// Motion was seen in this second.
    Motion,
    /// Second is over and was still.
    Still,
    /// Second in progress, no motion yet.
    Current,
    /// Second not reached yet.
    Pending,
}

impl ProgressCell {
    pub fn glyph(self) -> char {
        match self {
            Self::Motion => '#',
            Self::Still => '-',
            Self::Current => '>',
            Self::Pending => '.',
        }
    }
}

impl Diagnostics {
    pub fn magnitude_g(&self) -> f32 {
        self.magnitude_sq.max(0.0).sqrt()
    }

    /// Whole seconds elapsed since the impact.
    pub fn current_second(&self) -> usize {
        (self.elapsed_in_window_ms / 1000) as usize
    }

    /// Per-second progress, only while judging.
    pub fn progress(&self) -> Option<[ProgressCell; WINDOW_SLOTS]> {
        if self.state != SystemState::Judging {
            return None;
        }
        let current = self.current_second();
        let mut cells = [ProgressCell::Pending; WINDOW_SLOTS];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = if self.window.is_marked(i) {
                ProgressCell::Motion
            } else if i < current {
                ProgressCell::Still
            } else if i == current {
                ProgressCell::Current
            } else {
                ProgressCell::Pending
            };
        }
        Some(cells)
    }

    /// The progress indicator as a 5-character string, e.g. `#->..`.
    pub fn progress_text(&self) -> Option<String<WINDOW_SLOTS>> {
        let cells = self.progress()?;
        let mut text = String::new();
        for cell in cells {
            let _ = text.push(cell.glyph());
        }
        Some(text)
    }
}
