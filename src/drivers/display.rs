//! Status screen layout.
//!
//! [`StatusFrame`] is a plain snapshot; [`StatusScreen::draw`] renders it onto
//! any `embedded-graphics` monochrome target.  Text is built into fixed-size
//! `heapless` strings, so a frame never allocates.
//!
//! ```text
//! ┌────────────────────────┐
//! │ JUDGING                │  state (9x15 bold)
//! │ |a| 1.02 g             │
//! │ [#->..] 1/3            │  progress + active seconds
//! │ HOLD 1.2/2.0 s         │  only while the button is held
//! └────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::diagnostics::Diagnostics;
use crate::fsm::SystemState;
use crate::fsm::window::WINDOW_SLOTS;

/// Characters per line at 6 px per glyph on a 128 px panel.
pub const LINE_CHARS: usize = 21;
pub type Line = String<LINE_CHARS>;

const STATE_Y: i32 = 0;
const DETAIL_Y: [i32; 3] = [20, 34, 48];

/// Everything the screen shows, captured once per refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFrame {
    pub state: SystemState,
    pub magnitude_g: f32,
    pub progress: Option<String<WINDOW_SLOTS>>,
    pub active_count: u8,
    pub required_active: u8,
    pub held_ms: u32,
    pub long_press_ms: u32,
    pub sensor_faults: u32,
}

impl StatusFrame {
    pub fn from_diagnostics(d: &Diagnostics, required_active: u8, long_press_ms: u32) -> Self {
        Self {
            state: d.state,
            magnitude_g: d.magnitude_g(),
            progress: d.progress_text(),
            active_count: d.active_count,
            required_active,
            held_ms: d.held_ms,
            long_press_ms,
            sensor_faults: d.sensor_faults,
        }
    }

    pub fn title(&self) -> &'static str {
        self.state.name()
    }

    /// The three small-font lines under the title.
    pub fn detail_lines(&self) -> [Line; 3] {
        let mut magnitude = Line::new();
        let _ = write!(magnitude, "|a| {:.2} g", self.magnitude_g);

        let mut status = Line::new();
        match (self.state, &self.progress) {
            (SystemState::Judging, Some(progress)) => {
                let _ = write!(
                    status,
                    "[{}] {}/{}",
                    progress, self.active_count, self.required_active
                );
            }
            (SystemState::Alarm, _) => {
                let _ = status.push_str("HOLD BTN TO CANCEL");
            }
            _ if self.sensor_faults > 0 => {
                let _ = write!(status, "IMU FAULTS {}", self.sensor_faults);
            }
            _ => {}
        }

        let mut hold = Line::new();
        if self.held_ms > 0 {
            let _ = write!(
                hold,
                "HOLD {:.1}/{:.1} s",
                self.held_ms as f32 / 1000.0,
                self.long_press_ms as f32 / 1000.0
            );
        }

        [magnitude, status, hold]
    }
}

pub struct StatusScreen;

impl StatusScreen {
    /// Clear the target and lay out the frame.
    pub fn draw<D>(frame: &StatusFrame, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::Off)?;

        let title = MonoTextStyle::new(&FONT_9X15_BOLD, BinaryColor::On);
        Text::with_baseline(frame.title(), Point::new(0, STATE_Y), title, Baseline::Top)
            .draw(target)?;

        let body = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        for (line, y) in frame.detail_lines().iter().zip(DETAIL_Y) {
            if line.is_empty() {
                continue;
            }
            Text::with_baseline(line.as_str(), Point::new(0, y), body, Baseline::Top)
                .draw(target)?;
        }
        Ok(())
    }
}
