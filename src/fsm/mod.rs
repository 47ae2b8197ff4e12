//! Fall-decision state machine.
//!
//! ```text
//!                value > impact²
//!  ┌────────────┐ ─────────────▶ ┌──────────┐
//!  │ Monitoring │                │ Judging  │── marks 1 s buckets while
//!  └────────────┘ ◀───────────── └──────────┘   value > stability²
//!        ▲        ≥ N active s         │
//!        │                             │ window expired, < N active s
//!        │  hold ≥ long press    ┌─────▼────┐
//!        └────────────────────── │  Alarm   │
//!                                └──────────┘
//! ```
//!
//! The classifier is fed one squared-magnitude sample per loop iteration.
//! It never blocks, never allocates, and never fails: every input maps to
//! exactly one next state.  Elapsed time is always computed with
//! `wrapping_sub` so the `u32` millisecond clock may roll over mid-window.

pub mod window;

use log::info;

use crate::config::SystemConfig;
use crate::diagnostics::Diagnostics;
use window::MotionWindow;

// ---------------------------------------------------------------------------
// Public state and sample types
// ---------------------------------------------------------------------------

/// Observable classifier mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SystemState {
    Monitoring = 0,
    Judging = 1,
    Alarm = 2,
}

impl SystemState {
    /// Label used on the status display and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monitoring => "MONITORING",
            Self::Judging => "JUDGING",
            Self::Alarm => "FALL ALARM",
        }
    }
}

/// One accelerometer reading reduced to scalar energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Sum of squared axis accelerations (g²).
    pub value_sq: f32,
    /// Monotonic clock at the time of the read (ms, wraps).
    pub timestamp_ms: u32,
}

impl Sample {
    pub const fn new(value_sq: f32, timestamp_ms: u32) -> Self {
        Self {
            value_sq,
            timestamp_ms,
        }
    }
}

/// Outcome of a completed judging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Enough seconds of motion followed the impact: the wearer is active.
    FalseAlarm,
    /// The impact was followed by stillness.
    FallConfirmed,
}

// ---------------------------------------------------------------------------
// Internal phase
// ---------------------------------------------------------------------------

/// Internal mode.  The impact time only exists while judging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Monitoring,
    Judging { impact_ms: u32 },
    Alarm,
}

impl Phase {
    fn state(self) -> SystemState {
        match self {
            Self::Monitoring => SystemState::Monitoring,
            Self::Judging { .. } => SystemState::Judging,
            Self::Alarm => SystemState::Alarm,
        }
    }
}

/// Classification constants resolved from [`SystemConfig`].
#[derive(Debug, Clone, Copy)]
struct Thresholds {
    impact_sq: f32,
    stability_sq: f32,
    judge_window_ms: u32,
    required_active_seconds: u8,
    long_press_ms: u32,
}

impl From<&SystemConfig> for Thresholds {
    fn from(config: &SystemConfig) -> Self {
        Self {
            impact_sq: config.impact_threshold_sq(),
            stability_sq: config.stability_threshold_sq(),
            judge_window_ms: config.judge_window_ms,
            required_active_seconds: config.required_active_seconds,
            long_press_ms: config.long_press_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// The fall classifier.  Owns its motion window; no global state.
pub struct FallClassifier {
    thresholds: Thresholds,
    phase: Phase,
    window: MotionWindow,
    last_sample: Sample,
    last_active_count: u8,
    last_verdict: Option<Verdict>,
}

impl FallClassifier {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            thresholds: Thresholds::from(config),
            phase: Phase::Monitoring,
            window: MotionWindow::new(),
            last_sample: Sample::new(0.0, 0),
            last_active_count: 0,
            last_verdict: None,
        }
    }

    /// Consume one sample and return the resulting state.
    pub fn feed(&mut self, sample: Sample) -> SystemState {
        self.last_sample = sample;

        match self.phase {
            Phase::Monitoring => {
                if sample.value_sq > self.thresholds.impact_sq {
                    self.window.reset();
                    self.last_active_count = 0;
                    self.transition(Phase::Judging {
                        impact_ms: sample.timestamp_ms,
                    });
                }
            }

            Phase::Judging { impact_ms } => {
                let elapsed = sample.timestamp_ms.wrapping_sub(impact_ms);
                let second = (elapsed / 1000) as usize;

                // A second impact is just more motion; it never restarts the window.
                if sample.value_sq > self.thresholds.stability_sq {
                    self.window.mark(second);
                }

                if elapsed >= self.thresholds.judge_window_ms {
                    self.finalize();
                }
            }

            Phase::Alarm => {}
        }

        self.phase.state()
    }

    /// Offer the current button hold to the cancel gate.
    ///
    /// Only acts while alarmed; returns `true` if the alarm was cancelled.
    pub fn on_button_hold(&mut self, held_ms: u32) -> bool {
        if held_ms >= self.thresholds.long_press_ms {
            self.cancel()
        } else {
            false
        }
    }

    /// Leave `Alarm` for `Monitoring`, clearing window evidence.
    /// A no-op in any other state.
    pub fn cancel(&mut self) -> bool {
        if self.phase != Phase::Alarm {
            return false;
        }
        self.window.reset();
        self.last_active_count = 0;
        self.transition(Phase::Monitoring);
        true
    }

    pub fn state(&self) -> SystemState {
        self.phase.state()
    }

    /// Timestamp of the impact being judged, if any.
    pub fn impact_ms(&self) -> Option<u32> {
        match self.phase {
            Phase::Judging { impact_ms } => Some(impact_ms),
            _ => None,
        }
    }

    /// Seconds with motion: live while judging, else the last finalized count.
    pub fn active_count(&self) -> u8 {
        match self.phase {
            Phase::Judging { .. } => self.window.count_marked(),
            _ => self.last_active_count,
        }
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    pub fn window(&self) -> &MotionWindow {
        &self.window
    }

    pub fn last_sample(&self) -> Sample {
        self.last_sample
    }

    /// Snapshot for the display and telemetry.  Hold and sensor-fault
    /// fields are left at zero for the caller to fill in.
    pub fn diagnostics(&self) -> Diagnostics {
        let elapsed_in_window_ms = match self.phase {
            Phase::Judging { impact_ms } => self.last_sample.timestamp_ms.wrapping_sub(impact_ms),
            _ => 0,
        };
        Diagnostics {
            state: self.state(),
            magnitude_sq: self.last_sample.value_sq,
            active_count: self.active_count(),
            elapsed_in_window_ms,
            window: self.window,
            held_ms: 0,
            sensor_faults: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn finalize(&mut self) {
        let active = self.window.count_marked();
        self.last_active_count = active;

        if active >= self.thresholds.required_active_seconds {
            info!("Judging: {} active seconds, dismissing impact", active);
            self.last_verdict = Some(Verdict::FalseAlarm);
            self.transition(Phase::Monitoring);
        } else {
            info!("Judging: {} active seconds, fall confirmed", active);
            self.last_verdict = Some(Verdict::FallConfirmed);
            self.transition(Phase::Alarm);
        }
    }

    fn transition(&mut self, next: Phase) {
        info!(
            "FSM transition: {} -> {}",
            self.phase.state().name(),
            next.state().name()
        );
        self.phase = next;
    }
}
