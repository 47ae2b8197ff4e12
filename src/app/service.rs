//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the fall classifier, the button debouncer, the siren
//! pattern and the refresh gates.  One call to [`AppService::tick`] is one
//! iteration of the control loop, run to completion in a fixed order:
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ AlarmPort
//!  ButtonPort ──▶ │        AppService        │ ──▶ DisplayPort
//!                 │ classify · cancel · gate │ ──▶ EventSink
//!                 └──────────────────────────┘
//! ```
//!
//! sample → classify → button/cancel → siren → (throttled) display →
//! (throttled) telemetry.  The clock is read once by the caller and passed
//! in, so every stage of an iteration sees the same `now_ms`.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::diagnostics::Diagnostics;
use crate::drivers::button::ButtonDebouncer;
use crate::drivers::display::StatusFrame;
use crate::drivers::siren::SirenPattern;
use crate::fsm::{FallClassifier, Sample, SystemState};
use crate::scheduler::Scheduler;

use super::events::{AppEvent, TelemetryData};
use super::ports::{AlarmPort, ButtonPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    classifier: FallClassifier,
    button: ButtonDebouncer,
    siren: SirenPattern,
    scheduler: Scheduler,
    /// Hold duration seen on the last iteration (0 after a cancel).
    held_ms: u32,
    /// Failed accelerometer reads since boot.
    sensor_faults: u32,
    /// Current run of failed reads.
    consecutive_faults: u16,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// The config is expected to be validated already (see
    /// [`SystemConfig::load`]).
    pub fn new(config: SystemConfig) -> Self {
        Self {
            classifier: FallClassifier::new(&config),
            button: ButtonDebouncer::new(),
            siren: SirenPattern::new(&config),
            scheduler: Scheduler::new(&config),
            config,
            held_ms: 0,
            sensor_faults: 0,
            consecutive_faults: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let state = self.classifier.state();
        sink.emit(&AppEvent::Started(state));
        info!(
            "AppService started in {} (impact {:.1} g, stability {:.1} g, window {} ms)",
            state.name(),
            self.config.impact_threshold_g,
            self.config.stability_threshold_g,
            self.config.judge_window_ms
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one loop iteration.
    ///
    /// The `hw` parameter satisfies the sensor, button and alarm ports at
    /// once; this avoids a triple mutable borrow of the board while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ButtonPort + AlarmPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> SystemState {
        let before = self.classifier.state();

        // 1. Sample
        let value_sq = self.sample(hw, sink);

        // 2. Classify
        let after = self.classifier.feed(Sample::new(value_sq, now_ms));
        if after != before {
            self.report_transition(before, after, value_sq, sink);
        }

        // 3. Button hold / cancel
        let held = self.button.update(hw.is_pressed(), now_ms);
        self.held_ms = held;
        if self.classifier.on_button_hold(held) {
            self.button.reset();
            self.held_ms = 0;
            info!("Alarm cancelled after {} ms hold", held);
            sink.emit(&AppEvent::AlarmCancelled { held_ms: held });
            sink.emit(&AppEvent::StateChanged {
                from: SystemState::Alarm,
                to: SystemState::Monitoring,
            });
        }
        let state = self.classifier.state();

        // 4. Siren
        hw.apply(self.siren.output(state, now_ms));

        // 5. Display and telemetry, each behind its own gate
        let due = self.scheduler.poll(now_ms);
        if due.display {
            display.render(&self.frame());
        }
        if due.telemetry {
            sink.emit(&AppEvent::Telemetry(self.telemetry(now_ms)));
        }

        state
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> SystemState {
        self.classifier.state()
    }

    pub fn classifier(&self) -> &FallClassifier {
        &self.classifier
    }

    /// Classifier snapshot with the hold and fault fields filled in.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            held_ms: self.held_ms,
            sensor_faults: self.sensor_faults,
            ..self.classifier.diagnostics()
        }
    }

    /// What the status screen should show right now.
    pub fn frame(&self) -> StatusFrame {
        StatusFrame::from_diagnostics(
            &self.diagnostics(),
            self.config.required_active_seconds,
            self.config.long_press_ms,
        )
    }

    pub fn telemetry(&self, now_ms: u32) -> TelemetryData {
        let d = self.diagnostics();
        TelemetryData {
            state: d.state,
            magnitude_g: d.magnitude_g(),
            active_count: d.active_count,
            held_ms: d.held_ms,
            sensor_faults: d.sensor_faults,
            uptime_ms: now_ms,
        }
    }

    pub fn sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Read the accelerometer.  A failed read becomes a 0.0 sample, which
    /// the classifier treats as stillness; the streak is tracked here.
    fn sample(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) -> f32 {
        match hw.read_squared_magnitude() {
            Ok(value_sq) => {
                if self.consecutive_faults >= self.config.sensor_dropout_reads {
                    info!("Accelerometer recovered after {} failed reads", self.consecutive_faults);
                    sink.emit(&AppEvent::SensorRecovered);
                }
                self.consecutive_faults = 0;
                value_sq
            }
            Err(e) => {
                self.sensor_faults = self.sensor_faults.wrapping_add(1);
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                if self.consecutive_faults == self.config.sensor_dropout_reads {
                    warn!("Accelerometer dropout: {} ({} reads in a row)", e, self.consecutive_faults);
                    sink.emit(&AppEvent::SensorDropout {
                        consecutive: self.consecutive_faults,
                    });
                }
                0.0
            }
        }
    }

    fn report_transition(
        &self,
        from: SystemState,
        to: SystemState,
        value_sq: f32,
        sink: &mut impl EventSink,
    ) {
        if from == SystemState::Monitoring && to == SystemState::Judging {
            if let Some(at_ms) = self.classifier.impact_ms() {
                sink.emit(&AppEvent::ImpactDetected {
                    magnitude_sq: value_sq,
                    at_ms,
                });
            }
        }
        if from == SystemState::Judging {
            if let Some(verdict) = self.classifier.last_verdict() {
                sink.emit(&AppEvent::WindowClosed {
                    active_count: self.classifier.active_count(),
                    verdict,
                });
            }
        }
        sink.emit(&AppEvent::StateChanged { from, to });
    }
}
