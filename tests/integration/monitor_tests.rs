//! Integration tests for the AppService → classifier → siren/display pipeline.
//!
//! Each test drives the service with a simulated clock, the way the
//! firmware loop does, and asserts on what reached the mock ports.

use fallguard::app::events::AppEvent;
use fallguard::app::service::AppService;
use fallguard::config::SystemConfig;
use fallguard::drivers::siren::SirenOutput;
use fallguard::error::SensorError;
use fallguard::fsm::{SystemState, Verdict};

use crate::mock_hw::{MockBoard, MockDisplay, RecordingSink};

const IMPACT: f32 = 9.0; // 3 g
const MOTION: f32 = 2.25; // 1.5 g
const STILL: f32 = 1.0; // resting, 1 g

struct Rig {
    app: AppService,
    board: MockBoard,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    fn with_config(config: SystemConfig) -> Self {
        let mut rig = Self {
            app: AppService::new(config),
            board: MockBoard::new(),
            display: MockDisplay::new(),
            sink: RecordingSink::new(),
        };
        rig.app.start(&mut rig.sink);
        rig
    }

    fn tick(&mut self, now_ms: u32) -> SystemState {
        self.display.now_ms = now_ms;
        self.app
            .tick(now_ms, &mut self.board, &mut self.display, &mut self.sink)
    }

    /// Tick every `step` ms over `[from, to)` with the current board inputs.
    fn run(&mut self, from: u32, to: u32, step: u32) -> SystemState {
        let mut t = from;
        let mut state = self.app.state();
        while t.wrapping_sub(from) < to.wrapping_sub(from) {
            state = self.tick(t);
            t = t.wrapping_add(step);
        }
        state
    }

    /// Impact at `t0`, then stillness until the window closes.
    fn fall_at(&mut self, t0: u32) {
        self.board.sample = Ok(IMPACT);
        assert_eq!(self.tick(t0), SystemState::Judging);
        self.board.sample = Ok(STILL);
        self.run(t0.wrapping_add(20), t0.wrapping_add(5000), 20);
        assert_eq!(self.tick(t0.wrapping_add(5000)), SystemState::Alarm);
    }
}

// ── Quiet wearer ──────────────────────────────────────────────

#[test]
fn resting_wearer_never_alarms() {
    let mut rig = Rig::new();
    assert_eq!(rig.run(0, 20_000, 10), SystemState::Monitoring);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ImpactDetected { .. })), 0);
    assert!(rig.board.siren.iter().all(|o| *o == SirenOutput::SILENT));
}

// ── False alarm: motion after impact ──────────────────────────

#[test]
fn active_wearer_after_impact_is_a_false_alarm() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(1000);

    // Moving through seconds 0..3 of the window, still afterwards.
    rig.board.sample = Ok(MOTION);
    rig.run(1050, 4000, 50);
    rig.board.sample = Ok(STILL);
    rig.run(4000, 6000, 50);
    assert_eq!(rig.tick(6000), SystemState::Monitoring);

    assert!(rig.sink.events.contains(&AppEvent::WindowClosed {
        active_count: 3,
        verdict: Verdict::FalseAlarm,
    }));
    assert_eq!(rig.app.classifier().active_count(), 3);
    assert!(rig.board.siren.iter().all(|o| *o == SirenOutput::SILENT));
}

#[test]
fn significant_events_arrive_in_order() {
    let mut rig = Rig::new();
    rig.fall_at(1000);
    let events = rig.sink.significant();
    assert_eq!(events[0], &AppEvent::Started(SystemState::Monitoring));
    assert_eq!(
        events[1],
        &AppEvent::ImpactDetected {
            magnitude_sq: IMPACT,
            at_ms: 1000
        }
    );
    assert_eq!(
        events[2],
        &AppEvent::StateChanged {
            from: SystemState::Monitoring,
            to: SystemState::Judging
        }
    );
    assert_eq!(
        events[3],
        &AppEvent::WindowClosed {
            active_count: 0,
            verdict: Verdict::FallConfirmed
        }
    );
    assert_eq!(
        events[4],
        &AppEvent::StateChanged {
            from: SystemState::Judging,
            to: SystemState::Alarm
        }
    );
}

// ── Fall, then cancel ─────────────────────────────────────────

#[test]
fn two_second_hold_cancels_alarm() {
    let mut rig = Rig::new();
    rig.fall_at(1000); // alarm at 6000

    rig.board.pressed = true;
    assert_eq!(rig.run(6000, 8000, 10), SystemState::Alarm);
    assert_eq!(rig.tick(8000), SystemState::Monitoring);

    assert!(rig.sink.events.contains(&AppEvent::AlarmCancelled { held_ms: 2000 }));
    assert_eq!(rig.board.last_siren(), SirenOutput::SILENT);
    assert_eq!(rig.app.diagnostics().held_ms, 0);
    assert_eq!(rig.app.classifier().active_count(), 0);
}

#[test]
fn short_hold_does_not_cancel() {
    let mut rig = Rig::new();
    rig.fall_at(1000);

    rig.board.pressed = true;
    rig.run(6000, 8000, 1); // last tick at 7999: held 1999 ms
    rig.board.pressed = false;
    assert_eq!(rig.tick(8000), SystemState::Alarm);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AlarmCancelled { .. })), 0);
}

#[test]
fn interrupted_hold_starts_over() {
    let mut rig = Rig::new();
    rig.fall_at(1000);

    rig.board.pressed = true;
    rig.run(6000, 7500, 10);
    rig.board.pressed = false;
    rig.tick(7500);
    rig.board.pressed = true;
    // 1500 + 1500 ms in two pieces is not a long press.
    assert_eq!(rig.run(7510, 9010, 10), SystemState::Alarm);
    assert_eq!(rig.run(9010, 9600, 10), SystemState::Monitoring);
}

#[test]
fn held_button_after_cancel_counts_as_a_fresh_press() {
    let mut rig = Rig::new();
    rig.fall_at(1000);
    rig.board.pressed = true;
    rig.run(6000, 8001, 10);
    assert_eq!(rig.app.state(), SystemState::Monitoring);

    // Still holding: the hold measured from the first press is gone.
    rig.tick(8010);
    assert_eq!(rig.app.diagnostics().held_ms, 0);
    rig.tick(8510);
    assert_eq!(rig.app.diagnostics().held_ms, 500);
}

#[test]
fn hold_started_while_judging_cancels_as_alarm_begins() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(1000);
    rig.board.sample = Ok(STILL);
    rig.run(1020, 3500, 20);

    // Pressed 2500 ms before the window closes.
    rig.board.pressed = true;
    assert_eq!(rig.run(3500, 6000, 20), SystemState::Judging);
    assert_eq!(rig.tick(6000), SystemState::Monitoring);

    let events = rig.sink.significant();
    let tail = &events[events.len() - 4..];
    assert_eq!(
        tail,
        [
            &AppEvent::WindowClosed {
                active_count: 0,
                verdict: Verdict::FallConfirmed
            },
            &AppEvent::StateChanged {
                from: SystemState::Judging,
                to: SystemState::Alarm
            },
            &AppEvent::AlarmCancelled { held_ms: 2500 },
            &AppEvent::StateChanged {
                from: SystemState::Alarm,
                to: SystemState::Monitoring
            },
        ]
    );
    // Cancelled before the siren stage of the same tick: it never sounded.
    assert!(rig.board.siren.iter().all(|o| *o == SirenOutput::SILENT));
}

#[test]
fn short_hold_from_judging_finishes_inside_alarm() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(1000);
    rig.board.sample = Ok(STILL);
    rig.run(1020, 4500, 20);

    rig.board.pressed = true;
    rig.run(4500, 6000, 20);
    assert_eq!(rig.tick(6000), SystemState::Alarm); // held 1500 ms
    assert_eq!(rig.run(6010, 6500, 10), SystemState::Alarm);
    assert_eq!(rig.tick(6500), SystemState::Monitoring);
    assert!(rig.sink.events.contains(&AppEvent::AlarmCancelled { held_ms: 2000 }));
}

// ── Siren ─────────────────────────────────────────────────────

#[test]
fn siren_alternates_while_alarmed() {
    let mut rig = Rig::new();
    rig.fall_at(1000); // alarm at 6000; 6000 / 300 = 20, even

    let high = SirenOutput {
        led_on: true,
        tone_hz: Some(2000),
    };
    let low = SirenOutput {
        led_on: false,
        tone_hz: Some(1000),
    };
    assert_eq!(rig.board.last_siren(), high);
    rig.tick(6299);
    assert_eq!(rig.board.last_siren(), high);
    rig.tick(6300);
    assert_eq!(rig.board.last_siren(), low);
    rig.tick(6600);
    assert_eq!(rig.board.last_siren(), high);
}

#[test]
fn siren_is_silent_while_judging() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(0);
    rig.board.sample = Ok(STILL);
    rig.run(10, 4990, 10);
    assert!(rig.board.siren.iter().all(|o| *o == SirenOutput::SILENT));
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_refresh_is_throttled() {
    let mut rig = Rig::new();
    rig.run(0, 1000, 1);
    // 0, 100, ... 900
    assert_eq!(rig.display.frames.len(), 10);
    assert_eq!(rig.board.reads, 1000);
}

#[test]
fn state_change_is_shown_within_one_refresh_period() {
    let mut rig = Rig::new();
    rig.tick(0);
    rig.tick(100);

    // Impact 1 ms after a render: the bus gets its full 100 ms first.
    rig.board.sample = Ok(IMPACT);
    assert_eq!(rig.tick(101), SystemState::Judging);
    assert_eq!(rig.display.rendered_at, vec![0, 100]);

    rig.board.sample = Ok(STILL);
    rig.run(102, 201, 1);
    assert_eq!(rig.display.rendered_at, vec![0, 100, 200]);
    let frame = rig.display.last().unwrap();
    assert_eq!(frame.state, SystemState::Judging);
    assert_eq!(frame.progress.as_deref(), Some(">...."));
}

#[test]
fn renders_never_come_closer_than_refresh_period() {
    let mut rig = Rig::new();
    rig.run(0, 1003, 1);
    rig.fall_at(1003); // Judging at 1003, Alarm at 6003
    rig.board.pressed = true;
    assert_eq!(rig.run(6003, 8100, 7), SystemState::Monitoring);

    assert!(rig.display.rendered_at.len() > 70);
    assert_eq!(rig.display.min_gap_ms(), Some(100));
}

#[test]
fn judging_frame_shows_motion_progress() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(0);
    rig.board.sample = Ok(MOTION);
    rig.run(100, 1000, 100);
    rig.board.sample = Ok(STILL);
    rig.run(1000, 2500, 100);
    let frame = rig.display.last().unwrap();
    assert_eq!(frame.progress.as_deref(), Some("#->.."));
    assert_eq!(frame.active_count, 1);
}

// ── Sensor dropout ────────────────────────────────────────────

#[test]
fn sensor_dropout_reads_as_stillness() {
    let mut rig = Rig::new();
    rig.board.sample = Ok(IMPACT);
    rig.tick(0);
    // The bus dies right after the impact: zeros look like a motionless wearer.
    rig.board.sample = Err(SensorError::BusReadFailed);
    rig.run(10, 5000, 10);
    assert_eq!(rig.tick(5000), SystemState::Alarm);

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SensorDropout { .. })), 1);
    assert!(rig.sink.events.contains(&AppEvent::SensorDropout { consecutive: 5 }));
    assert_eq!(rig.app.sensor_faults(), 500);

    rig.board.sample = Ok(STILL);
    rig.tick(5010);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::SensorRecovered), 1);
}

#[test]
fn isolated_read_errors_stay_quiet() {
    let mut rig = Rig::new();
    for t in 0..100 {
        rig.board.sample = if t % 3 == 0 {
            Err(SensorError::BusReadFailed)
        } else {
            Ok(STILL)
        };
        rig.tick(t * 10);
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SensorDropout { .. })), 0);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::SensorRecovered), 0);
    assert_eq!(rig.app.sensor_faults(), 34);
}

// ── Clock wraparound ──────────────────────────────────────────

#[test]
fn fall_across_clock_wrap() {
    let mut rig = Rig::new();
    let t0 = u32::MAX - 1500;
    rig.fall_at(t0);
    assert_eq!(rig.app.state(), SystemState::Alarm);

    rig.board.pressed = true;
    let alarm_at = t0.wrapping_add(5000);
    rig.run(alarm_at, alarm_at.wrapping_add(2000), 10);
    assert_eq!(rig.tick(alarm_at.wrapping_add(2000)), SystemState::Monitoring);
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn overridden_config_changes_timing() {
    let config = SystemConfig::from_json(r#"{"judge_window_ms": 3000, "long_press_ms": 500}"#)
        .expect("valid override");
    let mut rig = Rig::with_config(config);
    rig.board.sample = Ok(IMPACT);
    rig.tick(0);
    rig.board.sample = Ok(STILL);
    rig.run(10, 3000, 10);
    assert_eq!(rig.tick(3000), SystemState::Alarm);

    rig.board.pressed = true;
    rig.run(3000, 3500, 10);
    assert_eq!(rig.tick(3500), SystemState::Monitoring);
}

#[test]
fn telemetry_is_periodic() {
    let mut rig = Rig::new();
    rig.run(0, 5000, 10);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 5);
    match rig.sink.events.last() {
        Some(AppEvent::Telemetry(t)) => {
            assert_eq!(t.state, SystemState::Monitoring);
            assert_eq!(t.uptime_ms, 4000);
            assert!((t.magnitude_g - 1.0).abs() < 1e-6);
        }
        other => panic!("expected telemetry, got {:?}", other),
    }
}
