//! Fuzz target: `FallClassifier::feed` + `on_button_hold`
//!
//! Decodes the input as a stream of (time step, sample, hold) records and
//! checks that the classifier never panics, never reports more active
//! seconds than the window holds, and never leaves Judging late.
//!
//! cargo fuzz run fuzz_classifier

#![no_main]

use fallguard::config::SystemConfig;
use fallguard::fsm::window::WINDOW_SLOTS;
use fallguard::fsm::{FallClassifier, Sample, SystemState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let mut classifier = FallClassifier::new(&config);

    let Some((seed, records)) = data.split_first_chunk::<4>() else {
        return;
    };
    let mut now = u32::from_le_bytes(*seed);

    for rec in records.chunks_exact(7) {
        let dt = u16::from_le_bytes([rec[0], rec[1]]) as u32;
        let value = f32::from_le_bytes([rec[2], rec[3], rec[4], rec[5]]);
        let hold_ms = rec[6] as u32 * 20;

        now = now.wrapping_add(dt);
        let state = classifier.feed(Sample::new(value, now));

        assert!(classifier.active_count() as usize <= WINDOW_SLOTS);
        if let Some(impact) = classifier.impact_ms() {
            assert_eq!(state, SystemState::Judging);
            assert!(now.wrapping_sub(impact) < config.judge_window_ms);
        }

        let was_alarm = state == SystemState::Alarm;
        let cancelled = classifier.on_button_hold(hold_ms);
        assert_eq!(cancelled, was_alarm && hold_ms >= config.long_press_ms);
    }
});
