//! Fuzz target: `SystemConfig::from_json`
//!
//! Arbitrary bytes as a config override must either be rejected or yield
//! a config that passes validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use fallguard::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.stability_threshold_sq() <= config.impact_threshold_sq());
    }
});
