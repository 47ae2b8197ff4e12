//! Cooperative timing for the single control loop.
//!
//! There is no RTOS task per concern: the main loop reads the monotonic
//! clock once per iteration and each periodic action asks its own
//! [`TimeGate`] whether it is due.  Nothing here sleeps or blocks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  loop {  now = clock.now_ms()                                │
//! │                                                              │
//! │   sample + classify ........ every iteration (no floor)      │
//! │   button hold / cancel ..... every iteration                 │
//! │   siren phase .............. (now / 300) % 2, no timer       │
//! │   display refresh .......... TimeGate(100 ms)                │
//! │   telemetry ................ TimeGate(1000 ms)               │
//! │  }                                                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All comparisons use `now.wrapping_sub(last)` so the `u32` millisecond
//! counter may roll over (every ~49.7 days) without stalling any gate.

use crate::config::SystemConfig;

// ═══════════════════════════════════════════════════════════════
//  Time-gated action
// ═══════════════════════════════════════════════════════════════

/// "Has at least `period_ms` elapsed since this action last ran?"
#[derive(Debug, Clone, Copy)]
pub struct TimeGate {
    period_ms: u32,
    /// Timestamp of the last fire; `None` until the first poll.
    last_ms: Option<u32>,
}

impl TimeGate {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    /// Returns `true` (and re-arms) if the action is due.  The first poll
    /// always fires so the action runs immediately after boot.
    pub fn ready(&mut self, now_ms: u32) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Siren modulation
// ═══════════════════════════════════════════════════════════════

/// Which half of the siren cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SirenPhase {
    /// High tone, LED lit.
    High,
    /// Low tone, LED dark.
    Low,
}

/// Pure function of the clock: no state, no timer.
pub fn siren_phase(now_ms: u32, period_ms: u32) -> SirenPhase {
    if (now_ms / period_ms.max(1)) % 2 == 0 {
        SirenPhase::High
    } else {
        SirenPhase::Low
    }
}

// ═══════════════════════════════════════════════════════════════
//  Loop schedule
// ═══════════════════════════════════════════════════════════════

/// Actions due on this iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueActions {
    pub display: bool,
    pub telemetry: bool,
}

/// The throttled concerns of the control loop.
///
/// A state change is not redrawn out of turn: the next display fire is at
/// most one refresh period away, and the bus never sees two renders closer
/// than `display_refresh_ms`.
///
/// Sampling and classification are deliberately absent: they run on every
/// iteration to keep impact latency minimal.
pub struct Scheduler {
    display: TimeGate,
    telemetry: TimeGate,
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            display: TimeGate::new(config.display_refresh_ms),
            telemetry: TimeGate::new(config.telemetry_interval_ms),
        }
    }

    /// Poll every gate against a single clock reading.
    pub fn poll(&mut self, now_ms: u32) -> DueActions {
        DueActions {
            display: self.display.ready(now_ms),
            telemetry: self.telemetry.ready(now_ms),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
