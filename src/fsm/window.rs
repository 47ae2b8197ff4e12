//! Per-second motion evidence gathered while judging an impact.
//!
//! One flag per whole second of the judging window.  Stack-allocated, fixed
//! capacity; indices past the end are silently ignored so a late sample can
//! never write outside the window.

/// Number of one-second buckets in the judging window.
pub const WINDOW_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionWindow {
    slots: [bool; WINDOW_SLOTS],
}

impl MotionWindow {
    pub const fn new() -> Self {
        Self {
            slots: [false; WINDOW_SLOTS],
        }
    }

    /// Flag `second` as containing motion.  Idempotent; out of range is a no-op.
    pub fn mark(&mut self, second: usize) {
        if let Some(slot) = self.slots.get_mut(second) {
            *slot = true;
        }
    }

    pub fn is_marked(&self, second: usize) -> bool {
        self.slots.get(second).copied().unwrap_or(false)
    }

    pub fn count_marked(&self) -> u8 {
        self.slots.iter().filter(|&&s| s).count() as u8
    }

    pub fn reset(&mut self) {
        self.slots = [false; WINDOW_SLOTS];
    }

    pub fn slots(&self) -> &[bool; WINDOW_SLOTS] {
        &self.slots
    }
}
