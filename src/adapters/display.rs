//! OLED display adapter.
//!
//! Implements [`DisplayPort`] by drawing a [`StatusFrame`] into the SSD1306
//! frame buffer and flushing it.  Bus errors are logged and swallowed; the
//! alarm path must never wait on the screen.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::DisplayPort;
use crate::drivers::display::{StatusFrame, StatusScreen};
use crate::drivers::oled::Ssd1306;

pub struct OledDisplay<I2C> {
    oled: Ssd1306<I2C>,
    failures: u32,
}

impl<I2C: I2c> OledDisplay<I2C> {
    pub fn new(oled: Ssd1306<I2C>) -> Self {
        Self { oled, failures: 0 }
    }

    /// Flushes that failed since boot.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn panel(&self) -> &Ssd1306<I2C> {
        &self.oled
    }
}

impl<I2C: I2c> DisplayPort for OledDisplay<I2C> {
    fn render(&mut self, frame: &StatusFrame) {
        // Drawing into the buffer is infallible.
        let _ = StatusScreen::draw(frame, &mut self.oled);
        if let Err(e) = self.oled.flush() {
            self.failures = self.failures.wrapping_add(1);
            // Every refresh would log otherwise.
            if self.failures.is_power_of_two() {
                warn!("OLED: {} ({} failed refreshes)", e, self.failures);
            }
        }
    }
}
