//! Task Watchdog Timer (TWDT) driver.
//!
//! The control loop never sleeps, so a stalled I2C transaction or a
//! runaway redraw is the only way it can stop making progress.  The TWDT
//! resets the device if the loop fails to feed it within the timeout.
//!
//! Idle tasks are deliberately not watched (`idle_core_mask = 0`): the busy
//! loop starves them by construction.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Reset the device if the loop stalls this long.
pub const WATCHDOG_TIMEOUT_MS: u32 = 3_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    feeds: u32,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling (main) task.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: TWDT API calls from the main task during boot.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: WATCHDOG_TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!("Watchdog: reconfigure returned {}", ret);
                }

                let subscribed = esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK;
                if subscribed {
                    log::info!("Watchdog: main loop subscribed ({} ms)", WATCHDOG_TIMEOUT_MS);
                } else {
                    log::warn!("Watchdog: subscribe failed, loop is unsupervised");
                }
                Self { subscribed, feeds: 0 }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op");
            Self { feeds: 0 }
        }
    }

    /// Call once per loop iteration.
    pub fn feed(&mut self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the calling task's TWDT entry; main task only.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
        self.feeds = self.feeds.wrapping_add(1);
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}
