//! One-shot hardware peripheral initialization.
//!
//! Configures the alarm LED GPIO and the buzzer's LEDC timer/channel using
//! raw ESP-IDF sys calls.  Called once from `main()` before the control
//! loop starts.  I2C buses and the button pin go through `esp-idf-hal`
//! because the drivers consume them as `embedded-hal` traits.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_buzzer()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ALARM_LED_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::ALARM_LED_GPIO, 0) };

    info!("hw_init: alarm LED on GPIO{}", pins::ALARM_LED_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Buzzer (LEDC PWM) ─────────────────────────────────────────

pub const LEDC_CH_BUZZER: u32 = 0;
/// 50 % of the 8-bit duty range: a clean square wave.
const BUZZER_DUTY: u32 = 128;

#[cfg(target_os = "espidf")]
unsafe fn init_buzzer() -> Result<(), HwInitError> {
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::BUZZER_BASE_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_BUZZER,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::BUZZER_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    info!("hw_init: buzzer on GPIO{} (LEDC CH0, silent)", pins::BUZZER_GPIO);
    Ok(())
}

/// Retune the buzzer, or silence it with `None`.
#[cfg(target_os = "espidf")]
pub fn buzzer_tone(freq_hz: Option<u32>) {
    // SAFETY: LEDC timer 0 / channel 0 were configured in init_buzzer();
    // only the main loop calls this function.
    unsafe {
        match freq_hz {
            Some(hz) => {
                ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0, hz);
                ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER, BUZZER_DUTY);
            }
            None => {
                ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER, 0);
            }
        }
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, LEDC_CH_BUZZER);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn buzzer_tone(freq_hz: Option<u32>) {
    let _ = (freq_hz, BUZZER_DUTY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_init_succeeds_and_writes_are_noops() {
        assert_eq!(init_peripherals(), Ok(()));
        gpio_write(crate::pins::ALARM_LED_GPIO, true);
        buzzer_tone(Some(2000));
        buzzer_tone(None);
    }

    #[test]
    fn init_error_reports_return_code() {
        assert_eq!(
            HwInitError::GpioConfigFailed(-2).to_string(),
            "GPIO config failed (rc=-2)"
        );
    }
}
