//! GPIO / peripheral pin assignments for the FallGuard wrist unit.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! The I2C and button pins are claimed by field name from the HAL
//! `Peripherals` in `main`, which asserts at compile time that those fields
//! match the numbers below.  The alarm outputs drive the raw `esp-idf-sys`
//! calls in `hw_init`.

// ---------------------------------------------------------------------------
// Accelerometer (MPU6050, I2C0)
// ---------------------------------------------------------------------------

pub const IMU_SDA_GPIO: i32 = 8;
pub const IMU_SCL_GPIO: i32 = 9;
/// 400 kHz fast-mode: a 6-byte burst takes ~200 µs.
pub const IMU_I2C_BAUD_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Status display (SSD1306 128×64 OLED, I2C1)
// ---------------------------------------------------------------------------

pub const OLED_SDA_GPIO: i32 = 5;
pub const OLED_SCL_GPIO: i32 = 6;
pub const OLED_I2C_BAUD_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Alarm outputs
// ---------------------------------------------------------------------------

/// Red alarm LED (active HIGH).
pub const ALARM_LED_GPIO: i32 = 2;
/// Passive piezo buzzer, driven by LEDC square wave.
pub const BUZZER_GPIO: i32 = 4;
/// Initial LEDC frequency; retuned per siren phase.
pub const BUZZER_BASE_FREQ_HZ: u32 = 2_000;

// ---------------------------------------------------------------------------
// User button (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Alarm-cancel push-button (the devkit BOOT button).
pub const BUTTON_GPIO: i32 = 0;
