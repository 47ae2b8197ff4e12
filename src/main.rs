//! FallGuard Firmware: main entry point
//!
//! Hexagonal architecture around a single cooperative loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          OledDisplay     LogEventSink         │
//! │  (Sensor+Button+Alarm)    (Display)       (EventSink)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FallClassifier · ButtonDebouncer · SirenPattern       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  MonotonicClock (read once per iteration) · Watchdog           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop never sleeps: sampling runs as fast as the I2C bus allows and
//! every slower concern is gated on elapsed time inside the service.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::gpio::{PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::FromValueType;
use log::{error, info, warn};

use fallguard::adapters::{HardwareAdapter, LogEventSink, MonotonicClock, OledDisplay};
use fallguard::app::service::AppService;
use fallguard::config::SystemConfig;
use fallguard::drivers::button::ActiveLowButton;
use fallguard::drivers::oled::Ssd1306;
use fallguard::drivers::siren::SirenDriver;
use fallguard::drivers::{hw_init, watchdog::Watchdog};
use fallguard::error::Error;
use fallguard::pins;
use fallguard::sensors::Mpu6050;

// `Peripherals` hands pins out by field name; moving a wire in `pins`
// without updating the fields claimed in `main` fails the build.
const _: () = {
    assert!(pins::IMU_SDA_GPIO == 8 && pins::IMU_SCL_GPIO == 9);
    assert!(pins::OLED_SDA_GPIO == 5 && pins::OLED_SCL_GPIO == 6);
    assert!(pins::BUTTON_GPIO == 0);
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FallGuard v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::load();

    // ── 3. Raw peripherals (LED GPIO, buzzer LEDC) ────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the siren the device cannot alarm: log and halt.
        error!("{}, halting", Error::from(e));
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Buses and pins ─────────────────────────────────────
    let p = Peripherals::take()?;
    let imu_bus = I2cDriver::new(
        p.i2c0,
        p.pins.gpio8,
        p.pins.gpio9,
        &I2cConfig::new().baudrate(pins::IMU_I2C_BAUD_HZ.Hz()),
    )?;
    let oled_bus = I2cDriver::new(
        p.i2c1,
        p.pins.gpio5,
        p.pins.gpio6,
        &I2cConfig::new().baudrate(pins::OLED_I2C_BAUD_HZ.Hz()),
    )?;
    let mut button_pin = PinDriver::input(p.pins.gpio0)?;
    button_pin.set_pull(Pull::Up)?;

    // ── 5. Devices ────────────────────────────────────────────
    let mut imu = Mpu6050::new(imu_bus);
    if let Err(e) = imu.init() {
        // Reads will fail and surface as dropout events.
        warn!("MPU6050 init failed, {}", Error::from(e));
    }
    let mut oled = Ssd1306::new(oled_bus);
    if let Err(e) = oled.init() {
        warn!("SSD1306 init failed, {}", Error::from(e));
    }

    // ── 6. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        imu,
        ActiveLowButton::new(button_pin),
        SirenDriver::new(pins::ALARM_LED_GPIO),
    );
    let mut display = OledDisplay::new(oled);
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 7. App service ────────────────────────────────────────
    let mut app = AppService::new(config);
    app.start(&mut log_sink);

    let mut watchdog = Watchdog::new();
    info!("System ready. Entering control loop.");

    // ── 8. Control loop ───────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();
        app.tick(now_ms, &mut hw, &mut display, &mut log_sink);
        watchdog.feed();
    }
}
