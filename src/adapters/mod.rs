//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                     |
//! |-------------|--------------|---------------------------------|
//! | `hardware`  | SensorPort   | MPU6050 over I2C                |
//! |             | ButtonPort   | Active-low GPIO                 |
//! |             | AlarmPort    | LED GPIO + LEDC buzzer          |
//! | `display`   | DisplayPort  | SSD1306 OLED over I2C           |
//! | `log_sink`  | EventSink    | Serial log output               |
//! | `time`      | (clock)      | ESP32 high-resolution timer     |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;

pub use display::OledDisplay;
pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
pub use time::MonotonicClock;
