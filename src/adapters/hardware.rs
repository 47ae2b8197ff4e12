//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the accelerometer, the cancel button and the siren driver,
//! exposing them through [`SensorPort`], [`ButtonPort`] and [`AlarmPort`].
//! The bus and pin types are generic so the same adapter runs against
//! `esp-idf-hal` drivers on target and `embedded-hal` fakes on the host.

use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::app::ports::{AlarmPort, ButtonPort, SensorPort};
use crate::drivers::button::ActiveLowButton;
use crate::drivers::siren::{SirenDriver, SirenOutput};
use crate::error::SensorError;
use crate::sensors::Mpu6050;

/// Concrete adapter that combines the board behind port traits.
pub struct HardwareAdapter<I2C, P> {
    imu: Mpu6050<I2C>,
    button: ActiveLowButton<P>,
    siren: SirenDriver,
}

impl<I2C: I2c, P: InputPin> HardwareAdapter<I2C, P> {
    pub fn new(imu: Mpu6050<I2C>, button: ActiveLowButton<P>, siren: SirenDriver) -> Self {
        Self { imu, button, siren }
    }

    pub fn siren(&self) -> &SirenDriver {
        &self.siren
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I2C: I2c, P: InputPin> SensorPort for HardwareAdapter<I2C, P> {
    fn read_squared_magnitude(&mut self) -> Result<f32, SensorError> {
        self.imu.try_read_squared_magnitude()
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<I2C: I2c, P: InputPin> ButtonPort for HardwareAdapter<I2C, P> {
    fn is_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

// ── AlarmPort implementation ──────────────────────────────────

impl<I2C: I2c, P: InputPin> AlarmPort for HardwareAdapter<I2C, P> {
    fn apply(&mut self, output: SirenOutput) {
        self.siren.apply(output);
    }
}
