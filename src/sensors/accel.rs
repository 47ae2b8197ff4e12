//! MPU6050 accelerometer, reduced to squared magnitude.
//!
//! Register-level driver over any `embedded-hal` 1.0 I2C bus.  Only the
//! accelerometer is used; the gyro stays at its power-on configuration.
//!
//! ## Scaling
//!
//! Full-scale range ±2 g → 16384 LSB/g.  The driver returns
//! `(x² + y² + z²)` in g² and never takes a square root: the classifier
//! compares against squared thresholds.
//!
//! ## Failure
//!
//! A failed or short burst read yields [`SensorError::BusReadFailed`] from
//! [`Mpu6050::try_read_squared_magnitude`]; the infallible
//! [`Mpu6050::read_squared_magnitude`] turns that into a 0.0 sample, which
//! the classifier sees as stillness.

use embedded_hal::i2c::I2c;
use log::info;

use crate::error::SensorError;

/// Default 7-bit address (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;

// MPU6050 register addresses
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of the 6-byte accel burst
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

/// ACCEL_CONFIG AFS_SEL=0: ±2 g.
const ACCEL_RANGE_2G: u8 = 0x00;
/// LSB per g at ±2 g.
pub const ACCEL_LSB_PER_G: f32 = 16_384.0;

pub struct Mpu6050<I2C> {
    bus: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self {
            bus,
            address: MPU6050_ADDR,
        }
    }

    /// Check identity, wake the device and select ±2 g.
    pub fn init(&mut self) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        self.bus
            .write_read(self.address, &[REG_WHO_AM_I], &mut id)
            .map_err(|_| SensorError::BusReadFailed)?;
        if id[0] != WHO_AM_I_EXPECTED {
            return Err(SensorError::WrongDevice(id[0]));
        }

        // Clear SLEEP, internal oscillator.
        self.bus
            .write(self.address, &[REG_PWR_MGMT_1, 0x00])
            .map_err(|_| SensorError::BusWriteFailed)?;
        self.bus
            .write(self.address, &[REG_ACCEL_CONFIG, ACCEL_RANGE_2G])
            .map_err(|_| SensorError::BusWriteFailed)?;

        info!("MPU6050 initialised (±2g, {} LSB/g)", ACCEL_LSB_PER_G);
        Ok(())
    }

    /// Burst-read X/Y/Z and return the squared magnitude in g².
    pub fn try_read_squared_magnitude(&mut self) -> Result<f32, SensorError> {
        let mut raw = [0u8; 6];
        self.bus
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut raw)
            .map_err(|_| SensorError::BusReadFailed)?;
        Ok(squared_magnitude_from_raw(&raw))
    }

    /// As [`try_read_squared_magnitude`](Self::try_read_squared_magnitude),
    /// with a failed read reported as a 0.0 sample.
    pub fn read_squared_magnitude(&mut self) -> f32 {
        self.try_read_squared_magnitude().unwrap_or(0.0)
    }

    pub fn release(self) -> I2C {
        self.bus
    }
}

/// Big-endian X/Y/Z counts to g².
fn squared_magnitude_from_raw(raw: &[u8; 6]) -> f32 {
    let axis = |hi: u8, lo: u8| f32::from(i16::from_be_bytes([hi, lo])) / ACCEL_LSB_PER_G;
    let x = axis(raw[0], raw[1]);
    let y = axis(raw[2], raw[3]);
    let z = axis(raw[4], raw[5]);
    x * x + y * y + z * z
}
