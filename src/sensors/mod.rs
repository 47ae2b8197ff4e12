//! Sensor subsystem.
//!
//! A single accelerometer feeds the decision engine.  Drivers are generic
//! over `embedded-hal` buses so they run unchanged against host fakes.

pub mod accel;

pub use accel::Mpu6050;
