//! Peripheral drivers, display layout, and hardware initialisation.

pub mod button;
pub mod display;
pub mod hw_init;
pub mod oled;
pub mod siren;
pub mod watchdog;
