//! Application core: pure domain logic, zero I/O.
//!
//! Ties the fall classifier, button debouncer, siren pattern and refresh
//! gates into one per-iteration `tick`.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
