//! FallGuard firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod scheduler;

// Hardware-facing modules compile on the host too; their ESP-IDF calls
// are swapped for no-op stubs by cfg attributes inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;
