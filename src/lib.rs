//! Cactus Farm library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the console entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can import game types, systems, and resources without a terminal.

pub mod shared;
pub mod data;
pub mod economy;
pub mod inventory;
pub mod farming;
pub mod placement;
pub mod ui;
