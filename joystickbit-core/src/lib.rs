//! Board-agnostic core logic for the joystick:bit driver
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Per-pin button debouncing
//! - Button pin and event definitions
//! - Edge detection and handler subscription
//! - A mutex-protected debouncer for shared state
//! - Configuration types and the clock trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod debounce;
pub mod events;
pub mod pins;
pub mod shared;
pub mod traits;

pub use config::JoystickConfig;
pub use debounce::{DebouncePhase, Debouncer, PinDebounceState, DEBOUNCE_WINDOW_MS};
pub use events::{EdgeDetector, HandlerTable, HandlerTableFull};
pub use pins::{ButtonEvent, JoystickBitPin};
pub use shared::SharedDebouncer;
pub use traits::MonotonicClock;
