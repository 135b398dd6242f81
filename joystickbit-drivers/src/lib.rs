//! Hardware driver for the joystick:bit accessory
//!
//! Binds the board-agnostic logic in `joystickbit-core` to `embedded-hal`
//! pins:
//!
//! - Button reads through the per-pin debouncer
//! - Press/release events and handler dispatch
//! - Output line initialisation

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod joystick;

pub use error::JoystickError;
pub use joystick::{JoystickBit, PollEvents};
