//! Driver errors

use joystickbit_core::HandlerTableFull;

/// Errors returned by the joystick:bit driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickError<E> {
    /// Reading or driving a pin failed
    Pin(E),
    /// No handler subscription slot left
    HandlerTableFull,
}

impl<E> From<HandlerTableFull> for JoystickError<E> {
    fn from(_: HandlerTableFull) -> Self {
        JoystickError::HandlerTableFull
    }
}
