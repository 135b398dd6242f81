//! Driver configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::debounce::DEBOUNCE_WINDOW_MS;

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JoystickConfig {
    /// Settle window for button debouncing (ms)
    pub debounce_window_ms: u32,
    /// Buttons read low when pressed (pull-up wiring)
    pub active_low: bool,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            active_low: true,
        }
    }
}

impl JoystickConfig {
    /// Map an electrical pin level to the logical "pressed" level
    pub fn is_pressed(&self, pin_high: bool) -> bool {
        pin_high != self.active_low
    }
}
