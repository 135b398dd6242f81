//! joystick:bit button pins and events

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of buttons on the board
pub const BUTTON_COUNT: usize = 4;

/// Button input line on the joystick:bit
///
/// The board labels its buttons C to F; they are wired to micro:bit edge
/// connector pins P12 to P15 and pulled up, so a pressed button reads low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoystickBitPin {
    /// Button C (P12)
    C,
    /// Button D (P13)
    D,
    /// Button E (P14)
    E,
    /// Button F (P15)
    F,
}

impl JoystickBitPin {
    /// All buttons in polling order
    pub const ALL: [JoystickBitPin; BUTTON_COUNT] = [
        JoystickBitPin::C,
        JoystickBitPin::D,
        JoystickBitPin::E,
        JoystickBitPin::F,
    ];

    /// Position in [`JoystickBitPin::ALL`]
    pub const fn index(self) -> usize {
        match self {
            JoystickBitPin::C => 0,
            JoystickBitPin::D => 1,
            JoystickBitPin::E => 2,
            JoystickBitPin::F => 3,
        }
    }

    /// micro:bit edge connector pin number
    pub const fn pin_number(self) -> u8 {
        match self {
            JoystickBitPin::C => 12,
            JoystickBitPin::D => 13,
            JoystickBitPin::E => 14,
            JoystickBitPin::F => 15,
        }
    }

    /// Look up a button by edge connector pin number
    pub fn from_pin_number(pin: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.pin_number() == pin)
    }

    /// Label printed on the board
    pub const fn label(self) -> &'static str {
        match self {
            JoystickBitPin::C => "C",
            JoystickBitPin::D => "D",
            JoystickBitPin::E => "E",
            JoystickBitPin::F => "F",
        }
    }
}

/// Button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonEvent {
    /// Debounced level went active
    Pressed,
    /// Debounced level went inactive
    Released,
}

impl ButtonEvent {
    /// Event for a debounced level change to `pressed`
    pub fn from_level(pressed: bool) -> Self {
        if pressed {
            ButtonEvent::Pressed
        } else {
            ButtonEvent::Released
        }
    }

    /// Debounced level after this event
    pub fn level(self) -> bool {
        matches!(self, ButtonEvent::Pressed)
    }
}
