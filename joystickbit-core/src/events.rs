//! Button event detection and subscription
//!
//! Turns debounced button levels into press/release events and fans them
//! out to registered handlers. Handlers are plain function pointers so the
//! table stays `no_std` and allocation free.

use heapless::Vec;

use crate::pins::{ButtonEvent, JoystickBitPin, BUTTON_COUNT};

/// Default number of handler subscriptions
pub const MAX_HANDLERS: usize = 8;

/// Event handler callback
pub type Handler = fn();

/// Edge detector over debounced button levels
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    last_level: [Option<bool>; BUTTON_COUNT],
}

impl EdgeDetector {
    /// Create a detector with no baseline for any button
    pub const fn new() -> Self {
        Self {
            last_level: [None; BUTTON_COUNT],
        }
    }

    /// Record the debounced `level` of `pin`
    ///
    /// Returns the event if the level differs from the previous one. The
    /// first level seen for a pin only sets the baseline.
    pub fn update(&mut self, pin: JoystickBitPin, level: bool) -> Option<ButtonEvent> {
        let previous = self.last_level[pin.index()].replace(level);
        match previous {
            Some(previous) if previous != level => Some(ButtonEvent::from_level(level)),
            _ => None,
        }
    }

    /// Last debounced level recorded for `pin`
    pub fn level(&self, pin: JoystickBitPin) -> Option<bool> {
        self.last_level[pin.index()]
    }
}

/// A handler subscribed to one event on one button
#[derive(Debug, Clone, Copy)]
pub struct Subscription {
    pub pin: JoystickBitPin,
    pub event: ButtonEvent,
    pub handler: Handler,
}

/// Error returned when no subscription slot is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandlerTableFull;

/// Fixed-capacity table of event handlers
#[derive(Debug, Clone, Default)]
pub struct HandlerTable<const N: usize = MAX_HANDLERS> {
    subscriptions: Vec<Subscription, N>,
}

impl<const N: usize> HandlerTable<N> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe `handler` to `event` on `pin`
    ///
    /// The same handler may be registered more than once; it then runs once
    /// per registration.
    pub fn register(
        &mut self,
        pin: JoystickBitPin,
        event: ButtonEvent,
        handler: Handler,
    ) -> Result<(), HandlerTableFull> {
        self.subscriptions
            .push(Subscription {
                pin,
                event,
                handler,
            })
            .map_err(|_| HandlerTableFull)
    }

    /// Run every handler subscribed to `event` on `pin`
    ///
    /// Handlers run in registration order. Returns how many ran.
    pub fn dispatch(&self, pin: JoystickBitPin, event: ButtonEvent) -> usize {
        let mut count = 0;
        for sub in self
            .subscriptions
            .iter()
            .filter(|sub| sub.pin == pin && sub.event == event)
        {
            (sub.handler)();
            count += 1;
        }
        count
    }

    /// Number of registered subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if no handler is registered
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Remove all subscriptions
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
