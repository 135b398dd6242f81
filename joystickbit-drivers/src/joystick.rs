//! joystick:bit button driver
//!
//! This driver provides:
//! - Line initialisation (buzzer off, vibration motor idle)
//! - Debounced button reads
//! - Press/release events with subscribed handlers
//! - A blocking wait for a button event
//!
//! # Usage
//!
//! The driver is polled: call `poll()` regularly (every few ms) from the
//! main loop or a timer task. Each pass samples the clock once and feeds all
//! four buttons through the debouncer.
//!
//! ```ignore
//! let mut joystick = JoystickBit::new(buttons, buzzer, motor, clock, JoystickConfig::default());
//! joystick.init()?;
//! joystick.on_button_event(JoystickBitPin::C, ButtonEvent::Pressed, on_fire)?;
//!
//! loop {
//!     joystick.poll()?;
//!     delay.delay_ms(5);
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

use joystickbit_core::pins::BUTTON_COUNT;
use joystickbit_core::{
    ButtonEvent, Debouncer, EdgeDetector, HandlerTable, JoystickBitPin, JoystickConfig,
    MonotonicClock,
};

use crate::error::JoystickError;

/// Events produced by one polling pass
pub type PollEvents = Vec<(JoystickBitPin, ButtonEvent), BUTTON_COUNT>;

/// joystick:bit driver
///
/// `B` is the button input pin type, ordered C, D, E, F in `buttons`. The
/// HAL is expected to have configured their pull-ups. `O` drives the buzzer
/// (P0) and vibration motor (P16) lines.
pub struct JoystickBit<B, O, C> {
    buttons: [B; BUTTON_COUNT],
    buzzer: O,
    motor: O,
    clock: C,
    config: JoystickConfig,
    debouncer: Debouncer<JoystickBitPin, BUTTON_COUNT>,
    edges: EdgeDetector,
    handlers: HandlerTable,
}

impl<B, O, C> JoystickBit<B, O, C>
where
    B: InputPin,
    O: OutputPin<Error = B::Error>,
    C: MonotonicClock,
{
    /// Create a new driver
    pub fn new(
        buttons: [B; BUTTON_COUNT],
        buzzer: O,
        motor: O,
        clock: C,
        config: JoystickConfig,
    ) -> Self {
        Self {
            buttons,
            buzzer,
            motor,
            clock,
            config,
            debouncer: Debouncer::with_window(config.debounce_window_ms),
            edges: EdgeDetector::new(),
            handlers: HandlerTable::new(),
        }
    }

    /// Put the output lines in their idle state
    ///
    /// The buzzer is driven low and the motor line high (the motor is
    /// active low).
    pub fn init(&mut self) -> Result<(), JoystickError<B::Error>> {
        self.buzzer.set_low().map_err(JoystickError::Pin)?;
        self.motor.set_high().map_err(JoystickError::Pin)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("joystick:bit initialised");

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &JoystickConfig {
        &self.config
    }

    /// Debounce state of the buttons
    pub fn debouncer(&self) -> &Debouncer<JoystickBitPin, BUTTON_COUNT> {
        &self.debouncer
    }

    /// Raw pressed level of a button, without debouncing
    fn read_raw(&mut self, pin: JoystickBitPin) -> Result<bool, JoystickError<B::Error>> {
        let high = self.buttons[pin.index()]
            .is_high()
            .map_err(JoystickError::Pin)?;
        Ok(self.config.is_pressed(high))
    }

    /// Check if a button is pressed (debounced)
    pub fn get_button(&mut self, pin: JoystickBitPin) -> Result<bool, JoystickError<B::Error>> {
        let raw = self.read_raw(pin)?;
        let now = self.clock.now_ms();
        Ok(self.debouncer.read_stable(pin, raw, now))
    }

    /// Subscribe `handler` to `event` on `pin`
    ///
    /// Handlers run from within [`poll`](Self::poll).
    pub fn on_button_event(
        &mut self,
        pin: JoystickBitPin,
        event: ButtonEvent,
        handler: fn(),
    ) -> Result<(), JoystickError<B::Error>> {
        self.handlers.register(pin, event, handler)?;
        Ok(())
    }

    /// Run one polling pass over all buttons
    ///
    /// Returns the press/release events detected in this pass, after their
    /// handlers have run. The first pass only records a baseline.
    pub fn poll(&mut self) -> Result<PollEvents, JoystickError<B::Error>> {
        // Read every button before touching debounce state, so a failed read
        // leaves the pass without side effects
        let mut raw = [false; BUTTON_COUNT];
        for pin in JoystickBitPin::ALL {
            raw[pin.index()] = self.read_raw(pin)?;
        }

        let now = self.clock.now_ms();
        let mut events = PollEvents::new();

        for pin in JoystickBitPin::ALL {
            let level = self.debouncer.read_stable(pin, raw[pin.index()], now);

            if let Some(event) = self.edges.update(pin, level) {
                #[cfg(feature = "defmt")]
                defmt::debug!("button {}: {}", pin.label(), event);

                self.handlers.dispatch(pin, event);
                // At most one event per button per pass
                let _ = events.push((pin, event));
            }
        }

        Ok(events)
    }

    /// Poll until `event` happens on `pin` or `timeout_ms` elapses
    ///
    /// Sleeps `poll_interval_ms` between passes. Events on other buttons are
    /// still dispatched to their handlers. Returns `Ok(true)` if the event
    /// was seen.
    pub fn wait_for_event<D: DelayNs>(
        &mut self,
        pin: JoystickBitPin,
        event: ButtonEvent,
        delay: &mut D,
        poll_interval_ms: u32,
        timeout_ms: u32,
    ) -> Result<bool, JoystickError<B::Error>> {
        let start = self.clock.now_ms();

        loop {
            let events = self.poll()?;
            if events.iter().any(|&(p, e)| p == pin && e == event) {
                return Ok(true);
            }

            if self.clock.now_ms().wrapping_sub(start) >= timeout_ms {
                return Ok(false);
            }

            delay.delay_ms(poll_interval_ms);
        }
    }

    /// Release the pins and clock
    pub fn release(self) -> ([B; BUTTON_COUNT], O, O, C) {
        (self.buttons, self.buzzer, self.motor, self.clock)
    }
}
