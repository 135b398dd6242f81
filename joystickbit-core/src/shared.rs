//! Debouncer shared between execution contexts
//!
//! Button reads can come from several tasks or from interrupt handlers.
//! [`SharedDebouncer`] wraps a [`Debouncer`] in an embassy blocking mutex so
//! it can live in a `static`:
//!
//! ```ignore
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//!
//! static BUTTONS: SharedDebouncer<CriticalSectionRawMutex, JoystickBitPin> =
//!     SharedDebouncer::new();
//!
//! let pressed = BUTTONS.read_stable(JoystickBitPin::C, pin.is_low(), now_ms);
//! ```

use core::cell::RefCell;
use core::hash::Hash;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::debounce::{
    DebouncePhase, Debouncer, PinDebounceState, DEBOUNCE_WINDOW_MS, DEFAULT_MAX_PINS,
};

/// Mutex-protected debouncer
pub struct SharedDebouncer<M: RawMutex, K, const N: usize = DEFAULT_MAX_PINS> {
    inner: Mutex<M, RefCell<Debouncer<K, N>>>,
}

impl<M: RawMutex, K, const N: usize> SharedDebouncer<M, K, N> {
    /// Create a shared debouncer with the default 50 ms window
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_MS)
    }

    /// Create a shared debouncer with a custom settle window
    pub const fn with_window(window_ms: u32) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Debouncer::with_window(window_ms))),
        }
    }
}

impl<M: RawMutex, K: Hash + Eq + Copy, const N: usize> SharedDebouncer<M, K, N> {
    /// Debounce one raw reading; see [`Debouncer::read_stable`]
    pub fn read_stable(&self, pin: K, raw_level: bool, now_ms: u32) -> bool {
        self.inner
            .lock(|debouncer| debouncer.borrow_mut().read_stable(pin, raw_level, now_ms))
    }

    /// Debounce phase of `pin` at `now_ms`
    pub fn phase(&self, pin: &K, now_ms: u32) -> Option<DebouncePhase> {
        self.inner
            .lock(|debouncer| debouncer.borrow().phase(pin, now_ms))
    }

    /// Snapshot of the debounce state of `pin`
    pub fn state(&self, pin: &K) -> Option<PinDebounceState> {
        self.inner
            .lock(|debouncer| debouncer.borrow().state(pin).copied())
    }
}
