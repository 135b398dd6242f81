//! Per-pin button debouncing
//!
//! A last-change-timestamp debouncer: every raw level flip restarts a settle
//! timer, and a pin only reports its new level once the most recent flip is
//! strictly older than the settle window. This is not a stability counter -
//! a single noisy sample is enough to re-arm the timer.
//!
//! ```text
//!              flip                    now - last_change_at > window
//!  Settled ──────────────▶ Unsettled ─────────────────────────────────▶ Settled
//!     ▲                      │    ▲
//!     │                      └────┘ flip (timer restarts)
//!  first read
//! ```

use core::hash::Hash;

use heapless::FnvIndexMap;

/// Settle window in milliseconds
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Default number of pins a debouncer can track
pub const DEFAULT_MAX_PINS: usize = 8;

/// Debounce phase of a single pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePhase {
    /// The reported level matches the raw level and no flip is pending
    Settled,
    /// A flip was seen within the settle window
    Unsettled,
}

/// Debounce state of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDebounceState {
    last_raw_level: bool,
    last_change_at: u32,
    stable_level: bool,
    unsettled: bool,
}

impl PinDebounceState {
    /// State for a pin observed for the first time
    fn first_observation(raw_level: bool, now_ms: u32) -> Self {
        Self {
            last_raw_level: raw_level,
            last_change_at: now_ms,
            stable_level: raw_level,
            unsettled: false,
        }
    }

    /// Feed one raw sample and return the debounced level
    fn observe(&mut self, raw_level: bool, now_ms: u32, window_ms: u32) -> bool {
        if raw_level != self.last_raw_level {
            self.last_change_at = now_ms;
            self.last_raw_level = raw_level;
            self.unsettled = true;
        }

        if now_ms.wrapping_sub(self.last_change_at) > window_ms {
            self.stable_level = raw_level;
            self.unsettled = false;
        }

        self.stable_level
    }

    /// Most recent unfiltered reading
    pub fn last_raw_level(&self) -> bool {
        self.last_raw_level
    }

    /// Timestamp (ms) of the last raw level change
    pub fn last_change_at(&self) -> u32 {
        self.last_change_at
    }

    /// Level reported by the most recent read of this pin
    ///
    /// Only reads update it. Between reads it can lag behind [`phase`],
    /// which already reports `Settled` once a pending flip has aged past
    /// the window; the new level shows up here on the next read.
    ///
    /// [`phase`]: PinDebounceState::phase
    pub fn stable_level(&self) -> bool {
        self.stable_level
    }

    /// Phase at time `now_ms`
    ///
    /// A pending flip whose window has already elapsed counts as settled,
    /// since the next read will report it.
    pub fn phase(&self, now_ms: u32, window_ms: u32) -> DebouncePhase {
        if self.unsettled && now_ms.wrapping_sub(self.last_change_at) <= window_ms {
            DebouncePhase::Unsettled
        } else {
            DebouncePhase::Settled
        }
    }
}

/// Debouncer for a set of input lines keyed by pin identifier
///
/// State for a pin is created on its first read and kept for the lifetime
/// of the debouncer. `N` bounds the number of distinct pins and must be a
/// power of two.
///
/// `N` must be at least the number of pin identifiers that will ever be
/// read. Once the table is full, further pins get no state and their
/// readings are returned undebounced.
pub struct Debouncer<K, const N: usize = DEFAULT_MAX_PINS> {
    window_ms: u32,
    pins: FnvIndexMap<K, PinDebounceState, N>,
}

impl<K, const N: usize> Debouncer<K, N> {
    /// Create a debouncer with the default 50 ms window
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_MS)
    }

    /// Create a debouncer with a custom settle window
    pub const fn with_window(window_ms: u32) -> Self {
        Self {
            window_ms,
            pins: FnvIndexMap::new(),
        }
    }

    /// Settle window in milliseconds
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

impl<K, const N: usize> Default for Debouncer<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Copy, const N: usize> Debouncer<K, N> {
    /// Debounce one raw reading of `pin` taken at `now_ms`
    ///
    /// The first reading of a pin is returned as-is. After that, a level
    /// change is only reported once more than the window has passed since
    /// the last raw flip; until then the level from before the flip is
    /// returned.
    ///
    /// `now_ms` must not go backwards for a given pin. If the state table is
    /// full, unknown pins are passed through undebounced.
    pub fn read_stable(&mut self, pin: K, raw_level: bool, now_ms: u32) -> bool {
        let window_ms = self.window_ms;

        if let Some(state) = self.pins.get_mut(&pin) {
            return state.observe(raw_level, now_ms, window_ms);
        }

        let state = PinDebounceState::first_observation(raw_level, now_ms);
        if self.pins.insert(pin, state).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("debounce table full ({} pins), reading passed through", N);
        }

        raw_level
    }

    /// Number of pins with debounce state
    pub fn tracked_pins(&self) -> usize {
        self.pins.len()
    }

    /// Debounce state of `pin`, if it has been read
    pub fn state(&self, pin: &K) -> Option<&PinDebounceState> {
        self.pins.get(pin)
    }

    /// Debounce phase of `pin` at `now_ms`, if it has been read
    pub fn phase(&self, pin: &K, now_ms: u32) -> Option<DebouncePhase> {
        self.pins
            .get(pin)
            .map(|state| state.phase(now_ms, self.window_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIN: u8 = 12;

    /// Debouncer settled at `level` from time 0
    fn settled_at(level: bool) -> Debouncer<u8> {
        let mut debouncer = Debouncer::new();
        debouncer.read_stable(PIN, level, 0);
        debouncer
    }

    #[test]
    fn test_first_read_is_immediate() {
        let mut debouncer: Debouncer<u8> = Debouncer::new();
        assert!(debouncer.read_stable(PIN, true, 1234));
        assert_eq!(debouncer.phase(&PIN, 1234), Some(DebouncePhase::Settled));

        let mut debouncer: Debouncer<u8> = Debouncer::new();
        assert!(!debouncer.read_stable(PIN, false, 0));
    }

    #[test]
    fn test_constant_level_always_reported() {
        let mut debouncer = settled_at(true);
        for now in (1..500).step_by(7) {
            assert!(debouncer.read_stable(PIN, true, now));
        }
    }

    #[test]
    fn test_flip_is_suppressed_within_window() {
        let mut debouncer = settled_at(false);

        assert!(!debouncer.read_stable(PIN, true, 1));
        assert_eq!(debouncer.phase(&PIN, 1), Some(DebouncePhase::Unsettled));
        assert!(!debouncer.read_stable(PIN, true, 30));
        assert!(debouncer.read_stable(PIN, true, 52));
        assert_eq!(debouncer.phase(&PIN, 52), Some(DebouncePhase::Settled));
    }

    #[test]
    fn test_window_boundary_is_strict() {
        let mut debouncer = settled_at(false);

        // Transition recorded at T = 10
        assert!(!debouncer.read_stable(PIN, true, 10));
        assert!(!debouncer.read_stable(PIN, true, 60));
        assert!(debouncer.read_stable(PIN, true, 61));
    }

    #[test]
    fn test_glitch_restarts_timer() {
        let mut debouncer = settled_at(false);

        assert!(!debouncer.read_stable(PIN, true, 100));
        assert!(!debouncer.read_stable(PIN, false, 110));
        assert_eq!(debouncer.state(&PIN).unwrap().last_change_at(), 110);
        assert_eq!(debouncer.phase(&PIN, 160), Some(DebouncePhase::Unsettled));
        assert_eq!(debouncer.phase(&PIN, 161), Some(DebouncePhase::Settled));

        assert!(!debouncer.read_stable(PIN, false, 161));
        assert_eq!(debouncer.phase(&PIN, 161), Some(DebouncePhase::Settled));
    }

    #[test]
    fn test_release_is_debounced_too() {
        let mut debouncer = settled_at(true);

        assert!(debouncer.read_stable(PIN, false, 200));
        assert!(debouncer.read_stable(PIN, false, 250));
        assert!(!debouncer.read_stable(PIN, false, 251));
    }

    #[test]
    fn test_pins_are_independent() {
        let mut debouncer: Debouncer<u8> = Debouncer::new();
        debouncer.read_stable(12, false, 0);
        debouncer.read_stable(13, true, 0);

        assert!(!debouncer.read_stable(12, true, 5));
        assert!(debouncer.read_stable(13, true, 5));
        assert_eq!(debouncer.tracked_pins(), 2);
    }

    #[test]
    fn test_custom_window() {
        let mut debouncer: Debouncer<u8> = Debouncer::with_window(10);
        assert_eq!(debouncer.window_ms(), 10);

        debouncer.read_stable(PIN, false, 0);
        assert!(!debouncer.read_stable(PIN, true, 5));
        assert!(!debouncer.read_stable(PIN, true, 15));
        assert!(debouncer.read_stable(PIN, true, 16));
    }

    #[test]
    fn test_full_table_passes_through() {
        let mut debouncer: Debouncer<u8, 2> = Debouncer::new();
        debouncer.read_stable(1, false, 0);
        debouncer.read_stable(2, false, 0);

        assert!(debouncer.read_stable(3, true, 1));
        assert!(!debouncer.read_stable(3, false, 2));
        assert_eq!(debouncer.tracked_pins(), 2);
        assert!(debouncer.state(&3).is_none());
    }

    #[test]
    fn test_debounces_across_clock_wrap() {
        let mut debouncer: Debouncer<u8> = Debouncer::new();
        debouncer.read_stable(PIN, false, u32::MAX - 20);

        assert!(!debouncer.read_stable(PIN, true, u32::MAX - 10));
        assert!(!debouncer.read_stable(PIN, true, 39));
        assert_eq!(debouncer.phase(&PIN, 39), Some(DebouncePhase::Unsettled));
        assert!(debouncer.read_stable(PIN, true, 40));
        assert_eq!(debouncer.state(&PIN).unwrap().last_change_at(), u32::MAX - 10);
    }

    #[test]
    fn test_stable_level_updates_on_next_read() {
        let mut debouncer = settled_at(false);
        debouncer.read_stable(PIN, true, 10);

        // Window elapsed but no read yet
        let state = *debouncer.state(&PIN).unwrap();
        assert_eq!(state.phase(61, DEBOUNCE_WINDOW_MS), DebouncePhase::Settled);
        assert!(!state.stable_level());

        assert!(debouncer.read_stable(PIN, true, 61));
        assert!(debouncer.state(&PIN).unwrap().stable_level());
    }

    #[test]
    fn test_unknown_pin_has_no_phase() {
        let debouncer: Debouncer<u8> = Debouncer::new();
        assert_eq!(debouncer.phase(&PIN, 0), None);
    }
}
