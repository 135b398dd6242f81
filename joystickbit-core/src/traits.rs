//! Hardware abstraction traits
//!
//! Digital pins and delays come from `embedded-hal`; the only thing it
//! lacks is a millisecond clock to timestamp readings against.

/// Monotonic millisecond clock
///
/// Successive calls must never go backwards. The epoch is arbitrary and the
/// counter may wrap at `u32::MAX`.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&mut self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &mut T {
    fn now_ms(&mut self) -> u32 {
        (**self).now_ms()
    }
}
