//! Monotonic time and settle delays
//!
//! Link-speed changes require fixed settle delays before the hardware is
//! usable again, and the session timestamps good packets to answer "how
//! old is this data". Both go through this trait so a test harness can
//! substitute a zero-delay clock.

/// Millisecond-resolution monotonic clock with a blocking delay.
pub trait Clock {
    /// Milliseconds since some fixed epoch (typically boot). Wraps on
    /// overflow; consumers compare timestamps with wrapping arithmetic.
    fn now_ms(&self) -> u32;

    /// Block the calling context for `ms` milliseconds.
    ///
    /// This is a genuine stall. The session only calls it around hardware
    /// reconfiguration, where further I/O is invalid until the settle
    /// time has passed.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
