//! Timeout helpers.
//!
//! The PCD watchdog timer counts in units derived from the 13.56 MHz
//! carrier: `f_timer = 13.56 MHz / (2 * TPrescaler + 1)`. Transceive
//! timeouts are configured as a [`Duration`] and converted to reload
//! ticks here.

use std::time::Duration;

/// PCD reference clock in Hz.
pub const PCD_CLOCK_HZ: f64 = 13_560_000.0;

/// Default transceive timeout: 256 ticks of the ~302 us default timer.
pub const DEFAULT_TRANSCEIVE_TIMEOUT: Duration = Duration::from_micros(77_300);

/// Settle time after a soft reset or power-up, not tunable.
pub const RESET_SETTLE_TIME: Duration = Duration::from_millis(50);

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Duration of one timer tick for the given 12-bit prescaler.
pub fn timer_tick(prescaler: u16) -> Duration {
    let divider = 2.0 * f64::from(prescaler & 0x0FFF) + 1.0;
    Duration::from_secs_f64(divider / PCD_CLOCK_HZ)
}

/// Convert a timeout to timer reload ticks, rounding to the nearest tick
/// and saturating at the 16-bit reload register width.
pub fn timeout_to_ticks(timeout: Duration, prescaler: u16) -> u16 {
    let ticks = (timeout.as_secs_f64() / timer_tick(prescaler).as_secs_f64()).round();
    if ticks >= f64::from(u16::MAX) {
        u16::MAX
    } else {
        ticks as u16
    }
}
