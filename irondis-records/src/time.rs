//! Simulation time records.

use irondis_core::WireRecord;

/// Simulation time: whole hours since the epoch plus time past the hour.
///
/// `time_past_hour` is in units of 3600 s / 2^31 (about 1.676 µs).
#[derive(Debug, Clone, Copy, Default, WireRecord)]
pub struct ClockTime {
    /// Hours since 0000 hours, January 1, 1970 UTC.
    pub hour: i32,
    /// Time past the hour.
    pub time_past_hour: u32,
}
