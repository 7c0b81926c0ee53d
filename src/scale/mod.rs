// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time scales and the UTC leap-second engine.
//!
//! | Scale | Epoch | Counts leap seconds |
//! |-------|-------|---------------------|
//! | [`TimeScale::Posix`] | 1970-01-01T00:00Z | no |
//! | [`TimeScale::Utc`] | 1972-01-01T00:00Z | yes |
//! | [`TimeScale::Tai`] | 1958-01-01T00:00 TAI | yes (UTC + 10 s at 1972) |
//! | [`TimeScale::Gps`] | 1980-01-06T00:00Z | yes (TAI − 19 s) |
//! | [`TimeScale::Tt`] | as TAI | TAI + 32.184 s |
//!
//! Every conversion that needs leap-second accounting takes a
//! [`LeapSeconds`] handle. The process-wide default is
//! [`LeapSeconds::shared`]; tests and embedders build their own with
//! [`LeapSeconds::builder`].

mod config;
mod leap_seconds;
mod provider;

pub use config::{LeapSecondConfig, ENV_DATA_FILE, ENV_FINAL, ENV_SUPPRESSED};
pub use leap_seconds::{LeapSecondEvent, LeapSeconds, LeapSecondsBuilder};
pub use provider::{LeapSecondProvider, ProviderRegistry, TableProvider};

use std::fmt;

/// Seconds from 1970-01-01 (POSIX epoch) to 1972-01-01 (UTC-scale epoch).
pub(crate) const UTC_EPOCH_POSIX: i64 = 2 * 365 * 86_400;

/// TAI − UTC at the UTC-scale epoch, and the value assumed before it.
pub(crate) const TAI_MINUS_UTC_AT_EPOCH: i64 = 10;

/// Seconds from 1958-01-01 TAI to 1972-01-01 UTC on the TAI axis.
pub(crate) const UTC_TO_TAI_OFFSET: i64 = 441_763_210;

/// Seconds from 1972-01-01 UTC to 1980-01-06 UTC, leap seconds included.
pub(crate) const UTC_TO_GPS_OFFSET: i64 = 252_892_809;

/// TT − TAI in nanoseconds (32.184 s).
pub(crate) const TT_MINUS_TAI_NANOS: i64 = 32_184_000_000;

/// Julian Date of the POSIX epoch.
pub(crate) const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Offset between Julian Date and Modified Julian Date.
pub(crate) const MJD_EPOCH_JD: f64 = 2_400_000.5;

/// A time scale on which a [`crate::Moment`] can report elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    /// Seconds since 1970-01-01 without leap seconds.
    Posix,
    /// SI seconds since 1972-01-01 including leap seconds.
    Utc,
    /// International Atomic Time since 1958-01-01.
    Tai,
    /// GPS time since 1980-01-06.
    Gps,
    /// Terrestrial Time, TAI + 32.184 s.
    Tt,
}

impl TimeScale {
    /// Short label of the scale.
    pub const fn label(self) -> &'static str {
        match self {
            TimeScale::Posix => "POSIX",
            TimeScale::Utc => "UTC",
            TimeScale::Tai => "TAI",
            TimeScale::Gps => "GPS",
            TimeScale::Tt => "TT",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_offsets() {
        // 1972-01-01 is MJD 41317, 1970-01-01 is MJD 40587.
        assert_eq!(UTC_EPOCH_POSIX, (41_317 - 40_587) * 86_400);
        // 1958-01-01 (MJD 36204) to 1972-01-01 plus the initial 10 s.
        assert_eq!(UTC_TO_TAI_OFFSET, (41_317 - 36_204) * 86_400 + 10);
        // 1972-01-01 to 1980-01-06 (MJD 44244) plus nine leap seconds.
        assert_eq!(UTC_TO_GPS_OFFSET, (44_244 - 41_317) * 86_400 + 9);
    }

    #[test]
    fn labels() {
        assert_eq!(TimeScale::Tt.to_string(), "TT");
        assert_eq!(TimeScale::Posix.label(), "POSIX");
    }
}
