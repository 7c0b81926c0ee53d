// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian-day views of a [`Moment`].
//!
//! A Julian Date is a continuous day count whose meaning depends on the
//! time scale it is read on. The offsets from UTC are:
//!
//! | Scale | JD offset from UTC |
//! |-------|--------------------|
//! | [`TimeScale::Posix`], [`TimeScale::Utc`] | 0 |
//! | [`TimeScale::Tai`] | TAI − UTC |
//! | [`TimeScale::Tt`] | TAI − UTC + 32.184 s |
//! | [`TimeScale::Gps`] | TAI − UTC − 19 s |

use crate::error::TimeError;
use crate::moment::Moment;
use crate::scale::{LeapSeconds, TimeScale, MJD_EPOCH_JD, TT_MINUS_TAI_NANOS, UNIX_EPOCH_JD};
use qtty::*;

/// TAI − GPS in seconds.
const TAI_MINUS_GPS: f64 = 19.0;

impl Moment {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT (JD 2 451 545.0).
    pub const J2000_JD: Days = Days::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Seconds to add to UTC to read this moment on `scale`.
    fn scale_offset(scale: TimeScale, posix: i64, leaps: &LeapSeconds) -> Seconds {
        let tai_minus_utc = leaps.tai_minus_utc(posix) as f64;
        let tt_minus_tai = TT_MINUS_TAI_NANOS as f64 / 1e9;
        Seconds::new(match scale {
            TimeScale::Posix | TimeScale::Utc => 0.0,
            TimeScale::Tai => tai_minus_utc,
            TimeScale::Tt => tai_minus_utc + tt_minus_tai,
            TimeScale::Gps => tai_minus_utc - TAI_MINUS_GPS,
        })
    }

    /// Julian Date of this moment on `scale`.
    pub fn julian_day(&self, scale: TimeScale, leaps: &LeapSeconds) -> Days {
        let seconds = Seconds::new(self.posix_seconds() as f64)
            + Seconds::new(self.nanosecond() as f64 / 1e9)
            + Self::scale_offset(scale, self.posix_seconds(), leaps);
        Days::new(UNIX_EPOCH_JD) + seconds.to::<Day>()
    }

    /// Modified Julian Date (`JD − 2 400 000.5`) on `scale`.
    pub fn modified_julian_date(&self, scale: TimeScale, leaps: &LeapSeconds) -> Days {
        self.julian_day(scale, leaps) - Days::new(MJD_EPOCH_JD)
    }

    /// Julian centuries of TT since J2000.0.
    pub fn julian_centuries(&self, leaps: &LeapSeconds) -> Centuries {
        let elapsed = self.julian_day(TimeScale::Tt, leaps) - Self::J2000_JD;
        Centuries::new(elapsed.value() / Self::JULIAN_CENTURY.value())
    }

    /// Inverse of [`Moment::julian_day`], precise to about a microsecond for
    /// present-day dates.
    pub fn from_julian_day(jd: Days, scale: TimeScale, leaps: &LeapSeconds) -> Result<Moment, TimeError> {
        if !jd.value().is_finite() {
            return Err(TimeError::InvalidArgument(format!("invalid Julian Date: {}", jd.value())));
        }
        let on_scale = (jd - Days::new(UNIX_EPOCH_JD)).to::<Second>();

        // The offset depends on the instant itself; two passes settle it.
        let mut posix = on_scale;
        for _ in 0..2 {
            let estimate = posix.value().floor();
            if estimate.abs() > i64::MAX as f64 {
                return Err(TimeError::InvalidArgument(format!("Julian Date out of range: {}", jd.value())));
            }
            posix = on_scale - Self::scale_offset(scale, estimate as i64, leaps);
        }

        let value = posix.value();
        let seconds = value.floor();
        let nanos = (((value - seconds) * 1e9).round() as u32).min(999_999_999);
        if seconds.abs() > i64::MAX as f64 {
            return Err(TimeError::InvalidArgument(format!("Julian Date out of range: {}", jd.value())));
        }
        Moment::of_posix(seconds as i64, nanos)
    }

    /// Inverse of [`Moment::modified_julian_date`].
    pub fn from_modified_julian_date(mjd: Days, scale: TimeScale, leaps: &LeapSeconds) -> Result<Moment, TimeError> {
        Self::from_julian_day(mjd + Days::new(MJD_EPOCH_JD), scale, leaps)
    }
}
