// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute instants on the UTC time line and machine durations.
//!
//! A [`Moment`] stores POSIX seconds, a nanosecond fraction and a flag
//! marking an inserted leap second (23:59:60). [`MachineTime`] is an exact
//! duration counted either in POSIX seconds (every day 86 400 s) or in SI
//! seconds on the UTC scale.

use crate::date::PlainDate;
use crate::error::TimeError;
use crate::gregorian::{MAX_MJD, MIN_MJD, MJD_OF_UNIX_EPOCH};
use crate::scale::{
    LeapSeconds, TimeScale, TT_MINUS_TAI_NANOS, UTC_TO_GPS_OFFSET, UTC_TO_TAI_OFFSET,
};
use crate::timestamp::{
    utc_offset, write_clock, PlainTime, PlainTimestamp, NANOS_PER_SECOND, SECONDS_PER_DAY,
};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Units
// ═══════════════════════════════════════════════════════════════════════════

/// POSIX-based time units (a day always has 86 400 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> i128 {
        const S: i128 = NANOS_PER_SECOND as i128;
        match self {
            TimeUnit::Days => 86_400 * S,
            TimeUnit::Hours => 3_600 * S,
            TimeUnit::Minutes => 60 * S,
            TimeUnit::Seconds => S,
            TimeUnit::Millis => 1_000_000,
            TimeUnit::Micros => 1_000,
            TimeUnit::Nanos => 1,
        }
    }
}

/// SI units on the UTC scale, where leap seconds are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiUnit {
    Seconds,
    Nanos,
}

impl SiUnit {
    pub const fn nanos(self) -> i128 {
        match self {
            SiUnit::Seconds => NANOS_PER_SECOND as i128,
            SiUnit::Nanos => 1,
        }
    }
}

/// Scale on which a [`MachineTime`] counts seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineScale {
    Posix,
    Utc,
}

// ═══════════════════════════════════════════════════════════════════════════
// MachineTime
// ═══════════════════════════════════════════════════════════════════════════

/// Exact duration in seconds and nanoseconds on a [`MachineScale`].
///
/// The value is normalised so that `0 <= nanos < 1e9`; negative durations have
/// negative `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineTime {
    seconds: i64,
    nanos: u32,
    scale: MachineScale,
}

impl MachineTime {
    /// Zero duration on the POSIX scale.
    pub const ZERO: MachineTime = MachineTime {
        seconds: 0,
        nanos: 0,
        scale: MachineScale::Posix,
    };

    /// Creates a normalised duration; `nanos` may be any signed value.
    pub fn new(seconds: i64, nanos: i64, scale: MachineScale) -> Result<Self, TimeError> {
        Self::from_total_nanos(
            seconds as i128 * NANOS_PER_SECOND as i128 + nanos as i128,
            scale,
        )
    }

    /// POSIX duration of `amount` units.
    pub fn of(amount: i64, unit: TimeUnit) -> Result<Self, TimeError> {
        Self::from_total_nanos(amount as i128 * unit.nanos(), MachineScale::Posix)
    }

    /// UTC-scale duration of `amount` SI units.
    pub fn of_si(amount: i64, unit: SiUnit) -> Result<Self, TimeError> {
        Self::from_total_nanos(amount as i128 * unit.nanos(), MachineScale::Utc)
    }

    pub(crate) fn from_total_nanos(total: i128, scale: MachineScale) -> Result<Self, TimeError> {
        let seconds = total.div_euclid(NANOS_PER_SECOND as i128);
        let seconds = i64::try_from(seconds)
            .map_err(|_| TimeError::InvalidArgument(format!("duration overflow: {total} ns")))?;
        Ok(Self {
            seconds,
            nanos: total.rem_euclid(NANOS_PER_SECOND as i128) as u32,
            scale,
        })
    }

    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    #[inline]
    pub const fn scale(&self) -> MachineScale {
        self.scale
    }

    pub fn total_nanos(&self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    pub fn negate(&self) -> Result<Self, TimeError> {
        Self::from_total_nanos(-self.total_nanos(), self.scale)
    }

    pub fn abs(&self) -> Result<Self, TimeError> {
        if self.is_negative() {
            self.negate()
        } else {
            Ok(*self)
        }
    }

    /// Sum of two durations on the same scale.
    pub fn plus(&self, other: &MachineTime) -> Result<Self, TimeError> {
        if self.scale != other.scale {
            return Err(TimeError::InvalidArgument(format!(
                "cannot mix time scales: {:?} and {:?}",
                self.scale, other.scale
            )));
        }
        Self::from_total_nanos(self.total_nanos() + other.total_nanos(), self.scale)
    }

    pub fn minus(&self, other: &MachineTime) -> Result<Self, TimeError> {
        self.plus(&other.negate()?)
    }

    /// Scales the duration, rounding to the nearest nanosecond.
    pub fn multiplied_by(&self, factor: f64) -> Result<Self, TimeError> {
        if !factor.is_finite() {
            return Err(TimeError::InvalidArgument(format!("invalid factor: {factor}")));
        }
        let scaled = (self.total_nanos() as f64 * factor).round();
        if scaled.abs() >= i128::MAX as f64 {
            return Err(TimeError::InvalidArgument(format!("duration overflow: {scaled} ns")));
        }
        Self::from_total_nanos(scaled as i128, self.scale)
    }

    /// Duration in fractional seconds.
    pub fn to_seconds_f64(&self) -> f64 {
        self.seconds as f64 + self.nanos as f64 / NANOS_PER_SECOND as f64
    }
}

impl fmt::Display for MachineTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.scale {
            MachineScale::Posix => "POSIX",
            MachineScale::Utc => "UTC",
        };
        let total = self.total_nanos();
        let sign = if total < 0 { "-" } else { "" };
        let abs = total.unsigned_abs();
        let secs = abs / NANOS_PER_SECOND as u128;
        let nanos = abs % NANOS_PER_SECOND as u128;
        if nanos == 0 {
            write!(f, "{sign}{secs}s [{label}]")
        } else {
            write!(f, "{sign}{secs}.{nanos:09}s [{label}]")
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Moment
// ═══════════════════════════════════════════════════════════════════════════

/// Smallest supported POSIX second (start of `PlainDate::MIN`).
const MIN_POSIX: i64 = (MIN_MJD - MJD_OF_UNIX_EPOCH) * SECONDS_PER_DAY;

/// Largest supported POSIX second (last second of `PlainDate::MAX`).
const MAX_POSIX: i64 = (MAX_MJD - MJD_OF_UNIX_EPOCH + 1) * SECONDS_PER_DAY - 1;

/// An instant on the UTC time line.
///
/// Ordering is chronological; a leap second (23:59:60) sorts after every
/// fraction of 23:59:59.
///
/// # Examples
///
/// ```
/// use tempora::{LeapSeconds, Moment, TimeScale};
///
/// let leaps = LeapSeconds::builder().build();
/// let m = Moment::of_posix(1_483_228_799, 0).unwrap(); // 2016-12-31T23:59:59Z
/// let utc = m.elapsed_time(TimeScale::Utc, &leaps);
/// let leap = Moment::of_scale(utc + 1, 0, TimeScale::Utc, &leaps).unwrap();
/// assert!(leap.is_leap_second());
/// assert_eq!(leap.to_string(), "2016-12-31T23:59:60Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Moment {
    posix: i64,
    leap: bool,
    nano: u32,
}

impl Moment {
    /// 1970-01-01T00:00Z.
    pub const UNIX_EPOCH: Moment = Moment {
        posix: 0,
        leap: false,
        nano: 0,
    };

    pub const MIN: Moment = Moment {
        posix: MIN_POSIX,
        leap: false,
        nano: 0,
    };

    pub const MAX: Moment = Moment {
        posix: MAX_POSIX,
        leap: false,
        nano: 999_999_999,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Creates a moment from POSIX seconds and a nanosecond fraction.
    pub fn of_posix(seconds: i64, nanos: u32) -> Result<Self, TimeError> {
        if nanos as i64 >= NANOS_PER_SECOND {
            return Err(TimeError::InvalidArgument(format!(
                "nanosecond out of range: {nanos}"
            )));
        }
        if !(MIN_POSIX..=MAX_POSIX).contains(&seconds) {
            return Err(TimeError::InvalidArgument(format!(
                "POSIX seconds out of range: {seconds}"
            )));
        }
        Ok(Self {
            posix: seconds,
            leap: false,
            nano: nanos,
        })
    }

    /// Creates a moment from elapsed seconds on the given scale.
    ///
    /// On the UTC-based scales an elapsed value inside an inserted leap second
    /// yields a moment with [`Moment::is_leap_second`] set.
    pub fn of_scale(
        elapsed: i64,
        nanos: u32,
        scale: TimeScale,
        leaps: &LeapSeconds,
    ) -> Result<Self, TimeError> {
        if nanos as i64 >= NANOS_PER_SECOND {
            return Err(TimeError::InvalidArgument(format!(
                "nanosecond out of range: {nanos}"
            )));
        }
        let overflow = || TimeError::InvalidArgument(format!("elapsed time out of range: {elapsed}"));
        let (utc, nanos) = match scale {
            TimeScale::Posix => return Self::of_posix(elapsed, nanos),
            TimeScale::Utc => (elapsed, nanos),
            TimeScale::Tai => (elapsed.checked_sub(UTC_TO_TAI_OFFSET).ok_or_else(overflow)?, nanos),
            TimeScale::Gps => (elapsed.checked_add(UTC_TO_GPS_OFFSET).ok_or_else(overflow)?, nanos),
            TimeScale::Tt => {
                let total = elapsed as i128 * NANOS_PER_SECOND as i128 + nanos as i128
                    - TT_MINUS_TAI_NANOS as i128;
                let tai = i64::try_from(total.div_euclid(NANOS_PER_SECOND as i128)).map_err(|_| overflow())?;
                let frac = total.rem_euclid(NANOS_PER_SECOND as i128) as u32;
                (tai.checked_sub(UTC_TO_TAI_OFFSET).ok_or_else(overflow)?, frac)
            }
        };
        let posix = leaps.strip(utc);
        let mut moment = Self::of_posix(posix, nanos)?;
        moment.leap = leaps.is_positive_leap_second(utc);
        Ok(moment)
    }

    /// Current system time, without leap-second information.
    pub fn now() -> Self {
        Self::from_utc_datetime(Utc::now())
    }

    // ── fields ────────────────────────────────────────────────────────

    #[inline]
    pub const fn posix_seconds(&self) -> i64 {
        self.posix
    }

    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        self.nano
    }

    /// `true` for an instant inside an inserted leap second (23:59:60).
    #[inline]
    pub const fn is_leap_second(&self) -> bool {
        self.leap
    }

    /// Elapsed whole seconds on `scale`.
    pub fn elapsed_time(&self, scale: TimeScale, leaps: &LeapSeconds) -> i64 {
        match scale {
            TimeScale::Posix => self.posix,
            TimeScale::Utc => self.utc_seconds(leaps),
            TimeScale::Tai => self.utc_seconds(leaps) + UTC_TO_TAI_OFFSET,
            TimeScale::Gps => self.utc_seconds(leaps) - UTC_TO_GPS_OFFSET,
            TimeScale::Tt => {
                let tai = self.utc_seconds(leaps) + UTC_TO_TAI_OFFSET;
                let total = self.nano as i64 + TT_MINUS_TAI_NANOS;
                tai + total / NANOS_PER_SECOND
            }
        }
    }

    /// Nanosecond fraction on `scale`; only TT differs from the POSIX value.
    pub fn nanosecond_on(&self, scale: TimeScale) -> u32 {
        match scale {
            TimeScale::Tt => ((self.nano as i64 + TT_MINUS_TAI_NANOS) % NANOS_PER_SECOND) as u32,
            _ => self.nano,
        }
    }

    fn utc_seconds(&self, leaps: &LeapSeconds) -> i64 {
        leaps.enhance(self.posix) + i64::from(self.leap)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Adds a duration, counting on the duration's scale.
    pub fn plus(&self, duration: MachineTime, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        match duration.scale() {
            MachineScale::Posix => {
                let total = self.posix as i128 * NANOS_PER_SECOND as i128
                    + self.nano as i128
                    + duration.total_nanos();
                Self::of_posix_nanos(total)
            }
            MachineScale::Utc => {
                let total = self.utc_seconds(leaps) as i128 * NANOS_PER_SECOND as i128
                    + self.nano as i128
                    + duration.total_nanos();
                let seconds = i64::try_from(total.div_euclid(NANOS_PER_SECOND as i128))
                    .map_err(|_| TimeError::InvalidArgument("moment arithmetic overflow".into()))?;
                let nanos = total.rem_euclid(NANOS_PER_SECOND as i128) as u32;
                Self::of_scale(seconds, nanos, TimeScale::Utc, leaps)
            }
        }
    }

    pub fn minus(&self, duration: MachineTime, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        self.plus(duration.negate()?, leaps)
    }

    /// Adds POSIX units; leap seconds are ignored.
    pub fn plus_unit(&self, amount: i64, unit: TimeUnit) -> Result<Self, TimeError> {
        let total = self.posix as i128 * NANOS_PER_SECOND as i128
            + self.nano as i128
            + amount as i128 * unit.nanos();
        Self::of_posix_nanos(total)
    }

    /// Adds SI units on the UTC scale.
    pub fn plus_si(&self, amount: i64, unit: SiUnit, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        self.plus(MachineTime::of_si(amount, unit)?, leaps)
    }

    pub(crate) fn of_posix_nanos(total: i128) -> Result<Self, TimeError> {
        let seconds = i64::try_from(total.div_euclid(NANOS_PER_SECOND as i128))
            .map_err(|_| TimeError::InvalidArgument("moment arithmetic overflow".into()))?;
        Self::of_posix(seconds, total.rem_euclid(NANOS_PER_SECOND as i128) as u32)
    }

    /// Nanoseconds since the Unix epoch, leap seconds ignored.
    pub(crate) fn posix_nanos(&self) -> i128 {
        self.posix as i128 * NANOS_PER_SECOND as i128 + self.nano as i128
    }

    /// POSIX duration `self - earlier`; never overflows inside the supported range.
    pub(crate) fn posix_difference(&self, earlier: &Moment) -> MachineTime {
        let total = self.posix_nanos() - earlier.posix_nanos();
        MachineTime {
            seconds: total.div_euclid(NANOS_PER_SECOND as i128) as i64,
            nanos: total.rem_euclid(NANOS_PER_SECOND as i128) as u32,
            scale: MachineScale::Posix,
        }
    }

    /// Duration from `self` to `end` on the given scale.
    pub fn until(&self, end: &Moment, scale: MachineScale, leaps: &LeapSeconds) -> Result<MachineTime, TimeError> {
        let (a, b) = match scale {
            MachineScale::Posix => (self.posix, end.posix),
            MachineScale::Utc => (self.utc_seconds(leaps), end.utc_seconds(leaps)),
        };
        let total = (b as i128 - a as i128) * NANOS_PER_SECOND as i128 + end.nano as i128
            - self.nano as i128;
        MachineTime::from_total_nanos(total, scale)
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Parses an ISO-8601 timestamp with offset. `23:59:60` is accepted only
    /// where `leaps` has a positive leap second.
    pub fn parse_iso(text: &str, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        crate::interval::iso::parse_moment_with(text, leaps)
    }

    /// Wall time at a fixed offset. A leap second shows as 23:59:59.
    pub fn to_timestamp(&self, offset: FixedOffset) -> PlainTimestamp {
        let local = self.posix as i128 + offset.local_minus_utc() as i128;
        let day = local.div_euclid(SECONDS_PER_DAY as i128) as i64 + MJD_OF_UNIX_EPOCH;
        let secs = local.rem_euclid(SECONDS_PER_DAY as i128) as i64;
        let date = PlainDate::of_mjd(day).unwrap_or(if day < MIN_MJD { PlainDate::MIN } else { PlainDate::MAX });
        let time = PlainTime::of_nano_of_day(secs * NANOS_PER_SECOND + self.nano as i64);
        PlainTimestamp::of(date, time)
    }

    pub fn to_utc_timestamp(&self) -> PlainTimestamp {
        self.to_timestamp(utc_offset())
    }

    /// chrono representation; a leap second uses chrono's `nanos >= 1e9`
    /// convention. `None` outside chrono's range.
    pub fn to_utc_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = self.nano + if self.leap { NANOS_PER_SECOND as u32 } else { 0 };
        DateTime::from_timestamp(self.posix, nanos)
    }

    /// From chrono; a chrono leap second folds onto 23:59:59.
    pub fn from_utc_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            posix: datetime.timestamp(),
            leap: false,
            nano: datetime.timestamp_subsec_nanos() % NANOS_PER_SECOND as u32,
        }
    }
}

impl From<DateTime<Utc>> for Moment {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_utc_datetime(value)
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = self.to_utc_timestamp();
        let time = ts.time();
        write!(f, "{}T", ts.date())?;
        let second = if self.leap { 60 } else { time.second() };
        write_clock(f, time.hour(), time.minute(), second, time.nanosecond())?;
        f.write_str("Z")
    }
}

/// Parses against [`LeapSeconds::shared`]; see [`Moment::parse_iso`].
impl std::str::FromStr for Moment {
    type Err = TimeError;

    /// Parses an ISO-8601 timestamp with offset, e.g. `2012-06-30T23:59:59Z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s, &LeapSeconds::shared())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Moment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Moment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::UTC_EPOCH_POSIX;

    const UTC_SCALE_EPOCH: i64 = UTC_EPOCH_POSIX;

    fn leaps() -> LeapSeconds {
        LeapSeconds::default()
    }

    /// 2016-12-31T23:59:59Z
    const BEFORE_LEAP: i64 = 1_483_228_799;

    #[test]
    fn machine_time_normalises() {
        let t = MachineTime::new(1, -1, MachineScale::Posix).unwrap();
        assert_eq!((t.seconds(), t.nanos()), (0, 999_999_999));
        let n = MachineTime::new(0, -1, MachineScale::Posix).unwrap();
        assert_eq!((n.seconds(), n.nanos()), (-1, 999_999_999));
        assert!(n.is_negative());
        assert_eq!(n.to_string(), "-0.000000001s [POSIX]");
    }

    #[test]
    fn machine_time_arithmetic() {
        let a = MachineTime::of(90, TimeUnit::Minutes).unwrap();
        let b = MachineTime::of(1, TimeUnit::Hours).unwrap();
        assert_eq!(a.minus(&b).unwrap(), MachineTime::of(30, TimeUnit::Minutes).unwrap());
        assert_eq!(a.multiplied_by(0.5).unwrap().seconds(), 2_700);
        assert!(a.plus(&MachineTime::of_si(1, SiUnit::Seconds).unwrap()).is_err());
        assert!(a.multiplied_by(f64::NAN).is_err());
        assert_eq!(b.to_string(), "3600s [POSIX]");
    }

    #[test]
    fn leap_second_moment() {
        let ls = leaps();
        let before = Moment::of_posix(BEFORE_LEAP, 0).unwrap();
        let utc = before.elapsed_time(TimeScale::Utc, &ls);
        let leap = Moment::of_scale(utc + 1, 500_000_000, TimeScale::Utc, &ls).unwrap();
        assert!(leap.is_leap_second());
        assert_eq!(leap.posix_seconds(), BEFORE_LEAP);
        assert!(leap > Moment::of_posix(BEFORE_LEAP, 999_999_999).unwrap());
        assert!(leap < Moment::of_posix(BEFORE_LEAP + 1, 0).unwrap());
        assert_eq!(leap.elapsed_time(TimeScale::Utc, &ls), utc + 1);
        assert_eq!(leap.to_string(), "2016-12-31T23:59:60.500Z");
    }

    #[test]
    fn real_and_simple_durations_differ_over_leap_second() {
        let ls = leaps();
        let a = Moment::of_posix(BEFORE_LEAP, 0).unwrap();
        let b = Moment::of_posix(BEFORE_LEAP + 1, 0).unwrap();
        assert_eq!(a.until(&b, MachineScale::Posix, &ls).unwrap().seconds(), 1);
        assert_eq!(a.until(&b, MachineScale::Utc, &ls).unwrap().seconds(), 2);
    }

    #[test]
    fn si_arithmetic_lands_on_leap_second() {
        let ls = leaps();
        let a = Moment::of_posix(BEFORE_LEAP, 0).unwrap();
        let leap = a.plus_si(1, SiUnit::Seconds, &ls).unwrap();
        assert!(leap.is_leap_second());
        let after = leap.plus_si(1, SiUnit::Seconds, &ls).unwrap();
        assert_eq!(after.posix_seconds(), BEFORE_LEAP + 1);
        assert_eq!(a.plus_unit(1, TimeUnit::Seconds).unwrap(), after);
    }

    #[test]
    fn scale_offsets() {
        let ls = leaps();
        let epoch = Moment::of_posix(UTC_SCALE_EPOCH, 0).unwrap();
        assert_eq!(epoch.elapsed_time(TimeScale::Utc, &ls), 0);
        assert_eq!(epoch.elapsed_time(TimeScale::Tai, &ls), 441_763_210);

        // GPS epoch 1980-01-06T00:00Z
        let gps_epoch = Moment::of_posix(315_964_800, 0).unwrap();
        assert_eq!(gps_epoch.elapsed_time(TimeScale::Gps, &ls), 0);

        let tt = epoch.elapsed_time(TimeScale::Tt, &ls);
        assert_eq!(tt, 441_763_210 + 32);
        assert_eq!(epoch.nanosecond_on(TimeScale::Tt), 184_000_000);
        let back = Moment::of_scale(tt, 184_000_000, TimeScale::Tt, &ls).unwrap();
        assert_eq!(back, epoch);
    }

    #[test]
    fn suppressed_table_makes_utc_posix_like() {
        let ls = LeapSeconds::suppressed();
        let a = Moment::of_posix(BEFORE_LEAP, 0).unwrap();
        let b = Moment::of_posix(BEFORE_LEAP + 1, 0).unwrap();
        assert_eq!(a.until(&b, MachineScale::Utc, &ls).unwrap().seconds(), 1);
        assert_eq!(a.elapsed_time(TimeScale::Utc, &ls), BEFORE_LEAP - UTC_SCALE_EPOCH);
    }

    #[test]
    fn timestamps_and_chrono() {
        let m = Moment::of_posix(0, 0).unwrap();
        let plus_one = FixedOffset::east_opt(3_600).unwrap();
        assert_eq!(m.to_timestamp(plus_one).to_string(), "1970-01-01T01:00");
        assert_eq!(m.to_string(), "1970-01-01T00:00Z");
        let dt = m.to_utc_datetime().unwrap();
        assert_eq!(Moment::from(dt), m);
    }

    #[test]
    fn leap_second_text_follows_the_given_table() {
        let ls = LeapSeconds::default();
        assert!(ls.register_positive(2030, 6, 30).is_ok());
        let leap = Moment::parse_iso("2030-06-30T23:59:60Z", &ls).unwrap();
        assert!(leap.is_leap_second());
        assert!(Moment::parse_iso("2030-06-30T23:59:60Z", &LeapSeconds::default()).is_err());
        assert!(Moment::parse_iso("2016-12-31T23:59:60Z", &LeapSeconds::suppressed()).is_err());
    }

    #[test]
    fn range_checks() {
        assert!(Moment::of_posix(MAX_POSIX + 1, 0).is_err());
        assert!(Moment::of_posix(0, 1_000_000_000).is_err());
        assert!(Moment::MAX.plus_unit(1, TimeUnit::Nanos).is_err());
    }
}
