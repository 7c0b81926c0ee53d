// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Wall-clock time and local timestamps without zone.

use crate::date::{CalendarUnit, PlainDate};
use crate::error::TimeError;
use crate::gregorian::{MAX_MJD, MIN_MJD, MJD_OF_UNIX_EPOCH};
use crate::moment::Moment;
use chrono::{FixedOffset, NaiveDateTime, NaiveTime, Offset, Timelike};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// Clock-based units for timestamp arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockUnit {
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl ClockUnit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> i64 {
        match self {
            ClockUnit::Hours => 3_600 * NANOS_PER_SECOND,
            ClockUnit::Minutes => 60 * NANOS_PER_SECOND,
            ClockUnit::Seconds => NANOS_PER_SECOND,
            ClockUnit::Millis => 1_000_000,
            ClockUnit::Micros => 1_000,
            ClockUnit::Nanos => 1,
        }
    }
}

/// Either a calendar or a clock unit; accepted by [`PlainTimestamp`]
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsoUnit {
    Calendar(CalendarUnit),
    Clock(ClockUnit),
}

impl From<CalendarUnit> for IsoUnit {
    fn from(value: CalendarUnit) -> Self {
        IsoUnit::Calendar(value)
    }
}

impl From<ClockUnit> for IsoUnit {
    fn from(value: ClockUnit) -> Self {
        IsoUnit::Clock(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PlainTime
// ═══════════════════════════════════════════════════════════════════════════

/// Wall-clock time from 00:00 to 23:59:59.999999999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PlainTime {
    hour: u8,
    minute: u8,
    second: u8,
    nano: u32,
}

impl PlainTime {
    pub const MIDNIGHT: PlainTime = PlainTime {
        hour: 0,
        minute: 0,
        second: 0,
        nano: 0,
    };

    pub fn of(hour: u8, minute: u8, second: u8) -> Result<Self, TimeError> {
        Self::of_nanos(hour, minute, second, 0)
    }

    pub fn of_nanos(hour: u8, minute: u8, second: u8, nano: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 || second > 59 || nano as i64 >= NANOS_PER_SECOND {
            return Err(TimeError::InvalidArgument(format!(
                "time out of range: {hour:02}:{minute:02}:{second:02}.{nano:09}"
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
            nano,
        })
    }

    /// Time from nanoseconds since midnight; the value is reduced modulo one day.
    pub fn of_nano_of_day(nanos: i64) -> Self {
        let n = nanos.rem_euclid(NANOS_PER_DAY);
        let secs = n / NANOS_PER_SECOND;
        Self {
            hour: (secs / 3_600) as u8,
            minute: (secs / 60 % 60) as u8,
            second: (secs % 60) as u8,
            nano: (n % NANOS_PER_SECOND) as u32,
        }
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        self.nano
    }

    pub const fn second_of_day(&self) -> i64 {
        self.hour as i64 * 3_600 + self.minute as i64 * 60 + self.second as i64
    }

    pub const fn nano_of_day(&self) -> i64 {
        self.second_of_day() * NANOS_PER_SECOND + self.nano as i64
    }

    pub fn to_naive(&self) -> NaiveTime {
        // Fields are validated on construction, so chrono accepts them.
        NaiveTime::from_num_seconds_from_midnight_opt(self.second_of_day() as u32, self.nano)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            // chrono encodes a leap second as nanos >= 1e9
            nano: time.nanosecond().min(999_999_999),
        }
    }
}

/// Writes `hh:mm`, then `:ss` and a 3/6/9-digit fraction when present.
pub(crate) fn write_clock(
    f: &mut fmt::Formatter<'_>,
    hour: u8,
    minute: u8,
    second: u8,
    nano: u32,
) -> fmt::Result {
    write!(f, "{hour:02}:{minute:02}")?;
    if second != 0 || nano != 0 {
        write!(f, ":{second:02}")?;
    }
    if nano != 0 {
        if nano % 1_000_000 == 0 {
            write!(f, ".{:03}", nano / 1_000_000)?;
        } else if nano % 1_000 == 0 {
            write!(f, ".{:06}", nano / 1_000)?;
        } else {
            write!(f, ".{nano:09}")?;
        }
    }
    Ok(())
}

impl fmt::Display for PlainTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock(f, self.hour, self.minute, self.second, self.nano)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PlainTimestamp
// ═══════════════════════════════════════════════════════════════════════════

/// A local date-time without zone or offset.
///
/// Ordering is chronological (date first, then wall time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainTimestamp {
    date: PlainDate,
    time: PlainTime,
}

impl PlainTimestamp {
    pub const MIN: PlainTimestamp = PlainTimestamp {
        date: PlainDate::MIN,
        time: PlainTime::MIDNIGHT,
    };

    pub const MAX: PlainTimestamp = PlainTimestamp {
        date: PlainDate::MAX,
        time: PlainTime {
            hour: 23,
            minute: 59,
            second: 59,
            nano: 999_999_999,
        },
    };

    #[inline]
    pub const fn of(date: PlainDate, time: PlainTime) -> Self {
        Self { date, time }
    }

    /// Convenience factory from individual fields.
    pub fn of_fields(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimeError> {
        Ok(Self::of(
            PlainDate::of(year, month, day)?,
            PlainTime::of(hour, minute, second)?,
        ))
    }

    #[inline]
    pub const fn date(&self) -> PlainDate {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> PlainTime {
        self.time
    }

    /// Nanoseconds elapsed since MJD 0, 00:00.
    pub(crate) fn epoch_nanos(&self) -> i128 {
        self.date.mjd() as i128 * NANOS_PER_DAY as i128 + self.time.nano_of_day() as i128
    }

    pub(crate) fn from_epoch_nanos(nanos: i128) -> Result<Self, TimeError> {
        let day = nanos.div_euclid(NANOS_PER_DAY as i128);
        if day < MIN_MJD as i128 || day > MAX_MJD as i128 {
            return Err(TimeError::InvalidArgument(
                "timestamp arithmetic out of range".into(),
            ));
        }
        let date = PlainDate::of_mjd(day as i64)?;
        let time = PlainTime::of_nano_of_day(nanos.rem_euclid(NANOS_PER_DAY as i128) as i64);
        Ok(Self::of(date, time))
    }

    /// Adds an amount of a calendar or clock unit.
    ///
    /// Calendar units keep the wall time and move the date; clock units move
    /// across midnight.
    pub fn plus(&self, amount: i64, unit: impl Into<IsoUnit>) -> Result<Self, TimeError> {
        match unit.into() {
            IsoUnit::Calendar(unit) => Ok(Self::of(self.date.plus(amount, unit)?, self.time)),
            IsoUnit::Clock(unit) => {
                let delta = amount as i128 * unit.nanos() as i128;
                Self::from_epoch_nanos(self.epoch_nanos() + delta)
            }
        }
    }

    pub fn minus(&self, amount: i64, unit: impl Into<IsoUnit>) -> Result<Self, TimeError> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {amount}")))?;
        self.plus(negated, unit)
    }

    /// Counts whole units from `self` to `end`.
    pub fn until(&self, end: &PlainTimestamp, unit: impl Into<IsoUnit>) -> i64 {
        match unit.into() {
            IsoUnit::Calendar(unit) => {
                let mut count = self.date.until(&end.date, unit);
                // An incomplete last unit does not count.
                if count > 0 && self.plus(count, unit).map_or(false, |t| t > *end) {
                    count -= 1;
                } else if count < 0 && self.plus(count, unit).map_or(false, |t| t < *end) {
                    count += 1;
                }
                count
            }
            IsoUnit::Clock(unit) => {
                ((end.epoch_nanos() - self.epoch_nanos()) / unit.nanos() as i128) as i64
            }
        }
    }

    /// Interprets this wall time at a fixed UTC offset.
    pub fn at(&self, offset: FixedOffset) -> Result<Moment, TimeError> {
        let local_secs = (self.date.mjd() - MJD_OF_UNIX_EPOCH) * SECONDS_PER_DAY
            + self.time.second_of_day();
        Moment::of_posix(
            local_secs - offset.local_minus_utc() as i64,
            self.time.nanosecond(),
        )
    }

    /// Interprets this wall time as UTC.
    pub fn at_utc(&self) -> Result<Moment, TimeError> {
        self.at(utc_offset())
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date.to_naive()?, self.time.to_naive()))
    }

    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self::of(
            PlainDate::from_naive(datetime.date()),
            PlainTime::from_naive(datetime.time()),
        )
    }
}

/// The zero offset.
pub(crate) fn utc_offset() -> FixedOffset {
    chrono::Utc.fix()
}

impl From<NaiveDateTime> for PlainTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl fmt::Display for PlainTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl std::str::FromStr for PlainTimestamp {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::interval::iso::parse_timestamp(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PlainTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PlainTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
