// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Typed interval aliases.

use super::iso;
use super::{Boundary, Interval};
use crate::date::{CalendarUnit, PlainDate};
use crate::error::TimeError;
use crate::moment::{MachineScale, MachineTime, Moment, SiUnit, TimeUnit};
use crate::scale::LeapSeconds;
use crate::timestamp::{utc_offset, IsoUnit, PlainTime, PlainTimestamp};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use qtty::Days;
use std::str::FromStr;

/// Interval of calendar dates. ISO text without brackets has a closed end.
pub type DateInterval = Interval<PlainDate>;

/// Interval of local timestamps.
pub type TimestampInterval = Interval<PlainTimestamp>;

/// Interval of moments on the UTC time line.
pub type MomentInterval = Interval<Moment>;

/// UTC interval alias over chrono.
pub type UtcPeriod = Interval<DateTime<Utc>>;

// ═══════════════════════════════════════════════════════════════════════════
// DateInterval
// ═══════════════════════════════════════════════════════════════════════════

impl Interval<PlainDate> {
    /// Number of contained days.
    ///
    /// # Errors
    ///
    /// [`TimeError::Unsupported`] for infinite intervals.
    pub fn length_in_days(&self) -> Result<i64, TimeError> {
        Ok(self.duration()?.amount())
    }

    /// Whole units between the first contained day and the day after the
    /// last one.
    pub fn duration_in(&self, unit: CalendarUnit) -> Result<i64, TimeError> {
        let (start, end) = self.half_open_points()?;
        Ok(start.until(&end, unit))
    }

    /// Contained days in ascending order.
    pub fn days(&self) -> Result<impl Iterator<Item = PlainDate>, TimeError> {
        let (start, end) = self.half_open_points()?;
        let last = if self.contains(end) { end.mjd() } else { end.mjd() - 1 };
        Ok((start.mjd()..=last).filter_map(|mjd| PlainDate::of_mjd(mjd).ok()))
    }

    /// Timestamps from midnight of the first day to midnight after the last.
    pub fn to_full_days(&self) -> Result<TimestampInterval, TimeError> {
        let start = match self.start() {
            Boundary::Finite { .. } => {
                let (first, _) = self.first_and_last();
                Boundary::of_closed(PlainTimestamp::of(first, PlainTime::MIDNIGHT))
            }
            _ => Boundary::InfinitePast,
        };
        let end = match self.end() {
            Boundary::Finite { .. } => {
                let (_, last) = self.first_and_last();
                match last.plus_days(1) {
                    Ok(next) => Boundary::of_open(PlainTimestamp::of(next, PlainTime::MIDNIGHT)),
                    Err(_) => Boundary::of_closed(PlainTimestamp::MAX),
                }
            }
            _ => Boundary::InfiniteFuture,
        };
        Interval::new(start, end)
    }

    /// First and last contained day of the finite sides.
    fn first_and_last(&self) -> (PlainDate, PlainDate) {
        let first = match self.start() {
            Boundary::Finite { point, .. } if self.start().is_open() => {
                point.plus_days(1).unwrap_or(point)
            }
            b => b.temporal().unwrap_or(PlainDate::MIN),
        };
        let last = match self.end() {
            Boundary::Finite { point, .. } if self.end().is_open() => {
                point.plus_days(-1).unwrap_or(point)
            }
            b => b.temporal().unwrap_or(PlainDate::MAX),
        };
        (first, last)
    }

    /// Parses ISO-8601 interval text; see [`FromStr`].
    pub fn parse_iso(text: &str) -> Result<Self, TimeError> {
        iso::parse_interval(text, &())
    }
}

impl FromStr for Interval<PlainDate> {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimestampInterval
// ═══════════════════════════════════════════════════════════════════════════

impl Interval<PlainTimestamp> {
    /// Whole units between the closed start and the open end.
    pub fn duration_in(&self, unit: impl Into<IsoUnit>) -> Result<i64, TimeError> {
        let (start, end) = self.half_open_points()?;
        Ok(start.until(&end, unit))
    }

    /// Moves finite boundaries by a calendar or clock amount.
    pub fn move_by_unit(&self, amount: i64, unit: impl Into<IsoUnit>) -> Result<Self, TimeError> {
        let unit = unit.into();
        self.map_points(|t| t.plus(amount, unit))
    }

    /// Interprets both boundaries at a fixed offset.
    pub fn at(&self, offset: FixedOffset) -> Result<MomentInterval, TimeError> {
        self.map_points(|t| t.at(offset))
    }

    pub fn at_utc(&self) -> Result<MomentInterval, TimeError> {
        self.at(utc_offset())
    }

    pub fn parse_iso(text: &str) -> Result<Self, TimeError> {
        iso::parse_interval(text, &())
    }
}

impl FromStr for Interval<PlainTimestamp> {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MomentInterval
// ═══════════════════════════════════════════════════════════════════════════

impl Interval<Moment> {
    /// Interval of length `duration` positioned around `point`.
    ///
    /// `alignment` 0 puts `point` at the start, 1 at the end, 0.5 in the
    /// middle. The result is half-open. A UTC-scale `duration` counts the
    /// leap seconds of `leaps`.
    ///
    /// # Errors
    ///
    /// [`TimeError::InvalidArgument`] if `alignment` is outside `[0, 1]` or
    /// `duration` is negative.
    ///
    /// ```
    /// use tempora::{LeapSeconds, MachineTime, Moment, MomentInterval, TimeUnit};
    ///
    /// let leaps = LeapSeconds::default();
    /// let noon = Moment::of_posix(43_200, 0).unwrap();
    /// let hour = MachineTime::of(1, TimeUnit::Hours).unwrap();
    /// let iv = MomentInterval::surrounding(noon, hour, 0.5, &leaps).unwrap();
    /// assert_eq!(iv.to_string(), "[1970-01-01T11:30Z/1970-01-01T12:30Z)");
    /// ```
    pub fn surrounding(
        point: Moment,
        duration: MachineTime,
        alignment: f64,
        leaps: &LeapSeconds,
    ) -> Result<Self, TimeError> {
        if !(0.0..=1.0).contains(&alignment) {
            return Err(TimeError::InvalidArgument(format!(
                "alignment out of range [0, 1]: {alignment}"
            )));
        }
        if duration.is_negative() {
            return Err(TimeError::InvalidArgument(format!(
                "negative duration: {duration}"
            )));
        }
        let start = point.minus(duration.multiplied_by(alignment)?, leaps)?;
        let end = if alignment == 1.0 {
            point
        } else {
            start.plus(duration, leaps)?
        };
        Self::between(start, end)
    }

    /// Length in POSIX seconds; leap seconds are not counted.
    pub fn simple_duration(&self) -> Result<MachineTime, TimeError> {
        self.duration()
    }

    /// Length in SI seconds, counting the leap seconds of `leaps`.
    pub fn real_duration(&self, leaps: &LeapSeconds) -> Result<MachineTime, TimeError> {
        let (start, end) = self.half_open_points()?;
        start.until(&end, MachineScale::Utc, leaps)
    }

    pub fn move_by_unit(&self, amount: i64, unit: TimeUnit) -> Result<Self, TimeError> {
        self.map_points(|m| m.plus_unit(amount, unit))
    }

    /// Moves finite boundaries by SI units on the UTC scale.
    pub fn move_by_si(&self, amount: i64, unit: SiUnit, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        self.map_points(|m| m.plus_si(amount, unit, leaps))
    }

    /// Local timestamps at a fixed offset.
    pub fn to_zonal(&self, offset: FixedOffset) -> Result<TimestampInterval, TimeError> {
        self.map_points(|m| Ok(m.to_timestamp(offset)))
    }

    /// Local timestamps at the system offset valid at each boundary.
    pub fn to_local(&self) -> Result<TimestampInterval, TimeError> {
        self.map_points(|m| {
            let utc = m.to_utc_datetime().ok_or_else(|| {
                TimeError::Unsupported(format!("{m} is outside the system clock range"))
            })?;
            let offset = chrono::Local.offset_from_utc_datetime(&utc.naive_utc()).fix();
            Ok(m.to_timestamp(offset))
        })
    }

    /// Parses ISO-8601 interval text; `23:59:60` endpoints are checked
    /// against `leaps`.
    pub fn parse_iso(text: &str, leaps: &LeapSeconds) -> Result<Self, TimeError> {
        iso::parse_interval(text, leaps)
    }
}

/// Parses against [`LeapSeconds::shared`].
impl FromStr for Interval<Moment> {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s, &LeapSeconds::shared())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UtcPeriod
// ═══════════════════════════════════════════════════════════════════════════

// Specific implementation for UTC periods
impl Interval<DateTime<Utc>> {
    /// Returns the duration in days as a floating-point quantity.
    pub fn duration_days(&self) -> Result<Days, TimeError> {
        const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
        const SECONDS_PER_DAY: f64 = 86_400.0;

        let duration = self.duration()?;
        Ok(Days::new(match duration.num_nanoseconds() {
            Some(ns) => ns as f64 / NANOS_PER_DAY,
            // Fallback for exceptionally large durations that do not fit in i64 nanoseconds.
            None => duration.num_seconds() as f64 / SECONDS_PER_DAY,
        }))
    }

    /// Returns the duration in whole seconds.
    pub fn duration_seconds(&self) -> Result<i64, TimeError> {
        Ok(self.duration()?.num_seconds())
    }

    /// The same interval on the [`Moment`] axis.
    pub fn to_moments(&self) -> Result<MomentInterval, TimeError> {
        self.map_points(|t| Ok(Moment::from_utc_datetime(t)))
    }
}
