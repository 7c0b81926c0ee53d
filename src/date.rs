// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar dates in the proleptic Gregorian calendar.

use crate::error::TimeError;
use crate::gregorian::{self, MAX_MJD, MAX_YEAR, MIN_MJD, MIN_YEAR};
use crate::weekday::Weekday;
use chrono::{Datelike, NaiveDate};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar-based units for date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    Centuries,
    Decades,
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
}

impl CalendarUnit {
    /// Length in months for month-based units.
    const fn months(self) -> Option<i64> {
        match self {
            CalendarUnit::Centuries => Some(1200),
            CalendarUnit::Decades => Some(120),
            CalendarUnit::Years => Some(12),
            CalendarUnit::Quarters => Some(3),
            CalendarUnit::Months => Some(1),
            CalendarUnit::Weeks | CalendarUnit::Days => None,
        }
    }

    /// Length in days for day-based units.
    const fn days(self) -> i64 {
        match self {
            CalendarUnit::Weeks => 7,
            _ => 1,
        }
    }
}

/// A signed count of calendar days; the duration type of [`PlainDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CalendarDays(pub i64);

impl CalendarDays {
    /// Number of days.
    #[inline]
    pub const fn amount(self) -> i64 {
        self.0
    }
}

/// A date in the proleptic Gregorian calendar.
///
/// The value is always valid: every constructor checks the field triple and
/// the supported year range `MIN_YEAR..=MAX_YEAR`. Dates order
/// chronologically.
///
/// # Examples
///
/// ```
/// use tempora::{PlainDate, Weekday};
///
/// let d = PlainDate::of(2016, 2, 29).unwrap();
/// assert_eq!(d.day_of_week(), Weekday::Monday);
/// assert_eq!(d.to_string(), "2016-02-29");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainDate {
    year: i32,
    month: u8,
    day: u8,
}

impl PlainDate {
    /// Earliest supported date.
    pub const MIN: PlainDate = PlainDate {
        year: MIN_YEAR,
        month: 1,
        day: 1,
    };

    /// Latest supported date.
    pub const MAX: PlainDate = PlainDate {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Creates a validated date.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, TimeError> {
        gregorian::check_date(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from its Modified Julian Day.
    pub fn of_mjd(mjd: i64) -> Result<Self, TimeError> {
        let (year, month, day) = gregorian::from_mjd(mjd)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from year and day-of-year (1-based).
    pub fn of_year_day(year: i32, day_of_year: u16) -> Result<Self, TimeError> {
        let length = if gregorian::is_leap_year(year) { 366 } else { 365 };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || day_of_year < 1 || day_of_year > length {
            return Err(TimeError::InvalidDate(format!(
                "day of year out of range: {year}-{day_of_year:03}"
            )));
        }
        Self::of_mjd(gregorian::mjd_of(year as i64, 1, 1) + day_of_year as i64 - 1)
    }

    /// Creates a date from an ISO week date.
    pub fn of_week_date(week_based_year: i32, week: u8, weekday: Weekday) -> Result<Self, TimeError> {
        let y = week_based_year as i64;
        if !(MIN_YEAR..=MAX_YEAR).contains(&week_based_year)
            || week < 1
            || week > gregorian::weeks_in_year(y)
        {
            return Err(TimeError::InvalidDate(format!(
                "week date out of range: {week_based_year}-W{week:02}"
            )));
        }
        let mjd = gregorian::week_one_start(y) + (week as i64 - 1) * 7 + weekday.value() as i64 - 1;
        Self::of_mjd(mjd)
    }

    /// Unchecked construction from a triple produced by calendar arithmetic.
    #[inline]
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    // ── fields ────────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Modified Julian Day of this date.
    #[inline]
    pub const fn mjd(&self) -> i64 {
        gregorian::mjd_of(self.year as i64, self.month, self.day)
    }

    pub fn day_of_week(&self) -> Weekday {
        Weekday::from_mjd(self.mjd())
    }

    /// Day of year, 1-based.
    pub fn day_of_year(&self) -> u16 {
        (self.mjd() - gregorian::mjd_of(self.year as i64, 1, 1) + 1) as u16
    }

    pub fn length_of_month(&self) -> u8 {
        gregorian::days_in_month(self.year as i64, self.month)
    }

    pub fn length_of_year(&self) -> u16 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    pub fn is_leap_year(&self) -> bool {
        gregorian::is_leap_year(self.year)
    }

    /// ISO week-based year; differs from [`PlainDate::year`] near January 1st.
    pub fn year_of_week_date(&self) -> i32 {
        gregorian::week_date_of(self.mjd()).0 as i32
    }

    /// ISO week of the week-based year (1..=53).
    pub fn week_of_year(&self) -> u8 {
        gregorian::week_date_of(self.mjd()).1
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Adds a number of days.
    pub fn plus_days(&self, days: i64) -> Result<Self, TimeError> {
        let mjd = self
            .mjd()
            .checked_add(days)
            .filter(|m| (MIN_MJD..=MAX_MJD).contains(m))
            .ok_or_else(|| TimeError::InvalidArgument(format!("{self} + {days} days is out of range")))?;
        Self::of_mjd(mjd)
    }

    /// Adds an amount of the given unit.
    ///
    /// Month-based units keep the day of month, clamped to the last day of the
    /// target month (2016-01-31 + 1 month = 2016-02-29).
    pub fn plus(&self, amount: i64, unit: CalendarUnit) -> Result<Self, TimeError> {
        match unit.months() {
            Some(factor) => {
                let months = amount
                    .checked_mul(factor)
                    .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {amount}")))?;
                self.plus_months(months)
            }
            None => {
                let days = amount
                    .checked_mul(unit.days())
                    .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {amount}")))?;
                self.plus_days(days)
            }
        }
    }

    pub fn minus(&self, amount: i64, unit: CalendarUnit) -> Result<Self, TimeError> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {amount}")))?;
        self.plus(negated, unit)
    }

    fn plus_months(&self, months: i64) -> Result<Self, TimeError> {
        let total = (self.year as i64 * 12 + self.month as i64 - 1)
            .checked_add(months)
            .ok_or_else(|| TimeError::InvalidArgument(format!("{self} + {months} months is out of range")))?;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
            return Err(TimeError::InvalidArgument(format!(
                "{self} + {months} months is out of range"
            )));
        }
        let day = self.day.min(gregorian::days_in_month(year, month));
        Ok(Self::from_parts(year as i32, month, day))
    }

    /// Counts whole units from `self` to `end`; negative when `end` is earlier.
    ///
    /// Month-based counts only include complete months: from 2016-01-31 to
    /// 2016-02-29 is one month, to 2016-02-28 is zero months.
    pub fn until(&self, end: &PlainDate, unit: CalendarUnit) -> i64 {
        match unit.months() {
            Some(factor) => self.months_until(end) / factor,
            None => (end.mjd() - self.mjd()) / unit.days(),
        }
    }

    fn months_until(&self, end: &PlainDate) -> i64 {
        let mut months = (end.year as i64 * 12 + end.month as i64)
            - (self.year as i64 * 12 + self.month as i64);
        if months > 0 && self.plus_months(months).map_or(false, |d| d > *end) {
            months -= 1;
        } else if months < 0 && self.plus_months(months).map_or(false, |d| d < *end) {
            months += 1;
        }
        months
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// Converts to a chrono date; `None` outside chrono's supported range.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }

    /// Converts from a chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self::from_parts(date.year(), date.month() as u8, date.day() as u8)
    }
}

impl From<NaiveDate> for PlainDate {
    fn from(value: NaiveDate) -> Self {
        Self::from_naive(value)
    }
}

/// Writes a year with at least four digits, signed outside `0..=9999`.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i64) -> fmt::Result {
    if year < 0 {
        write!(f, "-{:04}", -year)
    } else if year > 9999 {
        write!(f, "+{year}")
    } else {
        write!(f, "{year:04}")
    }
}

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year as i64)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl std::str::FromStr for PlainDate {
    type Err = TimeError;

    /// Parses an ISO-8601 calendar, ordinal or week date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::interval::iso::parse_date(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PlainDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PlainDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    #[test]
    fn construction_validates() {
        assert!(PlainDate::of(2015, 2, 29).is_err());
        assert!(PlainDate::of(2016, 2, 29).is_ok());
        assert!(PlainDate::of_mjd(MAX_MJD + 1).is_err());
        assert_eq!(PlainDate::of_mjd(0).unwrap(), date(1858, 11, 17));
    }

    #[test]
    fn derived_fields() {
        let d = date(2016, 3, 1);
        assert_eq!(d.day_of_year(), 61);
        assert_eq!(d.length_of_month(), 31);
        assert_eq!(d.length_of_year(), 366);
        assert_eq!(d.day_of_week(), Weekday::Tuesday);
    }

    #[test]
    fn year_day_and_week_date_factories() {
        assert_eq!(PlainDate::of_year_day(2016, 60).unwrap(), date(2016, 2, 29));
        assert!(PlainDate::of_year_day(2015, 366).is_err());
        assert_eq!(
            PlainDate::of_week_date(2016, 9, Weekday::Monday).unwrap(),
            date(2016, 2, 29)
        );
        assert_eq!(
            PlainDate::of_week_date(2015, 53, Weekday::Sunday).unwrap(),
            date(2016, 1, 3)
        );
        assert!(PlainDate::of_week_date(2016, 53, Weekday::Monday).is_err());
    }

    #[test]
    fn month_arithmetic_clamps_to_month_end() {
        let jan31 = date(2016, 1, 31);
        assert_eq!(jan31.plus(1, CalendarUnit::Months).unwrap(), date(2016, 2, 29));
        assert_eq!(jan31.plus(1, CalendarUnit::Quarters).unwrap(), date(2016, 4, 30));
        assert_eq!(date(2016, 2, 29).plus(1, CalendarUnit::Years).unwrap(), date(2017, 2, 28));
        assert_eq!(jan31.minus(2, CalendarUnit::Months).unwrap(), date(2015, 11, 30));
    }

    #[test]
    fn until_counts_complete_units() {
        let jan31 = date(2016, 1, 31);
        assert_eq!(jan31.until(&date(2016, 2, 29), CalendarUnit::Months), 1);
        assert_eq!(jan31.until(&date(2016, 2, 28), CalendarUnit::Months), 0);
        assert_eq!(jan31.until(&date(2016, 3, 30), CalendarUnit::Days), 59);
        assert_eq!(date(2016, 3, 30).until(&jan31, CalendarUnit::Weeks), -8);
        assert_eq!(date(2012, 6, 15).until(&date(2016, 6, 14), CalendarUnit::Years), 3);
        assert_eq!(date(2016, 6, 14).until(&date(2012, 6, 15), CalendarUnit::Years), -3);
    }

    #[test]
    fn range_is_enforced_by_arithmetic() {
        assert!(PlainDate::MAX.plus_days(1).is_err());
        assert!(PlainDate::MIN.plus_days(-1).is_err());
        assert!(PlainDate::MAX.plus(1, CalendarUnit::Months).is_err());
    }

    #[test]
    fn display_pads_and_signs_year() {
        assert_eq!(date(2016, 2, 29).to_string(), "2016-02-29");
        assert_eq!(date(33, 1, 5).to_string(), "0033-01-05");
        assert_eq!(date(-44, 3, 15).to_string(), "-0044-03-15");
        assert_eq!(date(12_345, 1, 1).to_string(), "+12345-01-01");
    }

    #[test]
    fn chrono_roundtrip() {
        let d = date(2016, 2, 29);
        let naive = d.to_naive().unwrap();
        assert_eq!(PlainDate::from(naive), d);
        assert!(PlainDate::MAX.to_naive().is_none());
    }
}
