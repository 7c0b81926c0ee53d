// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO calendar weeks.
//!
//! A week runs from Monday to Sunday and belongs to the week-based year that
//! contains its Thursday. Week-based years have 52 or 53 weeks.

use crate::date::{write_year, PlainDate};
use crate::error::TimeError;
use crate::gregorian::{self, MAX_MJD, MAX_YEAR, MIN_MJD, MIN_YEAR};
use crate::interval::iso::parse_year;
use crate::interval::{Boundary, DateInterval};
use crate::weekday::Weekday;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A week of an ISO week-based year, e.g. `2016-W09`.
///
/// Weeks order chronologically. At the ends of the supported range a week
/// may be cut short: the last week ends on [`PlainDate::MAX`].
///
/// # Examples
///
/// ```
/// use tempora::{CalendarWeek, PlainDate, Weekday};
///
/// let w = CalendarWeek::from_date(PlainDate::of(2016, 2, 29).unwrap());
/// assert_eq!(w.to_string(), "2016-W09");
/// assert_eq!(w.at(Weekday::Sunday).unwrap(), PlainDate::of(2016, 3, 6).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarWeek {
    year: i32,
    week: u8,
}

impl CalendarWeek {
    /// Creates a week of a week-based year.
    pub fn of(year: i32, week: u8) -> Result<Self, TimeError> {
        if !Self::is_valid(year, week) {
            return Err(TimeError::InvalidArgument(format!(
                "week {week} out of range for week-based year {year}"
            )));
        }
        Ok(Self { year, week })
    }

    /// `true` when `week` exists in the week-based `year`.
    pub fn is_valid(year: i32, week: u8) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&year)
            && week >= 1
            && week <= gregorian::weeks_in_year(year as i64)
    }

    /// The week containing `date`.
    pub fn from_date(date: PlainDate) -> Self {
        Self {
            year: date.year_of_week_date(),
            week: date.week_of_year(),
        }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn week(&self) -> u8 {
        self.week
    }

    /// MJD of the Monday; may lie before [`PlainDate::MIN`].
    fn monday_mjd(&self) -> i64 {
        gregorian::week_one_start(self.year as i64) + (self.week as i64 - 1) * 7
    }

    fn first_mjd(&self) -> i64 {
        self.monday_mjd().max(MIN_MJD)
    }

    fn last_mjd(&self) -> i64 {
        (self.monday_mjd() + 6).min(MAX_MJD)
    }

    /// Closed start boundary (Monday, or the first supported day).
    pub fn start(&self) -> Boundary<PlainDate> {
        Boundary::of_closed(PlainDate::of_mjd(self.first_mjd()).unwrap_or(PlainDate::MIN))
    }

    /// Closed end boundary (Sunday, or the last supported day).
    pub fn end(&self) -> Boundary<PlainDate> {
        Boundary::of_closed(PlainDate::of_mjd(self.last_mjd()).unwrap_or(PlainDate::MAX))
    }

    /// The day of this week with the given weekday.
    pub fn at(&self, weekday: Weekday) -> Result<PlainDate, TimeError> {
        PlainDate::of_mjd(self.monday_mjd() + weekday.value() as i64 - 1)
    }

    /// All days of the week in order.
    pub fn days(&self) -> impl Iterator<Item = PlainDate> {
        (self.first_mjd()..=self.last_mjd()).filter_map(|mjd| PlainDate::of_mjd(mjd).ok())
    }

    /// Number of days; 7 except at the ends of the range.
    pub fn length(&self) -> u8 {
        (self.last_mjd() - self.first_mjd() + 1) as u8
    }

    // ── relations ─────────────────────────────────────────────────────

    pub fn contains(&self, date: PlainDate) -> bool {
        (self.first_mjd()..=self.last_mjd()).contains(&date.mjd())
    }

    /// `true` when the week starts after `date`.
    pub fn is_after(&self, date: PlainDate) -> bool {
        date.mjd() < self.first_mjd()
    }

    /// `true` when the week ends before `date`.
    pub fn is_before(&self, date: PlainDate) -> bool {
        self.last_mjd() < date.mjd()
    }

    pub fn is_after_week(&self, other: &CalendarWeek) -> bool {
        self > other
    }

    pub fn is_before_week(&self, other: &CalendarWeek) -> bool {
        self < other
    }

    pub fn is_simultaneous(&self, other: &CalendarWeek) -> bool {
        self == other
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Same week number in another year; week 53 becomes 52 where the
    /// target year has no week 53.
    pub fn plus_years(&self, years: i64) -> Result<Self, TimeError> {
        let year = (self.year as i64)
            .checked_add(years)
            .filter(|y| (MIN_YEAR as i64..=MAX_YEAR as i64).contains(y))
            .ok_or_else(|| TimeError::InvalidArgument(format!("{self} + {years} years is out of range")))?;
        let week = self.week.min(gregorian::weeks_in_year(year));
        Self::of(year as i32, week)
    }

    pub fn minus_years(&self, years: i64) -> Result<Self, TimeError> {
        let negated = years
            .checked_neg()
            .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {years}")))?;
        self.plus_years(negated)
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, TimeError> {
        let out_of_range = || TimeError::InvalidArgument(format!("{self} + {weeks} weeks is out of range"));
        let mjd = weeks
            .checked_mul(7)
            .and_then(|days| self.monday_mjd().checked_add(days))
            .ok_or_else(out_of_range)?;
        let (year, week) = gregorian::week_date_of(mjd);
        if !(MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year) {
            return Err(out_of_range());
        }
        Self::of(year as i32, week)
    }

    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, TimeError> {
        let negated = weeks
            .checked_neg()
            .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {weeks}")))?;
        self.plus_weeks(negated)
    }

    /// Last week (52 or 53) of the same week-based year.
    pub fn with_last_week_of_year(&self) -> Self {
        Self {
            year: self.year,
            week: gregorian::weeks_in_year(self.year as i64),
        }
    }

    /// Closed date interval covering the week.
    pub fn to_interval(&self) -> DateInterval {
        DateInterval::closed(
            self.start().temporal().unwrap_or(PlainDate::MIN),
            self.end().temporal().unwrap_or(PlainDate::MAX),
        )
        .unwrap_or_else(|_| DateInterval::always())
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Parses `YYYY-Www` or `YYYYWww`; extended years may carry a sign.
    pub fn parse_iso(text: &str) -> Result<Self, TimeError> {
        let w = text
            .find('W')
            .ok_or_else(|| TimeError::parse("Missing week designator 'W'", text.len()))?;
        let year_text = &text[..w];
        let year = match year_text.strip_suffix('-') {
            Some(extended) => parse_year(extended, 0)?,
            None if year_text.starts_with(['+', '-']) => {
                return Err(TimeError::parse("Signed years need the extended format", 0))
            }
            None => parse_year(year_text, 0)?,
        };
        let week_text = &text[w + 1..];
        if week_text.len() != 2 || !week_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::parse("Two-digit week expected", w + 1));
        }
        let week: u8 = week_text
            .parse()
            .map_err(|_| TimeError::parse("Two-digit week expected", w + 1))?;
        Self::of(year, week).map_err(|e| TimeError::parse(e.to_string(), w + 1))
    }
}

impl From<PlainDate> for CalendarWeek {
    fn from(date: PlainDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for CalendarWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year as i64)?;
        write!(f, "-W{:02}", self.week)
    }
}

impl std::str::FromStr for CalendarWeek {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CalendarWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CalendarWeek {
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

    fn week(y: i32, w: u8) -> CalendarWeek {
        CalendarWeek::of(y, w).unwrap()
    }

    #[test]
    fn range_ends() {
        assert_eq!(week(MIN_YEAR, 1).at(Weekday::Monday).unwrap(), PlainDate::MIN);
        let last = week(MAX_YEAR, 52);
        assert_eq!(last.end(), Boundary::of_closed(PlainDate::MAX));
        assert_eq!(last.at(Weekday::Friday).unwrap(), PlainDate::MAX);
        assert!(last.at(Weekday::Saturday).is_err());
        assert_eq!(last.length(), 5);
    }

    #[test]
    fn validity() {
        assert!(CalendarWeek::of(2014, 53).is_err());
        assert!(CalendarWeek::is_valid(2015, 1));
        assert!(CalendarWeek::is_valid(2015, 53));
        assert!(!CalendarWeek::is_valid(2015, 0));
        assert!(!CalendarWeek::is_valid(2015, 54));
        assert!(CalendarWeek::is_valid(2016, 52));
        assert!(!CalendarWeek::is_valid(2016, 53));
    }

    #[test]
    fn construction_from_date() {
        assert_eq!(CalendarWeek::from_date(date(2016, 2, 29)), week(2016, 9));
        let w = week(2011, 4);
        assert_eq!(w.start(), Boundary::of_closed(date(2011, 1, 24)));
        assert_eq!(w.end(), Boundary::of_closed(date(2011, 1, 30)));
        assert_eq!(CalendarWeek::from(date(2016, 1, 3)), week(2015, 53));
    }

    #[test]
    fn ordering_and_days() {
        assert!(week(2012, 3) < week(2012, 4));
        let w = week(2012, 3);
        assert_eq!(w.at(Weekday::Monday).unwrap(), w.start().temporal().unwrap());
        assert_eq!(w.at(Weekday::Friday).unwrap(), date(2012, 1, 20));
        assert_eq!(w.length(), 7);
        let days: Vec<_> = w.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2012, 1, 16));
        assert_eq!(days[6], date(2012, 1, 22));
    }

    #[test]
    fn relations() {
        let w = week(2016, 24);
        assert!(!w.contains(date(2016, 6, 12)));
        assert!(w.contains(date(2016, 6, 13)));
        assert!(w.contains(date(2016, 6, 14)));
        assert!(w.contains(date(2016, 6, 19)));
        assert!(!w.contains(date(2016, 6, 20)));

        assert!(!w.is_after(date(2016, 6, 13)));
        assert!(w.is_after(date(2016, 6, 12)));
        assert!(w.is_after_week(&week(2016, 23)));
        assert!(!w.is_after_week(&week(2016, 24)));
        assert!(w.is_before(date(2016, 6, 20)));
        assert!(!w.is_before(date(2016, 6, 19)));
        assert!(w.is_before_week(&week(2016, 25)));
        assert!(w.is_simultaneous(&week(2016, 24)));
        assert!(!w.is_simultaneous(&week(2016, 25)));
    }

    #[test]
    fn year_arithmetic() {
        assert_eq!(week(2012, 24).plus_years(4).unwrap(), week(2016, 24));
        assert_eq!(week(2012, 24).minus_years(4).unwrap(), week(2008, 24));
        assert_eq!(week(2015, 53).plus_years(1).unwrap(), week(2016, 52));
        assert_eq!(week(2015, 53).minus_years(1).unwrap(), week(2014, 52));
        assert!(week(MAX_YEAR, 1).plus_years(1).is_err());
    }

    #[test]
    fn week_arithmetic() {
        assert_eq!(week(2012, 24).plus_weeks(7).unwrap(), week(2012, 31));
        assert_eq!(week(2016, 1).minus_weeks(7).unwrap(), week(2015, 47));
        assert_eq!(week(2015, 52).plus_weeks(1).unwrap(), week(2015, 53));
        assert_eq!(week(2015, 53).plus_weeks(1).unwrap(), week(2016, 1));
    }

    #[test]
    fn text() {
        assert_eq!(week(2012, 3).to_string(), "2012-W03");
        assert_eq!(CalendarWeek::parse_iso("2012-W03").unwrap(), week(2012, 3));
        assert_eq!("2012W03".parse::<CalendarWeek>().unwrap(), week(2012, 3));
        assert!(CalendarWeek::parse_iso("2012-W3").is_err());
        assert!(CalendarWeek::parse_iso("2014-W53").is_err());
        assert!(CalendarWeek::parse_iso("2012-03").is_err());
        assert_eq!(week(2015, 1).with_last_week_of_year(), week(2015, 53));
    }

    #[test]
    fn as_interval() {
        let iv = week(2016, 24).to_interval();
        assert_eq!(iv.length_in_days().unwrap(), 7);
        assert!(iv.contains(date(2016, 6, 19)));
        assert!(!iv.contains(date(2016, 6, 20)));
    }
}
