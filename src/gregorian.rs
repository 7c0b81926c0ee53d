// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic.
//!
//! All functions are pure and operate on plain integers. Day numbers are
//! expressed as **Modified Julian Day** (MJD, day 0 = 1858-11-17), the epoch
//! used by every calendar and time-scale type of this crate.
//!
//! The conversion follows the era-based civil-from-days algorithm: a 400-year
//! Gregorian cycle holds exactly 146 097 days, so every date reduces to a
//! position inside one cycle plus a cycle count.

use crate::error::TimeError;
use crate::weekday::Weekday;

/// Smallest supported proleptic Gregorian year.
pub const MIN_YEAR: i32 = -999_999_999;

/// Largest supported proleptic Gregorian year.
pub const MAX_YEAR: i32 = 999_999_999;

/// MJD of 1970-01-01.
pub(crate) const MJD_OF_UNIX_EPOCH: i64 = 40_587;

/// Days from 0000-03-01 to 1970-01-01.
const DAYS_0000_03_01_TO_UNIX: i64 = 719_468;

/// Days in one 400-year Gregorian cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

/// MJD of `MIN_YEAR-01-01`.
pub const MIN_MJD: i64 = mjd_of(MIN_YEAR as i64, 1, 1);

/// MJD of `MAX_YEAR-12-31`.
pub const MAX_MJD: i64 = mjd_of(MAX_YEAR as i64, 12, 31);

// ═══════════════════════════════════════════════════════════════════════════
// Field predicates
// ═══════════════════════════════════════════════════════════════════════════

/// Gregorian leap-year rule: divisible by 4 and either not by 100 or by 400.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    is_leap(year as i64)
}

#[inline]
pub(crate) const fn is_leap(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` of `year`.
///
/// Fails with [`TimeError::InvalidDate`] when `month` is outside `1..=12`.
pub fn length_of_month(year: i32, month: u8) -> Result<u8, TimeError> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidDate(format!("month out of range: {month}")));
    }
    Ok(days_in_month(year as i64, month))
}

/// Unchecked month length; `month` must be in `1..=12`.
#[inline]
pub(crate) const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `true` when the triple names an existing date inside the supported range.
pub fn is_valid(year: i32, month: u8, day: u8) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(year as i64, month)
}

/// Validates a date triple.
///
/// # Errors
///
/// [`TimeError::InvalidDate`] naming the offending field.
pub fn check_date(year: i32, month: u8, day: u8) -> Result<(), TimeError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimeError::InvalidDate(format!("year out of range: {year}")));
    }
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidDate(format!("month out of range: {month}")));
    }
    let max = days_in_month(year as i64, month);
    if day < 1 || day > max {
        return Err(TimeError::InvalidDate(format!(
            "day out of range: {year:04}-{month:02}-{day:02}"
        )));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Day numbers
// ═══════════════════════════════════════════════════════════════════════════

/// Converts a validated Gregorian date to its MJD.
pub fn to_mjd(year: i32, month: u8, day: u8) -> Result<i64, TimeError> {
    check_date(year, month, day)?;
    Ok(mjd_of(year as i64, month, day))
}

/// Converts an MJD to a Gregorian `(year, month, day)` triple.
///
/// Fails with [`TimeError::InvalidDate`] outside `MIN_MJD..=MAX_MJD`.
pub fn from_mjd(mjd: i64) -> Result<(i32, u8, u8), TimeError> {
    if !(MIN_MJD..=MAX_MJD).contains(&mjd) {
        return Err(TimeError::InvalidDate(format!("MJD out of range: {mjd}")));
    }
    let (y, m, d) = ymd_of(mjd);
    Ok((y as i32, m, d))
}

/// ISO weekday of an MJD (MJD 0 was a Wednesday).
#[inline]
pub fn day_of_week(mjd: i64) -> Weekday {
    Weekday::from_mjd(mjd)
}

/// Unchecked date → MJD; valid for any `i64` year small enough not to overflow.
pub(crate) const fn mjd_of(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_CYCLE + doe - DAYS_0000_03_01_TO_UNIX + MJD_OF_UNIX_EPOCH
}

/// Unchecked MJD → date.
pub(crate) const fn ymd_of(mjd: i64) -> (i64, u8, u8) {
    let z = mjd - MJD_OF_UNIX_EPOCH + DAYS_0000_03_01_TO_UNIX;
    let era = z.div_euclid(DAYS_PER_CYCLE);
    let doe = z - era * DAYS_PER_CYCLE;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
    (y, m as u8, d as u8)
}

// ── ISO week-based year ───────────────────────────────────────────────

/// MJD of the Monday that starts week 1 of the ISO week-based `year`.
///
/// Week 1 is the week containing January 4th.
pub(crate) fn week_one_start(year: i64) -> i64 {
    let jan4 = mjd_of(year, 1, 4);
    jan4 - (Weekday::from_mjd(jan4).value() as i64 - 1)
}

/// Number of ISO weeks (52 or 53) in the week-based `year`.
pub(crate) fn weeks_in_year(year: i64) -> u8 {
    ((week_one_start(year + 1) - week_one_start(year)) / 7) as u8
}

/// `(week-based year, week)` of an MJD.
pub(crate) fn week_date_of(mjd: i64) -> (i64, u8) {
    let (year, _, _) = ymd_of(mjd);
    let mut wby = year;
    if mjd < week_one_start(year) {
        wby = year - 1;
    } else if mjd >= week_one_start(year + 1) {
        wby = year + 1;
    }
    let week = (mjd - week_one_start(wby)) / 7 + 1;
    (wby, week as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2015));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(length_of_month(2016, 2).unwrap(), 29);
        assert_eq!(length_of_month(2015, 2).unwrap(), 28);
        assert_eq!(length_of_month(2015, 4).unwrap(), 30);
        assert_eq!(length_of_month(2015, 12).unwrap(), 31);
        assert!(matches!(
            length_of_month(2015, 13),
            Err(TimeError::InvalidDate(_))
        ));
    }

    #[test]
    fn validity() {
        assert!(is_valid(2016, 2, 29));
        assert!(!is_valid(2015, 2, 29));
        assert!(!is_valid(2015, 0, 1));
        assert!(!is_valid(2015, 1, 0));
        assert!(!is_valid(MAX_YEAR + 1, 1, 1));
        assert!(check_date(2015, 2, 29).is_err());
    }

    #[test]
    fn known_mjd_values() {
        assert_eq!(to_mjd(1858, 11, 17).unwrap(), 0);
        assert_eq!(to_mjd(1970, 1, 1).unwrap(), 40_587);
        assert_eq!(to_mjd(1972, 1, 1).unwrap(), 41_317);
        assert_eq!(to_mjd(2000, 1, 1).unwrap(), 51_544);
        assert_eq!(from_mjd(51_544).unwrap(), (2000, 1, 1));
        assert_eq!(from_mjd(-1).unwrap(), (1858, 11, 16));
    }

    #[test]
    fn range_limits() {
        assert_eq!(from_mjd(MIN_MJD).unwrap(), (MIN_YEAR, 1, 1));
        assert_eq!(from_mjd(MAX_MJD).unwrap(), (MAX_YEAR, 12, 31));
        assert!(from_mjd(MAX_MJD + 1).is_err());
        assert!(from_mjd(MIN_MJD - 1).is_err());
    }

    #[test]
    fn weekdays() {
        assert_eq!(day_of_week(0), Weekday::Wednesday);
        assert_eq!(day_of_week(to_mjd(2016, 2, 29).unwrap()), Weekday::Monday);
        assert_eq!(day_of_week(to_mjd(1582, 10, 15).unwrap()), Weekday::Friday);
    }

    #[test]
    fn iso_weeks() {
        assert_eq!(weeks_in_year(2015), 53);
        assert_eq!(weeks_in_year(2016), 52);
        assert_eq!(weeks_in_year(2020), 53);
        assert_eq!(week_date_of(mjd_of(2016, 2, 29)), (2016, 9));
        assert_eq!(week_date_of(mjd_of(2016, 1, 3)), (2015, 53));
        assert_eq!(week_date_of(mjd_of(2014, 12, 29)), (2015, 1));
    }

    #[test]
    fn mjd_roundtrip_across_centuries() {
        for year in [-4713_i64, -1, 0, 1, 1582, 1900, 2000, 2400, 9999] {
            for month in 1..=12u8 {
                for day in [1, days_in_month(year, month)] {
                    let mjd = mjd_of(year, month, day);
                    assert_eq!(ymd_of(mjd), (year, month, day));
                }
            }
        }
    }
}
