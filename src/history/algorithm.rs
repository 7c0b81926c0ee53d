// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-count algorithms of the calendars used in historic segments.

use crate::gregorian;

/// Days added to Julian day numbers so that the integer formulas stay on
/// non-negative values: 8000 Julian years.
const JULIAN_SHIFT_DAYS: i64 = 2_922_000;
const JULIAN_SHIFT_YEARS: i64 = 8_000;

/// JDN at the start of MJD 0 is `MJD + 2 400 001`.
const JDN_OF_MJD_ZERO: i64 = 2_400_001;

/// Calendar algorithm of one segment of a [`super::ChronoHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarAlgorithm {
    /// Proleptic Gregorian rules.
    Gregorian,
    /// Julian rules: every fourth year is a leap year.
    Julian,
    /// The Swedish calendar of 1700–1712: one day behind the Julian calendar,
    /// with the extra date 1712-02-30.
    Swedish,
}

impl CalendarAlgorithm {
    /// `true` if the algorithm knows the field triple (year is proleptic,
    /// 1 BC = 0).
    pub fn is_valid(self, year: i64, month: u8, day: u8) -> bool {
        (1..=12).contains(&month) && day >= 1 && day <= self.length_of_month(year, month)
    }

    /// Days in the month; `month` must be in `1..=12`.
    pub fn length_of_month(self, year: i64, month: u8) -> u8 {
        match self {
            CalendarAlgorithm::Gregorian => gregorian::days_in_month(year, month),
            CalendarAlgorithm::Julian => julian_days_in_month(year, month),
            CalendarAlgorithm::Swedish => {
                if year == 1712 && month == 2 {
                    30
                } else {
                    julian_days_in_month(year, month)
                }
            }
        }
    }

    /// Modified Julian Day of a valid triple.
    pub fn to_mjd(self, year: i64, month: u8, day: u8) -> i64 {
        match self {
            CalendarAlgorithm::Gregorian => gregorian::mjd_of(year, month, day),
            CalendarAlgorithm::Julian => julian_mjd(year, month, day),
            CalendarAlgorithm::Swedish => {
                if year == 1712 && month == 2 && day == 30 {
                    julian_mjd(1712, 3, 1) - 1
                } else {
                    julian_mjd(year, month, day) - 1
                }
            }
        }
    }

    /// Field triple of a Modified Julian Day.
    pub fn from_mjd(self, mjd: i64) -> (i64, u8, u8) {
        match self {
            CalendarAlgorithm::Gregorian => gregorian::ymd_of(mjd),
            CalendarAlgorithm::Julian => julian_ymd(mjd),
            CalendarAlgorithm::Swedish => match julian_ymd(mjd + 1) {
                (1712, 3, 1) => (1712, 2, 30),
                other => other,
            },
        }
    }
}

fn julian_days_in_month(year: i64, month: u8) -> u8 {
    match month {
        2 if year.rem_euclid(4) == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn julian_mjd(year: i64, month: u8, day: u8) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year + JULIAN_SHIFT_YEARS + 4_800 - a;
    let m = month as i64 + 12 * a - 3;
    let jdn = day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32_083;
    jdn - JULIAN_SHIFT_DAYS - JDN_OF_MJD_ZERO
}

fn julian_ymd(mjd: i64) -> (i64, u8, u8) {
    let jdn = mjd + JDN_OF_MJD_ZERO + JULIAN_SHIFT_DAYS;
    let c = jdn + 32_082;
    let d = (4 * c + 3).div_euclid(1_461);
    let e = c - (1_461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4_800 + m / 10 - JULIAN_SHIFT_YEARS;
    (year, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_and_gregorian_meet_at_first_reform() {
        let gregorian_start = CalendarAlgorithm::Gregorian.to_mjd(1582, 10, 15);
        assert_eq!(gregorian_start, -100_840);
        assert_eq!(CalendarAlgorithm::Julian.to_mjd(1582, 10, 4), gregorian_start - 1);
        assert_eq!(CalendarAlgorithm::Julian.from_mjd(gregorian_start), (1582, 10, 5));
    }

    #[test]
    fn julian_epoch_of_julian_period() {
        // JD 0 began at noon of 4713 BC (proleptic -4712) January 1st.
        assert_eq!(CalendarAlgorithm::Julian.to_mjd(-4712, 1, 1), -2_400_001);
    }

    #[test]
    fn julian_roundtrip_over_supported_range() {
        for year in [-5508_i64, -4712, -1, 0, 1, 1000, 1700, 1712, 9999] {
            for month in 1..=12u8 {
                let last = CalendarAlgorithm::Julian.length_of_month(year, month);
                for day in [1, last] {
                    let mjd = CalendarAlgorithm::Julian.to_mjd(year, month, day);
                    assert_eq!(CalendarAlgorithm::Julian.from_mjd(mjd), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn julian_leap_years() {
        assert_eq!(CalendarAlgorithm::Julian.length_of_month(1700, 2), 29);
        assert_eq!(CalendarAlgorithm::Gregorian.length_of_month(1700, 2), 28);
        assert_eq!(CalendarAlgorithm::Julian.length_of_month(-1, 2), 28);
        assert_eq!(CalendarAlgorithm::Julian.length_of_month(0, 2), 29);
    }

    #[test]
    fn swedish_calendar_is_one_day_behind() {
        let sw = CalendarAlgorithm::Swedish;
        let ju = CalendarAlgorithm::Julian;
        assert_eq!(sw.to_mjd(1700, 3, 1), ju.to_mjd(1700, 2, 29));
        assert_eq!(sw.length_of_month(1712, 2), 30);
        assert!(sw.is_valid(1712, 2, 30));
        assert!(!ju.is_valid(1712, 2, 30));
        assert_eq!(sw.to_mjd(1712, 2, 30), ju.to_mjd(1712, 2, 29));
        assert_eq!(sw.from_mjd(ju.to_mjd(1712, 2, 29)), (1712, 2, 30));
        assert_eq!(sw.from_mjd(ju.to_mjd(1712, 2, 28)), (1712, 2, 29));
    }
}
