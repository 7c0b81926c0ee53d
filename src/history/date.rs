// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use super::era::HistoricEra;
use crate::error::TimeError;
use std::fmt;

/// A date in some historic calendar: era, year of era, month and day.
///
/// The year of era counts standard years starting on January 1st, whatever
/// new-year rule a [`super::ChronoHistory`] applies. Whether the date exists
/// depends on the history it is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoricDate {
    era: HistoricEra,
    year_of_era: i64,
    month: u8,
    day: u8,
}

impl HistoricDate {
    /// Checks the plain field ranges only.
    pub fn of(era: HistoricEra, year_of_era: i64, month: u8, day: u8) -> Result<Self, TimeError> {
        if year_of_era < 1 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(TimeError::InvalidDate(format!(
                "out of range: {}-{}-{}-{}",
                era, year_of_era, month, day
            )));
        }
        Ok(Self {
            era,
            year_of_era,
            month,
            day,
        })
    }

    pub(crate) const fn of_unchecked(era: HistoricEra, year_of_era: i64, month: u8, day: u8) -> Self {
        Self {
            era,
            year_of_era,
            month,
            day,
        }
    }

    pub const fn era(&self) -> HistoricEra {
        self.era
    }

    pub const fn year_of_era(&self) -> i64 {
        self.year_of_era
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    /// Standard year on the proleptic axis (1 BC = 0).
    pub const fn proleptic_year(&self) -> i64 {
        self.era.annum_domini(self.year_of_era)
    }
}

impl fmt::Display for HistoricDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:04}-{:02}-{:02}",
            self.era, self.year_of_era, self.month, self.day
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_proleptic_year() {
        let d = HistoricDate::of(HistoricEra::Ad, 1582, 10, 15).unwrap();
        assert_eq!(d.to_string(), "AD-1582-10-15");
        assert_eq!(d.proleptic_year(), 1582);
        let bc = HistoricDate::of(HistoricEra::Bc, 45, 1, 1).unwrap();
        assert_eq!(bc.to_string(), "BC-0045-01-01");
        assert_eq!(bc.proleptic_year(), -44);
    }

    #[test]
    fn rejects_plain_out_of_range_fields() {
        assert!(HistoricDate::of(HistoricEra::Ad, 0, 1, 1).is_err());
        assert!(HistoricDate::of(HistoricEra::Ad, 1, 13, 1).is_err());
        assert!(HistoricDate::of(HistoricEra::Ad, 1, 1, 32).is_err());
        assert!(HistoricDate::of(HistoricEra::Ad, 1, 1, 0).is_err());
    }
}
