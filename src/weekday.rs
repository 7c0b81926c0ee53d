// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO day of week.

use crate::error::TimeError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Day of week with ISO numbering (Monday = 1 … Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// ISO number, 1 (Monday) to 7 (Sunday).
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Weekday::value`].
    pub fn from_value(value: u8) -> Result<Self, TimeError> {
        match value {
            1..=7 => Ok(Self::ALL[value as usize - 1]),
            _ => Err(TimeError::InvalidArgument(format!(
                "weekday out of range: {value}"
            ))),
        }
    }

    /// Weekday of a Modified Julian Day.
    #[inline]
    pub fn from_mjd(mjd: i64) -> Self {
        Self::ALL[(mjd + 2).rem_euclid(7) as usize]
    }

    /// Rolls forward (or backward for negative `days`) through the week.
    #[inline]
    pub fn plus(self, days: i64) -> Self {
        Self::ALL[(self as i64 - 1 + days).rem_euclid(7) as usize]
    }

    /// Converts to chrono's weekday.
    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        Self::ALL[value.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering() {
        assert_eq!(Weekday::Monday.value(), 1);
        assert_eq!(Weekday::Sunday.value(), 7);
        assert_eq!(Weekday::from_value(5).unwrap(), Weekday::Friday);
        assert!(Weekday::from_value(0).is_err());
        assert!(Weekday::from_value(8).is_err());
    }

    #[test]
    fn rolling() {
        assert_eq!(Weekday::Sunday.plus(1), Weekday::Monday);
        assert_eq!(Weekday::Monday.plus(-1), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.plus(14), Weekday::Wednesday);
    }

    #[test]
    fn chrono_interop() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from(day.to_chrono()), day);
        }
    }
}
