// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Historic eras and era preferences.

use crate::date::PlainDate;
use std::fmt;

/// An era of the historic calendar.
///
/// Year numbers of an era convert to proleptic years (1 BC = 0) with a fixed
/// offset; `Bc` counts backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HistoricEra {
    /// Before Christ.
    Bc,
    /// Anno Domini.
    Ad,
    /// Spanish era, 38 years ahead of AD.
    Hispanic,
    /// Byzantine world era, counting from 5509 BC.
    Byzantine,
    /// Years since the founding of Rome (753 BC).
    AbUrbeCondita,
}

impl HistoricEra {
    /// Proleptic year of `year_of_era` in this era.
    pub const fn annum_domini(self, year_of_era: i64) -> i64 {
        match self {
            HistoricEra::Bc => 1 - year_of_era,
            HistoricEra::Ad => year_of_era,
            HistoricEra::Hispanic => year_of_era - 38,
            HistoricEra::Byzantine => year_of_era - 5_508,
            HistoricEra::AbUrbeCondita => year_of_era - 753,
        }
    }

    /// Year of era of a proleptic year.
    pub const fn year_of_era(self, proleptic: i64) -> i64 {
        match self {
            HistoricEra::Bc => 1 - proleptic,
            HistoricEra::Ad => proleptic,
            HistoricEra::Hispanic => proleptic + 38,
            HistoricEra::Byzantine => proleptic + 5_508,
            HistoricEra::AbUrbeCondita => proleptic + 753,
        }
    }

    /// Largest year of era inside the supported range (AD 9999, 5509 BC).
    pub const fn max_year_of_era(self) -> i64 {
        match self {
            HistoricEra::Bc => 5_509,
            _ => self.year_of_era(9_999),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            HistoricEra::Bc => "BC",
            HistoricEra::Ad => "AD",
            HistoricEra::Hispanic => "HISPANIC",
            HistoricEra::Byzantine => "BYZANTINE",
            HistoricEra::AbUrbeCondita => "AB_URBE_CONDITA",
        }
    }
}

impl fmt::Display for HistoricEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Era used instead of BC/AD during a period of a regional history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EraPreference {
    era: Option<HistoricEra>,
    start: i64,
    end: i64,
}

impl EraPreference {
    /// Plain BC/AD everywhere.
    pub const DEFAULT: EraPreference = EraPreference {
        era: None,
        start: i64::MIN,
        end: i64::MIN,
    };

    /// Hispanic era for all days before `end` (a Gregorian date).
    pub fn hispanic_until(end: PlainDate) -> Self {
        Self::between(HistoricEra::Hispanic, i64::MIN, end.mjd())
    }

    /// Hispanic era for days in `[start, end)`.
    pub fn hispanic_between(start: PlainDate, end: PlainDate) -> Self {
        Self::between(HistoricEra::Hispanic, start.mjd(), end.mjd())
    }

    /// Byzantine era for all days before `end` (a Gregorian date).
    pub fn byzantine_until(end: PlainDate) -> Self {
        Self::between(HistoricEra::Byzantine, i64::MIN, end.mjd())
    }

    /// Byzantine era for days in `[start, end)`.
    pub fn byzantine_between(start: PlainDate, end: PlainDate) -> Self {
        Self::between(HistoricEra::Byzantine, start.mjd(), end.mjd())
    }

    pub(crate) const fn everywhere(era: HistoricEra) -> Self {
        Self::between(era, i64::MIN, i64::MAX)
    }

    const fn between(era: HistoricEra, start: i64, end: i64) -> Self {
        Self {
            era: Some(era),
            start,
            end,
        }
    }

    pub fn is_default(&self) -> bool {
        self.era.is_none()
    }

    /// Era to display for a day with the given historic year (proleptic).
    ///
    /// A preferred era is only used where its year of era is positive.
    pub(crate) fn era_of(&self, mjd: i64, historic_year: i64) -> HistoricEra {
        if let Some(era) = self.era {
            if mjd >= self.start && mjd < self.end && era.year_of_era(historic_year) >= 1 {
                return era;
            }
        }
        if historic_year <= 0 {
            HistoricEra::Bc
        } else {
            HistoricEra::Ad
        }
    }
}

impl Default for EraPreference {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_offsets_roundtrip() {
        for era in [
            HistoricEra::Bc,
            HistoricEra::Ad,
            HistoricEra::Hispanic,
            HistoricEra::Byzantine,
            HistoricEra::AbUrbeCondita,
        ] {
            for year in [1_i64, 38, 753, 5_508, 7_208] {
                assert_eq!(era.year_of_era(era.annum_domini(year)), year);
            }
        }
        assert_eq!(HistoricEra::Bc.annum_domini(1), 0);
        assert_eq!(HistoricEra::Byzantine.year_of_era(1700), 7_208);
        assert_eq!(HistoricEra::AbUrbeCondita.year_of_era(-752), 1);
    }

    #[test]
    fn preference_applies_inside_its_window() {
        let end = PlainDate::of(1700, 1, 11).unwrap();
        let pref = EraPreference::byzantine_until(end);
        assert_eq!(pref.era_of(end.mjd() - 1, 1700), HistoricEra::Byzantine);
        assert_eq!(pref.era_of(end.mjd(), 1700), HistoricEra::Ad);
        assert_eq!(EraPreference::DEFAULT.era_of(0, 0), HistoricEra::Bc);
    }

    #[test]
    fn max_years() {
        assert_eq!(HistoricEra::Ad.max_year_of_era(), 9_999);
        assert_eq!(HistoricEra::Byzantine.max_year_of_era(), 15_507);
    }
}
