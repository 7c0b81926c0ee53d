// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A calendar date bound to a [`ChronoHistory`].
//!
//! Element bounds depend on the context: a cutover month has fewer days, a
//! year with a late new-year day has a different length, and so on.
//!
//! | Element | Value | Minimum | Maximum |
//! |---------|-------|---------|---------|
//! | [`HistoricElement::CenturyOfEra`] | century of the historic year | 1 | by era |
//! | [`HistoricElement::YearOfEra`] | historic year (after new year) | 1 | by era |
//! | [`HistoricElement::RelatedStandardYear`] | year starting January 1st | 1 | by era |
//! | [`HistoricElement::MonthOfYear`] | 1–12 | 1 | 12 |
//! | [`HistoricElement::DayOfMonth`] | day number | first valid day | last valid day |
//! | [`HistoricElement::DayOfYear`] | from the new-year day | 1 | length of year |
//! | [`HistoricElement::DayOfWeek`] | ISO 1 (Monday) – 7 | 1 | 7 |
//! | [`HistoricElement::WeekdayInMonth`] | n-th such weekday among valid days | 1 | by month |

use super::{ChronoHistory, HistoricDate, HistoricEra, MonthSpan, YearDefinition};
use crate::date::PlainDate;
use crate::error::TimeError;
use crate::weekday::Weekday;
use std::fmt;
use std::sync::Arc;

/// Numeric elements of a [`HistoricCalendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoricElement {
    CenturyOfEra,
    YearOfEra,
    RelatedStandardYear,
    MonthOfYear,
    DayOfMonth,
    DayOfYear,
    DayOfWeek,
    WeekdayInMonth,
}

/// Operators applied to one element with [`HistoricCalendar::with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementOperator {
    /// Sets the element to its contextual minimum.
    Minimized,
    /// Sets the element to its contextual maximum.
    Maximized,
    /// Moves one unit of the element forward.
    Incremented,
    /// Moves one unit of the element backward.
    Decremented,
    /// Keeps the element, moves the next finer element to its minimum.
    AtFloor,
    /// Keeps the element, moves the next finer element to its maximum.
    AtCeiling,
}

/// A date of a historic calendar.
///
/// Equality compares the history and the day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoricCalendar {
    history: Arc<ChronoHistory>,
    mjd: i64,
    date: HistoricDate,
}

impl HistoricCalendar {
    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Date with a standard year of era (dual dating).
    pub fn of(
        history: impl Into<Arc<ChronoHistory>>,
        era: HistoricEra,
        year_of_era: i64,
        month: u8,
        day: u8,
    ) -> Result<Self, TimeError> {
        Self::of_year_definition(history, era, year_of_era, YearDefinition::DualDating, month, day)
    }

    /// Date whose year of era is read under `definition`.
    pub fn of_year_definition(
        history: impl Into<Arc<ChronoHistory>>,
        era: HistoricEra,
        year_of_era: i64,
        definition: YearDefinition,
        month: u8,
        day: u8,
    ) -> Result<Self, TimeError> {
        let history = history.into();
        let date = history.date(era, year_of_era, definition, month, day)?;
        let mjd = history.to_mjd(&date)?;
        Self::of_mjd(history, mjd)
    }

    /// Historic date of a (proleptic) Gregorian date.
    pub fn from_gregorian(history: impl Into<Arc<ChronoHistory>>, date: PlainDate) -> Result<Self, TimeError> {
        Self::of_mjd(history, date.mjd())
    }

    /// Historic date of a Modified Julian Day.
    pub fn of_mjd(history: impl Into<Arc<ChronoHistory>>, mjd: i64) -> Result<Self, TimeError> {
        let history = history.into();
        let date = history.to_historic(mjd)?;
        Ok(Self { history, mjd, date })
    }

    fn at(&self, mjd: i64) -> Result<Self, TimeError> {
        Self::of_mjd(Arc::clone(&self.history), mjd)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Fields
    // ═══════════════════════════════════════════════════════════════════

    pub fn history(&self) -> &ChronoHistory {
        &self.history
    }

    pub fn variant(&self) -> String {
        self.history.variant()
    }

    /// Field view with the standard year of era.
    pub fn date(&self) -> HistoricDate {
        self.date
    }

    pub fn mjd(&self) -> i64 {
        self.mjd
    }

    pub fn to_gregorian(&self) -> Result<PlainDate, TimeError> {
        PlainDate::of_mjd(self.mjd)
    }

    pub fn era(&self) -> HistoricEra {
        self.date.era()
    }

    /// Historic year of era, counted from the regional new-year day.
    pub fn year(&self) -> i64 {
        self.year_of_era(YearDefinition::AfterNewYear)
    }

    pub fn year_of_era(&self, definition: YearDefinition) -> i64 {
        self.history.year_of_era(&self.date, definition)
    }

    pub fn century(&self) -> i64 {
        (self.year() - 1).div_euclid(100) + 1
    }

    pub fn month(&self) -> u8 {
        self.date.month()
    }

    pub fn day_of_month(&self) -> u8 {
        self.date.day_of_month()
    }

    pub fn day_of_week(&self) -> Weekday {
        Weekday::from_mjd(self.mjd)
    }

    pub fn day_of_year(&self) -> u32 {
        (self.mjd - self.history.year_start(self.historic_year()) + 1) as u32
    }

    /// Number of valid days in the current month.
    pub fn length_of_month(&self) -> u8 {
        self.month_span().length
    }

    /// Number of days in the current historic year.
    pub fn length_of_year(&self) -> u32 {
        self.history.year_length(self.historic_year())
    }

    // ── internals ────────────────────────────────────────────────────

    fn historic_year(&self) -> i64 {
        self.history.historic_year_of(&self.date)
    }

    fn month_span(&self) -> MonthSpan {
        self.history
            .month_span(self.date.proleptic_year(), self.date.month())
            .unwrap_or(MonthSpan {
                first_day: self.day_of_month(),
                last_day: self.day_of_month(),
                first_mjd: self.mjd,
                length: 1,
            })
    }

    fn position_in_month(&self) -> i64 {
        self.mjd - self.month_span().first_mjd
    }

    fn max_year_of_era(&self) -> i64 {
        self.era().max_year_of_era()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Elements
    // ═══════════════════════════════════════════════════════════════════

    pub fn get(&self, element: HistoricElement) -> i64 {
        match element {
            HistoricElement::CenturyOfEra => self.century(),
            HistoricElement::YearOfEra => self.year(),
            HistoricElement::RelatedStandardYear => self.date.year_of_era(),
            HistoricElement::MonthOfYear => self.month() as i64,
            HistoricElement::DayOfMonth => self.day_of_month() as i64,
            HistoricElement::DayOfYear => self.day_of_year() as i64,
            HistoricElement::DayOfWeek => self.day_of_week().value() as i64,
            HistoricElement::WeekdayInMonth => self.position_in_month() / 7 + 1,
        }
    }

    pub fn minimum(&self, element: HistoricElement) -> i64 {
        match element {
            HistoricElement::DayOfMonth => self.month_span().first_day as i64,
            _ => 1,
        }
    }

    pub fn maximum(&self, element: HistoricElement) -> i64 {
        match element {
            HistoricElement::CenturyOfEra => (self.max_year_of_era() - 1) / 100 + 1,
            HistoricElement::YearOfEra | HistoricElement::RelatedStandardYear => self.max_year_of_era(),
            HistoricElement::MonthOfYear => 12,
            HistoricElement::DayOfMonth => self.month_span().last_day as i64,
            HistoricElement::DayOfYear => self.length_of_year() as i64,
            HistoricElement::DayOfWeek => 7,
            HistoricElement::WeekdayInMonth => {
                let span = self.month_span();
                let pos = self.position_in_month();
                (span.length as i64 - 1 - pos % 7) / 7 + 1
            }
        }
    }

    /// Sets `element` to `value`, which must lie within the contextual bounds.
    pub fn with_value(&self, element: HistoricElement, value: i64) -> Result<Self, TimeError> {
        let (min, max) = (self.minimum(element), self.maximum(element));
        if value < min || value > max {
            return Err(TimeError::InvalidArgument(format!(
                "{element:?} out of range [{min}, {max}]: {value}"
            )));
        }
        let current = self.get(element);
        match element {
            HistoricElement::CenturyOfEra => self.plus_years_of_era((value - current) * 100),
            HistoricElement::YearOfEra => self.plus_years_of_era(value - current),
            HistoricElement::RelatedStandardYear => self.plus_years_of_era(value - current),
            HistoricElement::MonthOfYear => self.plus_months(value - current),
            HistoricElement::DayOfMonth => {
                let date = HistoricDate::of(self.era(), self.date.year_of_era(), self.month(), value as u8)?;
                let mjd = self.history.to_mjd(&date)?;
                self.at(mjd)
            }
            HistoricElement::DayOfYear | HistoricElement::DayOfWeek => self.plus_days(value - current),
            HistoricElement::WeekdayInMonth => self.plus_days((value - current) * 7),
        }
    }

    /// Applies an element operator.
    ///
    /// ```
    /// use tempora::{ChronoHistory, ElementOperator, HistoricCalendar, HistoricElement, HistoricEra};
    ///
    /// let rome = ChronoHistory::of_first_gregorian_reform();
    /// let cal = HistoricCalendar::of(rome, HistoricEra::Ad, 1582, 9, 10).unwrap();
    /// let next = cal.with(HistoricElement::MonthOfYear, ElementOperator::Incremented).unwrap();
    /// assert_eq!(next.day_of_month(), 4);
    /// ```
    pub fn with(&self, element: HistoricElement, operator: ElementOperator) -> Result<Self, TimeError> {
        match operator {
            ElementOperator::Minimized => self.with_value(element, self.minimum(element)),
            ElementOperator::Maximized => self.with_value(element, self.maximum(element)),
            ElementOperator::Incremented => self.step(element, 1),
            ElementOperator::Decremented => self.step(element, -1),
            ElementOperator::AtFloor => match finer_element(element) {
                Some(finer) => self.with_value(finer, self.minimum(finer)),
                None => Ok(self.clone()),
            },
            ElementOperator::AtCeiling => match finer_element(element) {
                Some(finer) => self.with_value(finer, self.maximum(finer)),
                None => Ok(self.clone()),
            },
        }
    }

    fn step(&self, element: HistoricElement, delta: i64) -> Result<Self, TimeError> {
        match element {
            HistoricElement::CenturyOfEra => self.plus_years_of_era(delta * 100),
            HistoricElement::YearOfEra | HistoricElement::RelatedStandardYear => self.plus_years_of_era(delta),
            HistoricElement::MonthOfYear => self.plus_months(delta),
            HistoricElement::DayOfMonth | HistoricElement::DayOfYear | HistoricElement::DayOfWeek => {
                self.plus_days(delta)
            }
            HistoricElement::WeekdayInMonth => self.plus_days(delta * 7),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Arithmetic
    // ═══════════════════════════════════════════════════════════════════

    pub fn plus_days(&self, days: i64) -> Result<Self, TimeError> {
        let mjd = self
            .mjd
            .checked_add(days)
            .ok_or_else(|| TimeError::InvalidDate(format!("day overflow: {self} + {days}")))?;
        self.at(mjd)
    }

    pub fn minus_days(&self, days: i64) -> Result<Self, TimeError> {
        self.plus_days(days.checked_neg().unwrap_or(i64::MAX))
    }

    pub fn next_day(&self) -> Result<Self, TimeError> {
        self.plus_days(1)
    }

    /// Adds standard months. A day that does not exist in the target month
    /// becomes the nearest earlier valid day, or the first valid day when
    /// there is none before it.
    pub fn plus_months(&self, months: i64) -> Result<Self, TimeError> {
        let index = (self.date.proleptic_year() * 12 + self.month() as i64 - 1)
            .checked_add(months)
            .ok_or_else(|| TimeError::InvalidArgument(format!("month overflow: {self} + {months}")))?;
        self.at_adjusted_day(index.div_euclid(12), (index.rem_euclid(12) + 1) as u8)
    }

    /// Adds standard years with the same day adjustment as
    /// [`HistoricCalendar::plus_months`].
    pub fn plus_years(&self, years: i64) -> Result<Self, TimeError> {
        let year = self
            .date
            .proleptic_year()
            .checked_add(years)
            .ok_or_else(|| TimeError::InvalidArgument(format!("year overflow: {self} + {years}")))?;
        self.at_adjusted_day(year, self.month())
    }

    /// Years of era run backwards before Christ.
    fn plus_years_of_era(&self, years: i64) -> Result<Self, TimeError> {
        match self.era() {
            HistoricEra::Bc => self.plus_years(years.checked_neg().ok_or_else(|| {
                TimeError::InvalidArgument(format!("year overflow: {self} - {years}"))
            })?),
            _ => self.plus_years(years),
        }
    }

    fn at_adjusted_day(&self, year: i64, month: u8) -> Result<Self, TimeError> {
        let span = self
            .history
            .month_span(year, month)
            .ok_or_else(|| TimeError::InvalidDate(format!("out of historic range: {year}-{month:02}")))?;
        let day = self.day_of_month();
        let mjd = match self.history.resolve(year, month, day) {
            Some(mjd) if (span.first_day..=span.last_day).contains(&day) => mjd,
            // Largest valid day below the requested one, else the first.
            _ => (span.first_day..day.min(span.last_day + 1))
                .rev()
                .find_map(|d| self.history.resolve(year, month, d))
                .unwrap_or(span.first_mjd),
        };
        self.at(mjd)
    }

    /// First day of the current historic year.
    pub fn with_new_year(&self) -> Result<Self, TimeError> {
        self.at(self.history.year_start(self.historic_year()))
    }
}

/// Element that floor/ceiling operators move.
fn finer_element(element: HistoricElement) -> Option<HistoricElement> {
    match element {
        HistoricElement::CenturyOfEra
        | HistoricElement::YearOfEra
        | HistoricElement::RelatedStandardYear => Some(HistoricElement::DayOfYear),
        HistoricElement::MonthOfYear => Some(HistoricElement::DayOfMonth),
        _ => None,
    }
}

impl fmt::Display for HistoricCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.date, self.history.variant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HistoricElement::*;

    fn cal(history: &Arc<ChronoHistory>, year: i64, month: u8, day: u8) -> HistoricCalendar {
        HistoricCalendar::of(Arc::clone(history), HistoricEra::Ad, year, month, day).unwrap()
    }

    fn op(c: &HistoricCalendar, element: HistoricElement, operator: ElementOperator) -> HistoricCalendar {
        c.with(element, operator).unwrap()
    }

    #[test]
    fn rome() {
        let h = Arc::new(ChronoHistory::of_first_gregorian_reform());
        let c = cal(&h, 1582, 10, 17);
        assert_eq!(c.era(), HistoricEra::Ad);
        assert_eq!(c.century(), 16);
        assert_eq!(c.year(), 1582);
        assert_eq!(c.day_of_year(), 280);
        assert_eq!(c.day_of_week(), Weekday::Sunday);
        assert_eq!(c.length_of_month(), 21);
        assert_eq!(c.length_of_year(), 355);
        assert_eq!(c.get(WeekdayInMonth), 1);
        assert_eq!(c.get(RelatedStandardYear), 1582);

        assert_eq!(c.minimum(DayOfMonth), 1);
        assert_eq!(c.maximum(CenturyOfEra), 100);
        assert_eq!(c.maximum(RelatedStandardYear), 9999);
        assert_eq!(c.maximum(DayOfMonth), 31);
        assert_eq!(c.maximum(DayOfYear), 355);
        assert_eq!(c.maximum(WeekdayInMonth), 3);

        assert_eq!(op(&c, WeekdayInMonth, ElementOperator::Maximized), cal(&h, 1582, 10, 31));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Minimized), cal(&h, 1582, 10, 1));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Minimized), cal(&h, 1582, 1, 1));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Maximized), cal(&h, 1582, 10, 31));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Maximized), cal(&h, 1582, 12, 31));

        assert_eq!(cal(&h, 1582, 10, 4).next_day().unwrap(), cal(&h, 1582, 10, 15));
        let g = HistoricCalendar::from_gregorian(Arc::clone(&h), PlainDate::of(1582, 10, 5).unwrap()).unwrap();
        assert_eq!(g, cal(&h, 1582, 9, 25));
        assert_eq!(
            op(&cal(&h, 1582, 9, 10), MonthOfYear, ElementOperator::Incremented),
            cal(&h, 1582, 10, 4)
        );
        assert!(HistoricCalendar::of(Arc::clone(&h), HistoricEra::Ad, 1582, 10, 10).is_err());
    }

    #[test]
    fn death_of_queen_elizabeth() {
        let h = Arc::new(ChronoHistory::for_region("GB"));
        let c = cal(&h, 1603, 3, 24);
        assert_eq!(c.century(), 17);
        assert_eq!(c.year(), 1602);
        assert_eq!(c.get(RelatedStandardYear), 1603);
        assert_eq!(c.day_of_year(), 365);
        assert_eq!(c.day_of_week(), Weekday::Thursday);
        assert_eq!(c.length_of_month(), 31);
        assert_eq!(c.length_of_year(), 365);
        assert_eq!(c.get(WeekdayInMonth), 4);
        assert_eq!(c.maximum(WeekdayInMonth), 5);
        assert_eq!(c.maximum(DayOfYear), 365);

        let new_year = c.with_new_year().unwrap();
        assert_eq!(new_year, cal(&h, 1602, 3, 25));
        let after = HistoricCalendar::of_year_definition(
            Arc::clone(&h),
            HistoricEra::Ad,
            1602,
            YearDefinition::AfterNewYear,
            3,
            25,
        )
        .unwrap();
        assert_eq!(new_year, after);

        assert_eq!(op(&c, DayOfMonth, ElementOperator::Minimized), cal(&h, 1603, 3, 1));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Minimized), cal(&h, 1602, 3, 25));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Maximized), cal(&h, 1603, 3, 31));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Maximized), cal(&h, 1603, 3, 24));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Decremented), cal(&h, 1603, 3, 23));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Incremented), cal(&h, 1603, 3, 25));
    }

    #[test]
    fn prussia() {
        let h = Arc::new(ChronoHistory::for_region("DE-PREUSSEN"));
        let c = cal(&h, 1610, 9, 4);
        assert_eq!(c.century(), 17);
        assert_eq!(c.day_of_year(), 237);
        assert_eq!(c.day_of_week(), Weekday::Saturday);
        assert_eq!(c.length_of_month(), 29);
        assert_eq!(c.length_of_year(), 355);
        assert_eq!(c.get(WeekdayInMonth), 1);
        assert_eq!(c.minimum(DayOfMonth), 2);
        assert_eq!(c.maximum(DayOfMonth), 30);
        assert_eq!(c.maximum(WeekdayInMonth), 4);

        assert_eq!(op(&c, MonthOfYear, ElementOperator::Minimized), cal(&h, 1610, 1, 4));
        assert_eq!(op(&c, MonthOfYear, ElementOperator::Maximized), cal(&h, 1610, 12, 4));
        assert_eq!(op(&c, MonthOfYear, ElementOperator::AtFloor), cal(&h, 1610, 9, 2));
        assert_eq!(op(&c, MonthOfYear, ElementOperator::AtCeiling), cal(&h, 1610, 9, 30));
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Minimized), cal(&h, 1610, 9, 2));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Minimized), cal(&h, 1610, 1, 1));
        assert_eq!(op(&c, DayOfYear, ElementOperator::Maximized), cal(&h, 1610, 12, 31));

        let before = c.minus_days(5).unwrap();
        assert_eq!((before.month(), before.day_of_month()), (8, 20));
        assert_eq!(before.length_of_month(), 22);
        assert_eq!(before.minimum(DayOfMonth), 1);
        assert_eq!(before.maximum(DayOfMonth), 22);
        assert_eq!(before.maximum(WeekdayInMonth), 3);
        assert_eq!(op(&before, MonthOfYear, ElementOperator::AtFloor), cal(&h, 1610, 8, 1));
        assert_eq!(op(&before, MonthOfYear, ElementOperator::AtCeiling), cal(&h, 1610, 8, 22));
        assert_eq!(op(&before, MonthOfYear, ElementOperator::Decremented), cal(&h, 1610, 7, 20));
        assert_eq!(op(&before, MonthOfYear, ElementOperator::Incremented), cal(&h, 1610, 9, 20));
        assert_eq!(op(&before, DayOfMonth, ElementOperator::Decremented), cal(&h, 1610, 8, 19));
        assert_eq!(op(&before, DayOfYear, ElementOperator::Decremented), cal(&h, 1610, 8, 19));
        assert_eq!(op(&before, DayOfMonth, ElementOperator::Incremented), cal(&h, 1610, 8, 21));
        assert_eq!(op(&before, DayOfYear, ElementOperator::Incremented), cal(&h, 1610, 8, 21));

        assert_eq!(cal(&h, 1610, 8, 22).next_day().unwrap(), cal(&h, 1610, 9, 2));
        assert_eq!(
            op(&cal(&h, 1610, 8, 1), MonthOfYear, ElementOperator::Incremented),
            cal(&h, 1610, 9, 2)
        );
    }

    #[test]
    fn sweden() {
        let h = Arc::new(ChronoHistory::of_sweden());
        let c = cal(&h, 1712, 2, 15);
        assert_eq!(c.maximum(DayOfMonth), 30);
        assert_eq!(op(&c, DayOfMonth, ElementOperator::Maximized), cal(&h, 1712, 2, 30));
        assert_eq!(op(&c, MonthOfYear, ElementOperator::AtCeiling), cal(&h, 1712, 2, 30));
        assert_eq!(cal(&h, 1712, 3, 1).minus_days(1).unwrap(), cal(&h, 1712, 2, 30));
        let feb29 = cal(&h, 1712, 2, 29);
        assert_eq!(feb29.plus_days(1).unwrap(), cal(&h, 1712, 2, 30));
        assert_eq!(feb29.length_of_month(), 30);
        assert_eq!(feb29.length_of_year(), 367);
    }

    #[test]
    fn russia() {
        let h = Arc::new(ChronoHistory::for_region("RU"));
        let c = HistoricCalendar::from_gregorian(Arc::clone(&h), PlainDate::of(1700, 1, 1).unwrap()).unwrap();
        assert_eq!(c.era(), HistoricEra::Byzantine);
        assert_eq!(c.year(), 7208);
        assert_eq!(c.get(RelatedStandardYear), 7207);
        assert_eq!((c.month(), c.day_of_month()), (12, 22));
    }

    #[test]
    fn month_and_year_arithmetic() {
        let h = Arc::new(ChronoHistory::of_first_gregorian_reform());
        assert_eq!(cal(&h, 1582, 10, 31).plus_months(1).unwrap(), cal(&h, 1582, 11, 30));
        assert_eq!(cal(&h, 1580, 2, 29).plus_years(1).unwrap(), cal(&h, 1581, 2, 28));
        assert_eq!(cal(&h, 1582, 10, 15).plus_months(-12).unwrap(), cal(&h, 1581, 10, 15));
        assert_eq!(cal(&h, 1582, 1, 31).plus_months(-1).unwrap(), cal(&h, 1581, 12, 31));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let h = Arc::new(ChronoHistory::of_first_gregorian_reform());
        let c = cal(&h, 1582, 10, 17);
        assert!(matches!(c.with_value(MonthOfYear, 13), Err(TimeError::InvalidArgument(_))));
        assert!(c.with_value(DayOfMonth, 10).is_err());
        assert_eq!(c.with_value(DayOfWeek, 1).unwrap(), cal(&h, 1582, 10, 1));
    }

    #[test]
    fn huge_amounts_fail_without_overflow() {
        let h = Arc::new(ChronoHistory::of_first_gregorian_reform());
        let c = cal(&h, 1582, 10, 17);
        assert!(matches!(c.plus_months(i64::MAX), Err(TimeError::InvalidArgument(_))));
        assert!(matches!(c.plus_years(i64::MAX), Err(TimeError::InvalidArgument(_))));
        assert!(c.plus_months(i64::MIN).is_err());
        assert!(c.plus_years(1_000_000).is_err());
        assert!(c.plus_days(i64::MAX).is_err());
    }

    #[test]
    fn byzantine_switch_keeps_years_contiguous() {
        use crate::history::NewYearRule;

        let russia = Arc::new(ChronoHistory::proleptic_julian().with_new_year(
            NewYearRule::BeginOfMarch
                .until(1492)
                .and(NewYearRule::Byzantine.until(1700)),
        ));
        let new_year = cal(&russia, 1491, 9, 1);
        assert_eq!(new_year.day_of_year(), 1);
        assert_eq!(new_year.length_of_year(), 366);
        assert_eq!(cal(&russia, 1491, 8, 31).length_of_year(), 184);
        assert_eq!(cal(&russia, 1492, 1, 1).day_of_year(), 123);
        assert_eq!(cal(&russia, 1492, 1, 1).with_new_year().unwrap(), new_year);
        assert_eq!(
            cal(&russia, 1492, 1, 1).year_of_era(YearDefinition::AfterNewYear),
            1492
        );
    }
}
