// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Historic new-year rules and year numbering.
//!
//! Before the general adoption of January 1st, many regions started the year
//! at Christmas, on March 1st or 25th, or on September 1st. The standard
//! (January-based) year of a date and its *historic* year then differ for the
//! days between the two starts.

/// How a year-of-era number given to or read from a historic calendar is
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearDefinition {
    /// The standard year beginning on January 1st.
    #[default]
    DualDating,
    /// The historic year, beginning on the regional new-year day.
    AfterNewYear,
    /// The historic year, except that days between January 1st and a later
    /// new-year day keep the standard year.
    BeforeNewYear,
}

/// Start of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewYearRule {
    /// January 1st.
    BeginOfJanuary,
    /// March 1st (old Roman and Russian custom).
    BeginOfMarch,
    /// September 1st of the preceding standard year (Byzantine style).
    Byzantine,
    /// December 25th of the preceding standard year.
    ChristmasStyle,
    /// March 25th of the same standard year (Florentine style, English Lady Day).
    MariaAnnunciation,
    /// March 25th of the preceding standard year (Pisan style).
    CalculusPisanus,
}

impl NewYearRule {
    /// `(month, day)` of the new-year day.
    pub const fn start(self) -> (u8, u8) {
        match self {
            NewYearRule::BeginOfJanuary => (1, 1),
            NewYearRule::BeginOfMarch => (3, 1),
            NewYearRule::Byzantine => (9, 1),
            NewYearRule::ChristmasStyle => (12, 25),
            NewYearRule::MariaAnnunciation | NewYearRule::CalculusPisanus => (3, 25),
        }
    }

    /// `true` when the historic year starts in the preceding standard year.
    pub const fn is_previous_year(self) -> bool {
        matches!(
            self,
            NewYearRule::Byzantine | NewYearRule::ChristmasStyle | NewYearRule::CalculusPisanus
        )
    }

    /// Strategy applying this rule to every standard year before `year`.
    pub fn until(self, year: i32) -> NewYearStrategy {
        NewYearStrategy {
            rules: vec![(self, year)],
        }
    }

    /// Historic year (proleptic) of a standard date under this rule.
    fn historic_year(self, year: i64, month: u8, day: u8) -> i64 {
        let start = self.start();
        if self.is_previous_year() {
            if (month, day) >= start {
                year + 1
            } else {
                year
            }
        } else if (month, day) < start {
            year - 1
        } else {
            year
        }
    }
}

/// A sequence of new-year rules, each applying to the standard years before
/// its limit; January 1st applies afterwards.
///
/// ```
/// use tempora::NewYearRule;
///
/// let england = NewYearRule::ChristmasStyle
///     .until(1087)
///     .and(NewYearRule::BeginOfJanuary.until(1155))
///     .and(NewYearRule::MariaAnnunciation.until(1752));
/// assert_eq!(england.rule(1603), NewYearRule::MariaAnnunciation);
/// assert_eq!(england.rule(1752), NewYearRule::BeginOfJanuary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NewYearStrategy {
    rules: Vec<(NewYearRule, i32)>,
}

impl NewYearStrategy {
    /// January 1st everywhere.
    pub fn begin_of_january() -> Self {
        Self::default()
    }

    /// Combines two strategies; limits are kept in ascending order.
    pub fn and(mut self, other: NewYearStrategy) -> Self {
        self.rules.extend(other.rules);
        self.rules.sort_by_key(|&(_, until)| until);
        self
    }

    /// Rule governing the standard `year`.
    pub fn rule(&self, year: i64) -> NewYearRule {
        self.rules
            .iter()
            .find(|&&(_, until)| year < until as i64)
            .map_or(NewYearRule::BeginOfJanuary, |&(rule, _)| rule)
    }

    pub fn is_default(&self) -> bool {
        self.rules
            .iter()
            .all(|&(rule, _)| rule == NewYearRule::BeginOfJanuary)
    }

    /// Historic year (proleptic) of a standard date.
    ///
    /// When the next standard year counts from a new-year day in the
    /// preceding year, that day already opens the next historic year, even
    /// while the current rule is still a same-year one.
    pub fn historic_year(&self, year: i64, month: u8, day: u8) -> i64 {
        let next = self.rule(year + 1);
        if next.is_previous_year() && (month, day) >= next.start() {
            return year + 1;
        }
        self.rule(year).historic_year(year, month, day)
    }

    /// Year number of a standard date under `definition`.
    pub fn year_number(&self, definition: YearDefinition, year: i64, month: u8, day: u8) -> i64 {
        match definition {
            YearDefinition::DualDating => year,
            YearDefinition::AfterNewYear => self.historic_year(year, month, day),
            YearDefinition::BeforeNewYear => self.historic_year(year, month, day).max(year),
        }
    }

    /// Standard `(year, month, day)` on which the historic year `year` begins.
    ///
    /// A year that no date maps to (a same-year rule followed by a
    /// previous-year rule with an earlier new-year day) starts and ends on the
    /// same day.
    pub fn start_of_year(&self, year: i64) -> (i64, u8, u8) {
        let early = [self.rule(year), self.rule(year - 1)]
            .into_iter()
            .filter(|rule| rule.is_previous_year())
            .map(NewYearRule::start)
            .min();
        match early {
            Some((m, d)) => (year - 1, m, d),
            None => {
                let (m, d) = self.rule(year).start();
                (year, m, d)
            }
        }
    }
}
