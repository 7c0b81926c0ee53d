// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Historic calendars with Julian → Gregorian cutovers.
//!
//! A [`ChronoHistory`] is an ordered list of segments, each starting on a
//! given day (MJD) and computing dates with one [`CalendarAlgorithm`]. The
//! newest segment runs to the end of the supported range. On top of the
//! segments a history carries a [`NewYearStrategy`] and an
//! [`EraPreference`].
//!
//! | Constructor | Segments |
//! |-------------|----------|
//! | [`ChronoHistory::proleptic_gregorian`] | Gregorian |
//! | [`ChronoHistory::proleptic_julian`] | Julian |
//! | [`ChronoHistory::proleptic_byzantine`] | Julian, Byzantine era and new year |
//! | [`ChronoHistory::of_first_gregorian_reform`] | Julian until 1582-10-04, Gregorian from 1582-10-15 |
//! | [`ChronoHistory::of_gregorian_reform`] | Julian, Gregorian from the given date |
//! | [`ChronoHistory::of_sweden`] | Julian, Swedish 1700-03-01, Julian 1712-03-01, Gregorian 1753-03-01 |
//!
//! The supported range runs from January 1st of 5509 BC (Julian) to
//! December 31st of AD 9999 (Gregorian).

mod algorithm;
mod calendar;
mod date;
mod era;
mod new_year;

pub use algorithm::CalendarAlgorithm;
pub use calendar::{ElementOperator, HistoricCalendar, HistoricElement};
pub use date::HistoricDate;
pub use era::{EraPreference, HistoricEra};
pub use new_year::{NewYearRule, NewYearStrategy, YearDefinition};

use crate::date::PlainDate;
use crate::error::TimeError;
use crate::gregorian;
use crate::weekday::Weekday;
use std::fmt;
use tracing::debug;

/// Earliest supported proleptic year (5509 BC).
const MIN_YEAR: i64 = -5_508;
/// Latest supported proleptic year.
const MAX_YEAR: i64 = 9_999;

const CUSTOM_SUFFIX: &str = "|custom";

fn min_mjd() -> i64 {
    CalendarAlgorithm::Julian.to_mjd(MIN_YEAR, 1, 1)
}

const fn max_mjd() -> i64 {
    gregorian::mjd_of(MAX_YEAR, 12, 31)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Segment {
    start: i64,
    algorithm: CalendarAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Variant {
    ProlepticGregorian,
    ProlepticJulian,
    ProlepticByzantine,
    FirstGregorianReform,
    GregorianReform(PlainDate),
    Sweden,
    Region(String),
}

/// Valid days of one month in a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthSpan {
    pub(crate) first_day: u8,
    pub(crate) last_day: u8,
    pub(crate) first_mjd: i64,
    pub(crate) length: u8,
}

/// Chronological history of a calendar: algorithm segments, new-year rules
/// and era preference.
///
/// ```
/// use tempora::{ChronoHistory, HistoricEra, HistoricDate};
///
/// let rome = ChronoHistory::of_first_gregorian_reform();
/// let last_julian = HistoricDate::of(HistoricEra::Ad, 1582, 10, 4).unwrap();
/// let mjd = rome.to_mjd(&last_julian).unwrap();
/// assert_eq!(rome.to_historic(mjd + 1).unwrap().to_string(), "AD-1582-10-15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChronoHistory {
    variant: Variant,
    customized: bool,
    segments: Vec<Segment>,
    new_year: NewYearStrategy,
    era_preference: EraPreference,
}

impl ChronoHistory {
    fn with_segments(variant: Variant, segments: Vec<Segment>) -> Self {
        Self {
            variant,
            customized: false,
            segments,
            new_year: NewYearStrategy::begin_of_january(),
            era_preference: EraPreference::DEFAULT,
        }
    }

    fn reform_segments(cutover: i64) -> Vec<Segment> {
        vec![
            Segment {
                start: i64::MIN,
                algorithm: CalendarAlgorithm::Julian,
            },
            Segment {
                start: cutover,
                algorithm: CalendarAlgorithm::Gregorian,
            },
        ]
    }

    // ═══════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════

    /// Gregorian rules for all dates.
    pub fn proleptic_gregorian() -> Self {
        Self::with_segments(
            Variant::ProlepticGregorian,
            vec![Segment {
                start: i64::MIN,
                algorithm: CalendarAlgorithm::Gregorian,
            }],
        )
    }

    /// Julian rules for all dates.
    pub fn proleptic_julian() -> Self {
        Self::with_segments(
            Variant::ProlepticJulian,
            vec![Segment {
                start: i64::MIN,
                algorithm: CalendarAlgorithm::Julian,
            }],
        )
    }

    /// Julian rules with the Byzantine era and a new year on September 1st.
    pub fn proleptic_byzantine() -> Self {
        let mut history = Self::proleptic_julian();
        history.variant = Variant::ProlepticByzantine;
        history.new_year = NewYearRule::Byzantine.until(i32::MAX);
        history.era_preference = EraPreference::everywhere(HistoricEra::Byzantine);
        history
    }

    /// Julian calendar until 1582-10-04, Gregorian from 1582-10-15.
    pub fn of_first_gregorian_reform() -> Self {
        Self::with_segments(
            Variant::FirstGregorianReform,
            Self::reform_segments(gregorian::mjd_of(1582, 10, 15)),
        )
    }

    /// Julian calendar until the day before `start`, Gregorian from `start`.
    ///
    /// `start` is a Gregorian date not before 1582-10-15.
    pub fn of_gregorian_reform(start: PlainDate) -> Result<Self, TimeError> {
        let first = gregorian::mjd_of(1582, 10, 15);
        let cutover = start.mjd();
        if cutover < first {
            return Err(TimeError::InvalidArgument(format!(
                "Gregorian calendar did not exist before 1582-10-15: {start}"
            )));
        }
        if cutover > max_mjd() {
            return Err(TimeError::InvalidArgument(format!("cutover out of range: {start}")));
        }
        if cutover == first {
            return Ok(Self::of_first_gregorian_reform());
        }
        Ok(Self::with_segments(
            Variant::GregorianReform(start),
            Self::reform_segments(cutover),
        ))
    }

    /// The Swedish path to the Gregorian calendar.
    ///
    /// Sweden dropped the Julian leap day of 1700, returned to the Julian
    /// calendar on 1712-03-01 by inserting February 30th, and switched to the
    /// Gregorian calendar on 1753-03-01.
    pub fn of_sweden() -> Self {
        let julian = CalendarAlgorithm::Julian;
        Self::with_segments(
            Variant::Sweden,
            vec![
                Segment {
                    start: i64::MIN,
                    algorithm: julian,
                },
                Segment {
                    start: julian.to_mjd(1700, 3, 1) - 1,
                    algorithm: CalendarAlgorithm::Swedish,
                },
                Segment {
                    start: julian.to_mjd(1712, 3, 1),
                    algorithm: julian,
                },
                Segment {
                    start: gregorian::mjd_of(1753, 3, 1),
                    algorithm: CalendarAlgorithm::Gregorian,
                },
            ],
        )
    }

    /// History of a region, keyed by ISO country code with an optional
    /// variant (`"DE-PREUSSEN"`). Unknown keys get the first Gregorian reform.
    pub fn for_region(key: &str) -> Self {
        let key = key.trim().to_ascii_uppercase().replace('_', "-");
        let reform = |year: i64, month: u8, day: u8| {
            Self::reform_segments(gregorian::mjd_of(year, month, day))
        };
        let mut history = match key.as_str() {
            "GB" | "UK" => {
                let mut h = Self::with_segments(Variant::ProlepticJulian, reform(1752, 9, 14));
                h.new_year = NewYearRule::ChristmasStyle
                    .until(1087)
                    .and(NewYearRule::BeginOfJanuary.until(1155))
                    .and(NewYearRule::MariaAnnunciation.until(1752));
                h
            }
            "DE-PREUSSEN" => Self::with_segments(Variant::ProlepticJulian, reform(1610, 9, 2)),
            "DE" | "DK" | "NO" => Self::with_segments(Variant::ProlepticJulian, reform(1700, 3, 1)),
            "RU" => {
                let mut h = Self::with_segments(Variant::ProlepticJulian, reform(1918, 2, 14));
                h.new_year = NewYearRule::BeginOfMarch
                    .until(1492)
                    .and(NewYearRule::Byzantine.until(1700));
                h.era_preference = EraPreference::byzantine_until(PlainDate::from_parts(1700, 1, 11));
                h
            }
            "SE" => Self::of_sweden(),
            "FR" => Self::with_segments(Variant::ProlepticJulian, reform(1582, 12, 20)),
            "GR" => Self::with_segments(Variant::ProlepticJulian, reform(1923, 3, 1)),
            "IT" | "ES" | "PT" | "PL" => Self::of_first_gregorian_reform(),
            _ => {
                debug!(region = %key, "no regional history known, using first Gregorian reform");
                return Self::of_first_gregorian_reform();
            }
        };
        history.variant = Variant::Region(key);
        history
    }

    /// Inverse of [`ChronoHistory::variant`].
    pub fn from_variant(variant: &str) -> Result<Self, TimeError> {
        if variant.ends_with(CUSTOM_SUFFIX) {
            return Err(TimeError::InvalidArgument(format!(
                "customized history cannot be restored: {variant}"
            )));
        }
        match variant {
            "proleptic-gregorian" => Ok(Self::proleptic_gregorian()),
            "proleptic-julian" => Ok(Self::proleptic_julian()),
            "proleptic-byzantine" => Ok(Self::proleptic_byzantine()),
            "first-gregorian-reform" => Ok(Self::of_first_gregorian_reform()),
            "sweden" => Ok(Self::of_sweden()),
            _ => {
                if let Some(date) = variant.strip_prefix("gregorian-reform:") {
                    let start: PlainDate = date.parse()?;
                    Self::of_gregorian_reform(start)
                } else if let Some(region) = variant.strip_prefix("region:") {
                    Ok(Self::for_region(region))
                } else {
                    Err(TimeError::InvalidArgument(format!("unknown history variant: {variant}")))
                }
            }
        }
    }

    /// Replaces the new-year strategy.
    pub fn with_new_year(&self, strategy: NewYearStrategy) -> Self {
        let mut history = self.clone();
        history.new_year = strategy;
        history.customized = true;
        history
    }

    /// Replaces the era preference.
    pub fn with_era_preference(&self, preference: EraPreference) -> Self {
        let mut history = self.clone();
        history.era_preference = preference;
        history.customized = true;
        history
    }

    // ═══════════════════════════════════════════════════════════════════
    // Descriptor
    // ═══════════════════════════════════════════════════════════════════

    /// Key identifying this history; customized histories carry a
    /// `|custom` suffix.
    pub fn variant(&self) -> String {
        let base = match &self.variant {
            Variant::ProlepticGregorian => "proleptic-gregorian".to_string(),
            Variant::ProlepticJulian => "proleptic-julian".to_string(),
            Variant::ProlepticByzantine => "proleptic-byzantine".to_string(),
            Variant::FirstGregorianReform => "first-gregorian-reform".to_string(),
            Variant::GregorianReform(date) => format!("gregorian-reform:{date}"),
            Variant::Sweden => "sweden".to_string(),
            Variant::Region(key) => format!("region:{key}"),
        };
        if self.customized {
            base + CUSTOM_SUFFIX
        } else {
            base
        }
    }

    /// First day of the last Gregorian segment, if any.
    pub fn gregorian_cutover_date(&self) -> Option<PlainDate> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.algorithm == CalendarAlgorithm::Gregorian && s.start != i64::MIN)
            .map(|s| {
                let (y, m, d) = gregorian::ymd_of(s.start);
                PlainDate::from_parts(y as i32, m, d)
            })
    }

    pub fn new_year_strategy(&self) -> &NewYearStrategy {
        &self.new_year
    }

    pub fn era_preference(&self) -> EraPreference {
        self.era_preference
    }

    /// Earliest supported historic date.
    pub fn minimum_date(&self) -> HistoricDate {
        self.date_at(min_mjd())
    }

    /// Latest supported historic date.
    pub fn maximum_date(&self) -> HistoricDate {
        self.date_at(max_mjd())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Conversions
    // ═══════════════════════════════════════════════════════════════════

    /// Historic date of a Modified Julian Day.
    pub fn to_historic(&self, mjd: i64) -> Result<HistoricDate, TimeError> {
        if mjd < min_mjd() || mjd > max_mjd() {
            return Err(TimeError::InvalidDate(format!("out of historic range: MJD {mjd}")));
        }
        Ok(self.date_at(mjd))
    }

    /// Historic date of a (proleptic) Gregorian date.
    pub fn convert(&self, date: PlainDate) -> Result<HistoricDate, TimeError> {
        self.to_historic(date.mjd())
    }

    /// Modified Julian Day of a historic date.
    ///
    /// Fails with [`TimeError::InvalidDate`] for dates outside the range or
    /// inside a cutover gap.
    pub fn to_mjd(&self, date: &HistoricDate) -> Result<i64, TimeError> {
        let year = date.proleptic_year();
        // One year of slack below: a proleptic Gregorian history starts late in 5510 BC.
        if !(MIN_YEAR - 1..=MAX_YEAR).contains(&year) {
            return Err(TimeError::InvalidDate(format!("out of historic range: {date}")));
        }
        self.resolve(year, date.month(), date.day_of_month())
            .filter(|mjd| (min_mjd()..=max_mjd()).contains(mjd))
            .ok_or_else(|| TimeError::InvalidDate(format!("invalid historic date: {date}")))
    }

    /// Proleptic Gregorian date of a historic date.
    pub fn to_gregorian(&self, date: &HistoricDate) -> Result<PlainDate, TimeError> {
        PlainDate::of_mjd(self.to_mjd(date)?)
    }

    pub fn is_valid(&self, date: &HistoricDate) -> bool {
        self.to_mjd(date).is_ok()
    }

    /// Builds a date whose year of era is read under `definition`.
    pub fn date(
        &self,
        era: HistoricEra,
        year_of_era: i64,
        definition: YearDefinition,
        month: u8,
        day: u8,
    ) -> Result<HistoricDate, TimeError> {
        let wanted = era.annum_domini(year_of_era);
        for standard in [wanted, wanted + 1, wanted - 1] {
            if self.new_year.year_number(definition, standard, month, day) != wanted {
                continue;
            }
            let candidate = HistoricDate::of(era, era.year_of_era(standard), month, day)?;
            self.to_mjd(&candidate)?;
            return Ok(candidate);
        }
        Err(TimeError::InvalidDate(format!(
            "no {definition:?} year {era}-{year_of_era} for {month:02}-{day:02}"
        )))
    }

    /// Year of era of `date` read under `definition`.
    pub fn year_of_era(&self, date: &HistoricDate, definition: YearDefinition) -> i64 {
        let number = self.new_year.year_number(
            definition,
            date.proleptic_year(),
            date.month(),
            date.day_of_month(),
        );
        date.era().year_of_era(number)
    }

    pub fn day_of_week(&self, date: &HistoricDate) -> Result<Weekday, TimeError> {
        Ok(Weekday::from_mjd(self.to_mjd(date)?))
    }

    /// Day of the historic year, counted from the regional new-year day.
    pub fn day_of_year(&self, date: &HistoricDate) -> Result<u32, TimeError> {
        let mjd = self.to_mjd(date)?;
        let historic = self.historic_year_of(date);
        Ok((mjd - self.year_start(historic) + 1) as u32)
    }

    /// Number of valid days in the month.
    pub fn length_of_month(&self, era: HistoricEra, year_of_era: i64, month: u8) -> Result<u8, TimeError> {
        self.month_span(era.annum_domini(year_of_era), month)
            .map(|span| span.length)
            .ok_or_else(|| TimeError::InvalidDate(format!("no valid day in {era}-{year_of_era}-{month:02}")))
    }

    /// Number of days in the historic year `year_of_era` (after new year).
    pub fn length_of_year(&self, era: HistoricEra, year_of_era: i64) -> Result<u32, TimeError> {
        let year = era.annum_domini(year_of_era);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimeError::InvalidDate(format!("out of historic range: {era}-{year_of_era}")));
        }
        Ok(self.year_length(year))
    }

    /// First day of the historic year `year_of_era` (after new year).
    pub fn begin_of_year(&self, era: HistoricEra, year_of_era: i64) -> Result<HistoricDate, TimeError> {
        let year = era.annum_domini(year_of_era);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimeError::InvalidDate(format!("out of historic range: {era}-{year_of_era}")));
        }
        self.to_historic(self.year_start(year))
    }

    // ── internals ────────────────────────────────────────────────────

    pub(crate) fn date_at(&self, mjd: i64) -> HistoricDate {
        let algorithm = self
            .segments
            .iter()
            .rev()
            .find(|s| s.start <= mjd)
            .map_or(CalendarAlgorithm::Julian, |s| s.algorithm);
        let (year, month, day) = algorithm.from_mjd(mjd);
        let era = self.era_preference.era_of(mjd, year);
        HistoricDate::of_unchecked(era, era.year_of_era(year), month, day)
    }

    /// Segment search from the newest segment backwards.
    pub(crate) fn resolve(&self, year: i64, month: u8, day: u8) -> Option<i64> {
        let mut end = i64::MAX;
        for segment in self.segments.iter().rev() {
            if segment.algorithm.is_valid(year, month, day) {
                let mjd = segment.algorithm.to_mjd(year, month, day);
                if mjd >= segment.start && mjd < end {
                    return Some(mjd);
                }
            }
            end = segment.start;
        }
        None
    }

    pub(crate) fn historic_year_of(&self, date: &HistoricDate) -> i64 {
        self.new_year
            .historic_year(date.proleptic_year(), date.month(), date.day_of_month())
    }

    /// MJD of the first day of the historic `year`, clamped to the range.
    pub(crate) fn year_start(&self, year: i64) -> i64 {
        let (mut y, mut m, mut d) = self.new_year.start_of_year(year);
        // Cutover gaps never span more than a few weeks.
        for _ in 0..62 {
            if let Some(mjd) = self.resolve(y, m, d) {
                return mjd.clamp(min_mjd(), max_mjd() + 1);
            }
            if d < 31 {
                d += 1;
            } else {
                d = 1;
                m += 1;
                if m > 12 {
                    m = 1;
                    y += 1;
                }
            }
        }
        max_mjd() + 1
    }

    pub(crate) fn year_length(&self, year: i64) -> u32 {
        (self.year_start(year + 1) - self.year_start(year)) as u32
    }

    pub(crate) fn month_span(&self, year: i64, month: u8) -> Option<MonthSpan> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        let mut span: Option<MonthSpan> = None;
        for day in 1..=31u8 {
            let Some(mjd) = self.resolve(year, month, day) else {
                continue;
            };
            if mjd < min_mjd() || mjd > max_mjd() {
                continue;
            }
            match span.as_mut() {
                Some(s) => {
                    s.last_day = day;
                    s.length += 1;
                }
                None => {
                    span = Some(MonthSpan {
                        first_day: day,
                        last_day: day,
                        first_mjd: mjd,
                        length: 1,
                    })
                }
            }
        }
        span
    }
}

impl Default for ChronoHistory {
    fn default() -> Self {
        Self::of_first_gregorian_reform()
    }
}

impl fmt::Display for ChronoHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChronoHistory[{}]", self.variant())
    }
}
