// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendrical and time-scale primitives.
//!
//! This crate provides proleptic Gregorian arithmetic, UTC leap-second
//! bookkeeping, historic (Julian/Gregorian cutover) calendars, ISO weeks and
//! a generic interval algebra over every time axis it defines.
//!
//! # Core types
//!
//! - [`PlainDate`]: calendar date on the proleptic Gregorian calendar.
//! - [`PlainTime`] / [`PlainTimestamp`]: wall-clock time and local timestamp.
//! - [`Moment`]: instant on the UTC/POSIX axis, leap seconds included.
//! - [`MachineTime`]: elapsed seconds and nanoseconds on a [`MachineScale`].
//! - [`LeapSeconds`]: the leap-second table and the UTC ↔ POSIX mapping.
//! - [`ChronoHistory`]: Julian/Gregorian cutover with eras and new-year rules.
//! - [`CalendarWeek`]: ISO-8601 week of a week-based year.
//! - [`Interval<T>`]: interval over any [`TimeInstant`], bounded by
//!   [`Boundary`] values.
//!
//! # Modules
//!
//! | Module        | Content                                               |
//! |---------------|-------------------------------------------------------|
//! | [`gregorian`] | Leap years, month lengths, MJD conversion             |
//! | `scale`       | Leap-second table, providers and configuration        |
//! | `history`     | Cutover calendars, eras, year definitions             |
//! | `interval`    | Boundaries, interval relations, ISO interval parsing  |
//!
//! # Quick start
//!
//! ```
//! use tempora::{DateInterval, PlainDate};
//!
//! let feb = DateInterval::closed(
//!     PlainDate::of(2016, 2, 1).unwrap(),
//!     PlainDate::of(2016, 2, 29).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(feb.length_in_days().unwrap(), 29);
//! assert_eq!(feb.to_string(), "[2016-02-01/2016-02-29]");
//! ```

mod date;
mod error;
pub mod gregorian;
mod history;
mod instant;
mod interval;
mod julian;
mod moment;
mod scale;
mod timestamp;
mod week;
mod weekday;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use date::{CalendarDays, CalendarUnit, PlainDate};
pub use error::TimeError;
pub use history::{
    CalendarAlgorithm, ChronoHistory, ElementOperator, EraPreference, HistoricCalendar,
    HistoricDate, HistoricElement, HistoricEra, NewYearRule, NewYearStrategy, YearDefinition,
};
pub use instant::TimeInstant;
pub use interval::{
    complement_within, intersect_all, sort_intervals, Boundary, DateInterval, Interval,
    IntervalEdge, MomentInterval, TimestampInterval, UtcPeriod,
};
pub use moment::{MachineScale, MachineTime, Moment, SiUnit, TimeUnit};
pub use scale::{
    LeapSecondConfig, LeapSecondEvent, LeapSecondProvider, LeapSeconds, LeapSecondsBuilder,
    ProviderRegistry, TableProvider, TimeScale, ENV_DATA_FILE, ENV_FINAL, ENV_SUPPRESSED,
};
pub use timestamp::{ClockUnit, IsoUnit, PlainTime, PlainTimestamp};
pub use week::CalendarWeek;
pub use weekday::Weekday;
