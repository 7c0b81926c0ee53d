// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Points on an ordered time axis.
//!
//! [`TimeInstant`] is the seam between the value types of this crate and the
//! generic [`Interval`](crate::Interval) algebra:
//!
//! | Instant            | Duration                       | Step       |
//! |--------------------|--------------------------------|------------|
//! | [`PlainDate`]      | [`CalendarDays`]               | 1 day      |
//! | [`PlainTimestamp`] | `chrono::TimeDelta`            | 1 ns       |
//! | [`Moment`]         | [`MachineTime`] (POSIX)        | 1 ns       |
//! | `DateTime<Utc>`    | `chrono::TimeDelta`            | 1 ns       |
//!
//! Every axis is discrete, so an open boundary always has a closed
//! equivalent one step further inside (except at the ends of the range).

use crate::date::{CalendarDays, PlainDate};
use crate::error::TimeError;
use crate::moment::{MachineScale, MachineTime, Moment};
use crate::timestamp::{PlainTimestamp, NANOS_PER_SECOND};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Trait for types that represent a point on a time axis.
pub trait TimeInstant: Copy + Eq + Ord + fmt::Debug {
    /// The duration type used for arithmetic operations.
    type Duration: Copy + fmt::Debug;

    /// `self - other`.
    fn difference(&self, other: &Self) -> Self::Duration;

    /// Adds a duration; fails when the result leaves the supported range.
    fn add_duration(&self, duration: Self::Duration) -> Result<Self, TimeError>;

    /// Subtracts a duration; fails when the result leaves the supported range.
    fn sub_duration(&self, duration: Self::Duration) -> Result<Self, TimeError>;

    /// The next representable instant, `None` at the end of the range.
    fn step_forward(&self) -> Option<Self>;

    /// The previous representable instant, `None` at the start of the range.
    fn step_backward(&self) -> Option<Self>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar dates
// ═══════════════════════════════════════════════════════════════════════════

impl TimeInstant for PlainDate {
    type Duration = CalendarDays;

    #[inline]
    fn difference(&self, other: &Self) -> Self::Duration {
        CalendarDays(self.mjd() - other.mjd())
    }

    #[inline]
    fn add_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        self.plus_days(duration.amount())
    }

    fn sub_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        let days = duration
            .amount()
            .checked_neg()
            .ok_or_else(|| TimeError::InvalidArgument(format!("amount overflow: {duration:?}")))?;
        self.plus_days(days)
    }

    #[inline]
    fn step_forward(&self) -> Option<Self> {
        self.plus_days(1).ok()
    }

    #[inline]
    fn step_backward(&self) -> Option<Self> {
        self.plus_days(-1).ok()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local timestamps
// ═══════════════════════════════════════════════════════════════════════════

/// Nanoseconds in a `TimeDelta`, sign included.
fn delta_nanos(delta: TimeDelta) -> i128 {
    delta.num_seconds() as i128 * NANOS_PER_SECOND as i128 + delta.subsec_nanos() as i128
}

/// `TimeDelta` of a nanosecond count, saturated to chrono's range.
fn nanos_delta(total: i128) -> TimeDelta {
    let seconds = total.div_euclid(NANOS_PER_SECOND as i128);
    let nanos = total.rem_euclid(NANOS_PER_SECOND as i128) as u32;
    i64::try_from(seconds)
        .ok()
        .and_then(|s| TimeDelta::new(s, nanos))
        .unwrap_or(if total < 0 { TimeDelta::MIN } else { TimeDelta::MAX })
}

impl TimeInstant for PlainTimestamp {
    type Duration = TimeDelta;

    /// Saturates at `TimeDelta::MIN`/`MAX` for spans beyond chrono's range.
    fn difference(&self, other: &Self) -> Self::Duration {
        nanos_delta(self.epoch_nanos() - other.epoch_nanos())
    }

    fn add_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        Self::from_epoch_nanos(self.epoch_nanos() + delta_nanos(duration))
    }

    fn sub_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        Self::from_epoch_nanos(self.epoch_nanos() - delta_nanos(duration))
    }

    fn step_forward(&self) -> Option<Self> {
        Self::from_epoch_nanos(self.epoch_nanos() + 1).ok()
    }

    fn step_backward(&self) -> Option<Self> {
        Self::from_epoch_nanos(self.epoch_nanos() - 1).ok()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Moments
// ═══════════════════════════════════════════════════════════════════════════

impl TimeInstant for Moment {
    type Duration = MachineTime;

    /// POSIX difference; use [`Moment::until`] for SI seconds.
    #[inline]
    fn difference(&self, other: &Self) -> Self::Duration {
        self.posix_difference(other)
    }

    /// POSIX durations only. UTC-scale durations need a leap-second table;
    /// use [`Moment::plus`] or [`crate::MomentInterval::move_by_si`].
    fn add_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        match duration.scale() {
            MachineScale::Posix => Self::of_posix_nanos(self.posix_nanos() + duration.total_nanos()),
            MachineScale::Utc => Err(TimeError::Unsupported(format!(
                "UTC duration {duration} needs a leap-second table"
            ))),
        }
    }

    fn sub_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        self.add_duration(duration.negate()?)
    }

    fn step_forward(&self) -> Option<Self> {
        Self::of_posix_nanos(self.posix_nanos() + 1).ok()
    }

    fn step_backward(&self) -> Option<Self> {
        Self::of_posix_nanos(self.posix_nanos() - 1).ok()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// chrono
// ═══════════════════════════════════════════════════════════════════════════

impl TimeInstant for DateTime<Utc> {
    type Duration = TimeDelta;

    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }

    fn add_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        self.checked_add_signed(duration).ok_or_else(|| {
            TimeError::InvalidArgument(format!("{self} + {duration} is out of range"))
        })
    }

    fn sub_duration(&self, duration: Self::Duration) -> Result<Self, TimeError> {
        self.checked_sub_signed(duration).ok_or_else(|| {
            TimeError::InvalidArgument(format!("{self} - {duration} is out of range"))
        })
    }

    fn step_forward(&self) -> Option<Self> {
        self.checked_add_signed(TimeDelta::nanoseconds(1))
    }

    fn step_backward(&self) -> Option<Self> {
        self.checked_sub_signed(TimeDelta::nanoseconds(1))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::TimeUnit;

    #[test]
    fn date_axis() {
        let a = PlainDate::of(2016, 2, 28).unwrap();
        let b = PlainDate::of(2016, 3, 1).unwrap();
        assert_eq!(b.difference(&a), CalendarDays(2));
        assert_eq!(a.add_duration(CalendarDays(2)).unwrap(), b);
        assert_eq!(b.sub_duration(CalendarDays(2)).unwrap(), a);
        assert_eq!(a.step_forward().unwrap(), PlainDate::of(2016, 2, 29).unwrap());
        assert!(PlainDate::MAX.step_forward().is_none());
        assert!(PlainDate::MIN.step_backward().is_none());
    }

    #[test]
    fn timestamp_axis() {
        let a = PlainTimestamp::of_fields(2016, 2, 28, 23, 0, 0).unwrap();
        let b = PlainTimestamp::of_fields(2016, 2, 29, 1, 30, 0).unwrap();
        assert_eq!(b.difference(&a), TimeDelta::minutes(150));
        assert_eq!(a.difference(&b), TimeDelta::minutes(-150));
        assert_eq!(a.add_duration(TimeDelta::minutes(150)).unwrap(), b);
        assert_eq!(b.sub_duration(TimeDelta::minutes(150)).unwrap(), a);
        assert_eq!(b.step_backward().unwrap().difference(&b), TimeDelta::nanoseconds(-1));
        assert!(PlainTimestamp::MAX.step_forward().is_none());
    }

    #[test]
    fn moment_axis() {
        let a = Moment::of_posix(1_000, 250).unwrap();
        let b = Moment::of_posix(1_060, 0).unwrap();
        let d = b.difference(&a);
        assert_eq!((d.seconds(), d.nanos()), (59, 999_999_750));
        assert_eq!(a.add_duration(d).unwrap(), b);
        let minute = MachineTime::of(1, TimeUnit::Minutes).unwrap();
        assert_eq!(b.sub_duration(minute).unwrap(), Moment::of_posix(1_000, 0).unwrap());
        assert_eq!(a.step_forward().unwrap().nanosecond(), 251);
        assert!(Moment::MAX.step_forward().is_none());
    }

    #[test]
    fn moment_axis_rejects_si_durations() {
        let a = Moment::of_posix(1_000, 0).unwrap();
        let si = MachineTime::of_si(1, crate::moment::SiUnit::Seconds).unwrap();
        assert!(matches!(a.add_duration(si), Err(TimeError::Unsupported(_))));
        assert!(matches!(a.sub_duration(si), Err(TimeError::Unsupported(_))));
    }

    #[test]
    fn chrono_axis() {
        let a = DateTime::from_timestamp(0, 0).unwrap();
        let b = DateTime::from_timestamp(86_400, 0).unwrap();
        assert_eq!(b.difference(&a), TimeDelta::days(1));
        assert_eq!(a.add_duration(TimeDelta::days(1)).unwrap(), b);
        assert_eq!(a.step_forward().unwrap().timestamp_subsec_nanos(), 1);
    }
}
