// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Intervals on a time axis.
//!
//! This module provides:
//! - [`Boundary<T>`]: open, closed or infinite interval edge
//! - [`Interval<T>`]: generic interval over any [`TimeInstant`]
//! - [`DateInterval`], [`TimestampInterval`], [`MomentInterval`] and
//!   [`UtcPeriod`]: the typed aliases with unit-aware lengths, moves and
//!   ISO-8601 parsing
//! - [`complement_within`] and [`intersect_all`] over sorted interval lists
//!
//! ```
//! use tempora::{DateInterval, PlainDate};
//!
//! let iv: DateInterval = "2012-01-01/02-14".parse().unwrap();
//! assert_eq!(iv.to_string(), "[2012-01-01/2012-02-14]");
//! assert!(iv.contains(PlainDate::of(2012, 2, 14).unwrap()));
//! assert_eq!(iv.length_in_days().unwrap(), 45);
//! ```

mod boundary;
pub(crate) mod iso;
mod kinds;

pub use boundary::{Boundary, IntervalEdge};
pub use kinds::{DateInterval, MomentInterval, TimestampInterval, UtcPeriod};

use crate::error::TimeError;
use crate::instant::TimeInstant;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Position on the extended axis; closed-form view of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bound<T> {
    NegInf,
    At(T),
    PosInf,
}

impl<T: TimeInstant> Bound<T> {
    fn next(self) -> Self {
        match self {
            Bound::At(t) => t.step_forward().map_or(Bound::PosInf, Bound::At),
            other => other,
        }
    }

    fn prev(self) -> Self {
        match self {
            Bound::At(t) => t.step_backward().map_or(Bound::NegInf, Bound::At),
            other => other,
        }
    }
}

/// Represents an interval between two boundaries.
///
/// The start never lies after the end. Equal finite points are allowed as
/// `[a, a]` (a single instant) or `[a, a)`/`(a, a)` (empty); `(a, a]` is
/// rejected.
///
/// # Examples
///
/// ```
/// use tempora::{Interval, Moment};
///
/// let a = Moment::of_posix(0, 0).unwrap();
/// let b = Moment::of_posix(60, 0).unwrap();
/// let iv = Interval::between(a, b).unwrap();
/// assert!(iv.contains(a));
/// assert!(!iv.contains(b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Interval<T: TimeInstant> {
    start: Boundary<T>,
    end: Boundary<T>,
}

impl<T: TimeInstant> Interval<T> {
    // ── constructors ──────────────────────────────────────────────────

    /// Creates an interval, checking that `start` is not after `end`.
    pub fn new(start: Boundary<T>, end: Boundary<T>) -> Result<Self, TimeError> {
        if start == Boundary::InfiniteFuture {
            return Err(TimeError::InvalidArgument(
                "interval cannot start in the infinite future".into(),
            ));
        }
        if end == Boundary::InfinitePast {
            return Err(TimeError::InvalidArgument(
                "interval cannot end in the infinite past".into(),
            ));
        }
        if let (Some(s), Some(e)) = (start.temporal(), end.temporal()) {
            if s > e {
                return Err(TimeError::InvalidArgument(format!(
                    "start after end: {s:?} > {e:?}"
                )));
            }
            if s == e && start.is_open() && end.is_closed() {
                return Err(TimeError::InvalidArgument(format!(
                    "open start equal to closed end: {s:?}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// Half-open interval `[start, end)`.
    pub fn between(start: T, end: T) -> Result<Self, TimeError> {
        Self::new(Boundary::of_closed(start), Boundary::of_open(end))
    }

    /// Closed interval `[start, end]`.
    pub fn closed(start: T, end: T) -> Result<Self, TimeError> {
        Self::new(Boundary::of_closed(start), Boundary::of_closed(end))
    }

    /// Open interval `(start, end)`.
    pub fn open(start: T, end: T) -> Result<Self, TimeError> {
        Self::new(Boundary::of_open(start), Boundary::of_open(end))
    }

    /// `[start, +∞)`.
    pub fn since(start: T) -> Self {
        Self {
            start: Boundary::of_closed(start),
            end: Boundary::InfiniteFuture,
        }
    }

    /// `(-∞, end)`.
    pub fn until(end: T) -> Self {
        Self {
            start: Boundary::InfinitePast,
            end: Boundary::of_open(end),
        }
    }

    /// `(-∞, +∞)`.
    pub fn always() -> Self {
        Self {
            start: Boundary::InfinitePast,
            end: Boundary::InfiniteFuture,
        }
    }

    #[inline]
    pub fn start(&self) -> Boundary<T> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Boundary<T> {
        self.end
    }

    // ── closed-form view ──────────────────────────────────────────────

    /// First contained position.
    fn first(&self) -> Bound<T> {
        match self.start {
            Boundary::InfinitePast => Bound::NegInf,
            Boundary::Finite { edge, point } => match edge {
                IntervalEdge::Closed => Bound::At(point),
                IntervalEdge::Open => Bound::At(point).next(),
            },
            Boundary::InfiniteFuture => Bound::PosInf,
        }
    }

    /// Last contained position.
    fn last(&self) -> Bound<T> {
        match self.end {
            Boundary::InfiniteFuture => Bound::PosInf,
            Boundary::Finite { edge, point } => match edge {
                IntervalEdge::Closed => Bound::At(point),
                IntervalEdge::Open => Bound::At(point).prev(),
            },
            Boundary::InfinitePast => Bound::NegInf,
        }
    }

    /// Builds the half-open normal form of the closed range `[first, last]`.
    ///
    /// Falls back to a closed end when `last` has no successor.
    fn from_bounds(first: Bound<T>, last: Bound<T>) -> Option<Self> {
        if first > last || first == Bound::PosInf || last == Bound::NegInf {
            return None;
        }
        let start = match first {
            Bound::At(t) => Boundary::of_closed(t),
            _ => Boundary::InfinitePast,
        };
        let end = match last {
            Bound::At(t) => t
                .step_forward()
                .map_or(Boundary::of_closed(t), Boundary::of_open),
            _ => Boundary::InfiniteFuture,
        };
        Some(Self { start, end })
    }

    // ── predicates ────────────────────────────────────────────────────

    /// `true` when the interval contains no instant.
    pub fn is_empty(&self) -> bool {
        self.first() > self.last()
    }

    /// `true` when both boundaries are finite.
    pub fn is_finite(&self) -> bool {
        !self.start.is_infinite() && !self.end.is_infinite()
    }

    pub fn contains(&self, point: T) -> bool {
        let p = Bound::At(point);
        self.first() <= p && p <= self.last()
    }

    /// `true` when every instant of `other` lies in `self`.
    pub fn encloses(&self, other: &Self) -> bool {
        other.is_empty() || (self.first() <= other.first() && other.last() <= self.last())
    }

    /// `true` when the whole interval lies after `point`.
    pub fn is_after(&self, point: T) -> bool {
        Bound::At(point) < self.first()
    }

    /// `true` when the whole interval lies before `point`.
    pub fn is_before(&self, point: T) -> bool {
        self.last() < Bound::At(point)
    }

    pub fn is_after_interval(&self, other: &Self) -> bool {
        other.last() < self.first()
    }

    pub fn is_before_interval(&self, other: &Self) -> bool {
        self.last() < other.first()
    }

    /// `true` for identical boundaries, edges included.
    pub fn is_simultaneous(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }

    // ── interval relations ────────────────────────────────────────────

    /// `self` ends before `other` starts, with a gap between them.
    pub fn precedes(&self, other: &Self) -> bool {
        self.last().next() < other.first()
    }

    /// `other` starts right after the last instant of `self`.
    pub fn meets(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.last() != Bound::PosInf
            && self.last().next() == other.first()
    }

    /// `self` starts first and ends inside `other`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.first() < other.first() && other.first() <= self.last() && self.last() < other.last()
    }

    /// Same start; `self` ends first.
    pub fn starts(&self, other: &Self) -> bool {
        self.first() == other.first() && self.last() < other.last()
    }

    /// Same end; `self` starts later.
    pub fn finishes(&self, other: &Self) -> bool {
        self.last() == other.last() && self.first() > other.first()
    }

    /// Same set of instants, whatever the edges.
    pub fn equivalent_to(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.first() == other.first() && self.last() == other.last())
    }

    /// Either interval meets the other.
    pub fn abuts(&self, other: &Self) -> bool {
        self.meets(other) || other.meets(self)
    }

    // ── derived intervals ─────────────────────────────────────────────

    /// Overlap of two intervals, keeping the original edges; `None` when
    /// they share no instant.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if other.first() > self.first() {
            other.start
        } else {
            self.start
        };
        let end = if other.last() < self.last() {
            other.end
        } else {
            self.end
        };
        Self::new(start, end).ok().filter(|iv| !iv.is_empty())
    }

    /// Smallest interval enclosing both.
    pub fn span(&self, other: &Self) -> Self {
        let start = if other.first() < self.first() {
            other.start
        } else {
            self.start
        };
        let end = if other.last() > self.last() {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    /// Shifts finite boundaries; infinite ones stay.
    pub fn move_by(&self, amount: T::Duration) -> Result<Self, TimeError> {
        self.map_points(|t| t.add_duration(amount))
    }

    pub(crate) fn map_points<U: TimeInstant>(
        &self,
        mut f: impl FnMut(T) -> Result<U, TimeError>,
    ) -> Result<Interval<U>, TimeError> {
        let start = self.start.try_map(&mut f)?;
        let end = self.end.try_map(&mut f)?;
        Interval::new(start, end)
    }

    // ── lengths ───────────────────────────────────────────────────────

    /// Closed start and open end points, e.g. `[a, b]` gives `(a, b + 1)`.
    ///
    /// A closed end at the last representable instant stays as is.
    pub(crate) fn half_open_points(&self) -> Result<(T, T), TimeError> {
        let (start, end) = match (self.start, self.end) {
            (Boundary::Finite { edge: se, point: s }, Boundary::Finite { edge: ee, point: e }) => {
                let s = match se {
                    IntervalEdge::Closed => s,
                    IntervalEdge::Open => s.step_forward().unwrap_or(s),
                };
                let e = match ee {
                    IntervalEdge::Open => e,
                    IntervalEdge::Closed => e.step_forward().unwrap_or(e),
                };
                (s, e)
            }
            _ => {
                return Err(TimeError::Unsupported(format!(
                    "length of infinite interval {self:?}"
                )))
            }
        };
        Ok((start, end.max(start)))
    }

    /// Length from the first contained instant to the end.
    ///
    /// # Errors
    ///
    /// [`TimeError::Unsupported`] when either boundary is infinite.
    pub fn duration(&self) -> Result<T::Duration, TimeError> {
        let (start, end) = self.half_open_points()?;
        Ok(end.difference(&start))
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// Orders by first instant, then by last instant (i.e. by length).
    ///
    /// # Errors
    ///
    /// [`TimeError::Unsupported`] when either interval is infinite.
    pub fn compare_by_start_then_length(&self, other: &Self) -> Result<Ordering, TimeError> {
        if !self.is_finite() || !other.is_finite() {
            return Err(TimeError::Unsupported(
                "cannot compare infinite intervals by length".into(),
            ));
        }
        Ok(self
            .first()
            .cmp(&other.first())
            .then_with(|| self.last().cmp(&other.last())))
    }
}

/// Sorts intervals by start, then by length.
///
/// # Errors
///
/// [`TimeError::Unsupported`] if any interval is infinite; the slice is left
/// untouched.
pub fn sort_intervals<T: TimeInstant>(intervals: &mut [Interval<T>]) -> Result<(), TimeError> {
    if let Some(bad) = intervals.iter().find(|iv| !iv.is_finite()) {
        return Err(TimeError::Unsupported(format!(
            "cannot sort infinite interval {bad:?}"
        )));
    }
    intervals.sort_by(|a, b| a.first().cmp(&b.first()).then_with(|| a.last().cmp(&b.last())));
    Ok(())
}

/// Returns the gaps (complement) of `intervals` within the bounding `outer`
/// interval.
///
/// `intervals` must be sorted by start. The gaps come back in chronological
/// order, in half-open normal form. Runs in O(n) with a single pass.
pub fn complement_within<T: TimeInstant>(
    outer: &Interval<T>,
    intervals: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = outer.first();
    let hi = outer.last();
    for iv in intervals.iter().filter(|iv| !iv.is_empty()) {
        let (a, b) = (iv.first(), iv.last());
        if a > cursor {
            gaps.extend(Interval::from_bounds(cursor, a.prev().min(hi)));
        }
        let after = b.next();
        if after > cursor {
            cursor = after;
        }
    }
    gaps.extend(Interval::from_bounds(cursor, hi));
    gaps
}

/// Returns the overlaps of two sorted, non-overlapping interval lists.
///
/// Uses an O(n+m) merge; the result is in half-open normal form.
pub fn intersect_all<T: TimeInstant>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let first = a[i].first().max(b[j].first());
        let last = a[i].last().min(b[j].last());
        result.extend(Interval::from_bounds(first, last));
        if a[i].last() <= b[j].last() {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

// Display implementation
impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Boundary::Finite { edge, point } => {
                let bracket = if edge == IntervalEdge::Closed { '[' } else { '(' };
                write!(f, "{bracket}{point}")?;
            }
            _ => f.write_str("(-∞")?,
        }
        f.write_str("/")?;
        match self.end {
            Boundary::Finite { edge, point } => {
                let bracket = if edge == IntervalEdge::Closed { ']' } else { ')' };
                write!(f, "{point}{bracket}")
            }
            _ => f.write_str("+∞)"),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> Deserialize<'de> for Interval<T>
where
    T: TimeInstant + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            start: Boundary<T>,
            end: Boundary<T>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        Interval::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
