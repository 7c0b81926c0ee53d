// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interval boundaries.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a finite boundary belongs to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntervalEdge {
    /// The boundary point is excluded.
    Open,
    /// The boundary point is included.
    Closed,
}

/// Start or end of an interval.
///
/// Infinite boundaries carry no point and count as open. Ordering between
/// boundaries is point-wise (see [`Boundary::compare_points`]); the infinities
/// sort outside all finite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary<T> {
    InfinitePast,
    Finite { edge: IntervalEdge, point: T },
    InfiniteFuture,
}

impl<T: Copy + Ord> Boundary<T> {
    #[inline]
    pub const fn of_open(point: T) -> Self {
        Boundary::Finite {
            edge: IntervalEdge::Open,
            point,
        }
    }

    #[inline]
    pub const fn of_closed(point: T) -> Self {
        Boundary::Finite {
            edge: IntervalEdge::Closed,
            point,
        }
    }

    #[inline]
    pub const fn of(edge: IntervalEdge, point: T) -> Self {
        Boundary::Finite { edge, point }
    }

    #[inline]
    pub const fn infinite_past() -> Self {
        Boundary::InfinitePast
    }

    #[inline]
    pub const fn infinite_future() -> Self {
        Boundary::InfiniteFuture
    }

    pub fn is_open(&self) -> bool {
        self.edge() == IntervalEdge::Open
    }

    pub fn is_closed(&self) -> bool {
        self.edge() == IntervalEdge::Closed
    }

    pub fn is_infinite(&self) -> bool {
        !matches!(self, Boundary::Finite { .. })
    }

    /// Edge kind; [`IntervalEdge::Open`] for the infinities.
    pub fn edge(&self) -> IntervalEdge {
        match self {
            Boundary::Finite { edge, .. } => *edge,
            _ => IntervalEdge::Open,
        }
    }

    /// The boundary point, `None` when infinite.
    pub fn temporal(&self) -> Option<T> {
        match self {
            Boundary::Finite { point, .. } => Some(*point),
            _ => None,
        }
    }

    /// Applies `f` to a finite point and keeps the edge.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Boundary<U>, E> {
        Ok(match self {
            Boundary::InfinitePast => Boundary::InfinitePast,
            Boundary::Finite { edge, point } => Boundary::Finite {
                edge,
                point: f(point)?,
            },
            Boundary::InfiniteFuture => Boundary::InfiniteFuture,
        })
    }

    /// Compares positions, ignoring edges.
    pub fn compare_points(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| match (self, other) {
                (Boundary::Finite { point: a, .. }, Boundary::Finite { point: b, .. }) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }

    const fn rank(&self) -> u8 {
        match self {
            Boundary::InfinitePast => 0,
            Boundary::Finite { .. } => 1,
            Boundary::InfiniteFuture => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_and_flags() {
        let open = Boundary::of_open(5);
        let closed = Boundary::of_closed(5);
        assert!(open.is_open() && !open.is_closed() && !open.is_infinite());
        assert!(closed.is_closed());
        assert_eq!(closed.temporal(), Some(5));
        let past: Boundary<i32> = Boundary::infinite_past();
        assert!(past.is_infinite() && past.is_open());
        assert_eq!(past.temporal(), None);
        assert_ne!(open, closed);
    }

    #[test]
    fn point_ordering_puts_infinities_outside() {
        let past: Boundary<i32> = Boundary::infinite_past();
        let future: Boundary<i32> = Boundary::infinite_future();
        let a = Boundary::of_open(i32::MIN);
        let b = Boundary::of_closed(i32::MAX);
        assert_eq!(past.compare_points(&a), Ordering::Less);
        assert_eq!(b.compare_points(&future), Ordering::Less);
        assert_eq!(a.compare_points(&b), Ordering::Less);
        assert_eq!(Boundary::of_open(3).compare_points(&Boundary::of_closed(3)), Ordering::Equal);
        assert_eq!(future.compare_points(&future), Ordering::Equal);
    }

    #[test]
    fn try_map_keeps_edges() {
        let b = Boundary::of_open(2).try_map(|p| Ok::<_, ()>(p * 10)).unwrap();
        assert_eq!(b, Boundary::of_open(20));
        let inf: Boundary<i32> = Boundary::InfiniteFuture;
        assert_eq!(inf.try_map(|p| Ok::<_, ()>(p + 1)).unwrap(), Boundary::InfiniteFuture);
        assert!(Boundary::of_closed(1).try_map(|_| Err::<i32, _>("boom")).is_err());
    }
}
