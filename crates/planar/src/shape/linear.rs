//! Lines and segments.
//!
//! Model
//! - `Linear<T, D, K>` stores its two defining points. The direction is
//!   derived on demand, so a segment whose extent does not fit in `T` is
//!   still valid; only `direction()`, `width()` and `height()` report the
//!   overflow. `K` is a zero-sized marker: `Infinite` for lines, `Finite` for
//!   segments.
//! - The defining points are stored in canonical order (smaller x first, then
//!   smaller y), so a segment built from `(a, b)` and one built from `(b, a)`
//!   are bit-identical.
//! - Equal defining points, or a null one, give the null line/segment.
//!
//! 2-D slope/intercept use `f64`; a vertical line has slope and intercept `+∞`.

use super::{Direction, Nullable, Point, Point2};
use nalgebra::SVector;
use crate::scalar::{self, round_nearest_cast, Scalar, Tolerance};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Marker for unbounded lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Infinite;

/// Marker for segments bounded by their two defining points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Finite;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(
    bound(
        serialize = "T: Scalar + Serialize, K: Copy",
        deserialize = "T: Scalar + Deserialize<'de>"
    ),
    into = "[Point<T, D>; 2]",
    from = "[Point<T, D>; 2]"
)]
pub struct Linear<T, const D: usize, K> {
    start: Point<T, D>,
    end: Point<T, D>,
    kind: PhantomData<K>,
}

pub type Line<T, const D: usize> = Linear<T, D, Infinite>;
pub type Segment<T, const D: usize> = Linear<T, D, Finite>;
pub type Line2<T> = Line<T, 2>;
pub type Segment2<T> = Segment<T, 2>;

/// Lexicographic order with tolerance; decides which defining point anchors.
fn canonical_order<T: Scalar, const D: usize>(a: &Point<T, D>, b: &Point<T, D>) -> Ordering {
    let tol = Tolerance::default();
    a.coords()
        .iter()
        .zip(b.coords().iter())
        .map(|(&x, &y)| tol.compare(x, y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

impl<T: Scalar, const D: usize, K> Linear<T, D, K> {
    /// Through two points, stored in canonical order.
    pub fn through(p1: Point<T, D>, p2: Point<T, D>) -> Self {
        if p1.is_null() || p2.is_null() || p1 == p2 {
            return Self::null();
        }
        let (a, b) = match canonical_order(&p1, &p2) {
            Ordering::Greater => (p2, p1),
            _ => (p1, p2),
        };
        Self {
            start: a,
            end: b,
            kind: PhantomData,
        }
    }

    /// Through `anchor` and `anchor + direction`.
    pub fn from_direction(anchor: Point<T, D>, direction: Direction<T, D>) -> Self {
        Self::through(anchor, anchor + direction)
    }

    #[inline]
    pub fn anchor(&self) -> Point<T, D> {
        self.start
    }

    /// `end − start`; null when a component does not fit in `T`.
    #[inline]
    pub fn direction(&self) -> Direction<T, D> {
        self.end - self.start
    }

    /// First defining point (canonical order).
    #[inline]
    pub fn start(&self) -> Point<T, D> {
        self.start
    }

    /// Second defining point (canonical order).
    #[inline]
    pub fn end(&self) -> Point<T, D> {
        self.end
    }

    /// `end − start` widened to `f64`, never overflowing.
    #[inline]
    pub(crate) fn span_vector(&self) -> SVector<f64, D> {
        self.end.to_vector() - self.start.to_vector()
    }

    #[inline]
    pub fn endpoints(&self) -> (Point<T, D>, Point<T, D>) {
        (self.start(), self.end())
    }

    /// `start + t·(end − start)`, round-cast into `T`.
    pub fn point_at(&self, t: f64) -> Point<T, D> {
        if self.is_null() {
            return Point::null();
        }
        let v = self.start.to_vector() + self.span_vector() * t;
        Point::from_vector(&v)
    }

    /// Parameter of the orthogonal projection of `p` (0 at `start`, 1 at `end`).
    pub fn parameter_of(&self, p: &Point<T, D>) -> f64 {
        if self.is_null() || p.is_null() {
            return f64::NAN;
        }
        let d = self.span_vector();
        (p.to_vector() - self.start.to_vector()).dot(&d) / d.norm_squared()
    }

    /// Same defining points, unbounded.
    #[inline]
    pub fn to_line(&self) -> Line<T, D> {
        Linear {
            start: self.start,
            end: self.end,
            kind: PhantomData,
        }
    }

    /// Same defining points, bounded.
    #[inline]
    pub fn to_segment(&self) -> Segment<T, D> {
        Linear {
            start: self.start,
            end: self.end,
            kind: PhantomData,
        }
    }
}

impl<T: Scalar, const D: usize, K> Nullable for Linear<T, D, K> {
    fn null() -> Self {
        Self {
            start: Point::null(),
            end: Point::null(),
            kind: PhantomData,
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.start.is_null() || self.end.is_null()
    }
}

impl<T: Scalar, const D: usize, K> Default for Linear<T, D, K> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Scalar, K> Linear<T, 2, K> {
    /// `Δy/Δx`; `+∞` for vertical and null.
    pub fn slope(&self) -> f64 {
        if self.is_null() || self.is_vertical() {
            return f64::INFINITY;
        }
        let d = self.span_vector();
        d.y / d.x
    }

    /// y at x = 0; `+∞` for vertical and null.
    pub fn intercept(&self) -> f64 {
        let m = self.slope();
        if m.is_infinite() {
            return f64::INFINITY;
        }
        self.start.y().as_f64() - m * self.start.x().as_f64()
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        !self.is_null() && scalar::equal(self.start.x(), self.end.x())
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        !self.is_null() && scalar::equal(self.start.y(), self.end.y())
    }

    /// Point of the supporting line with the given x. Null for vertical.
    pub fn at_x(&self, x: T) -> Point2<T> {
        match self.y_at(x.as_f64()) {
            Some(y) => Point2::new(x, round_nearest_cast(y)),
            None => Point2::null(),
        }
    }

    /// Point of the supporting line with the given y. Null for horizontal.
    pub fn at_y(&self, y: T) -> Point2<T> {
        if self.is_null() || self.is_horizontal() {
            return Point2::null();
        }
        if self.is_vertical() {
            return Point2::new(self.start.x(), y);
        }
        let x = (y.as_f64() - self.intercept()) / self.slope();
        Point2::new(round_nearest_cast(x), y)
    }

    pub(crate) fn y_at(&self, x: f64) -> Option<f64> {
        let m = self.slope();
        if m.is_infinite() {
            return None;
        }
        Some(m * x + self.intercept())
    }

    /// |Δx| between the defining points; the sentinel when it does not fit in `T`.
    pub fn width(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.end
            .x()
            .try_sub(self.start.x())
            .map_or_else(T::sentinel, Scalar::abs_val)
    }

    /// |Δy| between the defining points; the sentinel when it does not fit in `T`.
    pub fn height(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.end
            .y()
            .try_sub(self.start.y())
            .map_or_else(T::sentinel, Scalar::abs_val)
    }

    /// Inclusive extent test: `p` lies in the axis box spanned by the defining points.
    pub(crate) fn spans(&self, p: &Point2<T>) -> bool {
        let (a, b) = self.endpoints();
        let tol = Tolerance::default();
        let (x_lo, x_hi) = (scalar::min_of(a.x(), b.x()), scalar::max_of(a.x(), b.x()));
        let (y_lo, y_hi) = (scalar::min_of(a.y(), b.y()), scalar::max_of(a.y(), b.y()));
        tol.less_equal(x_lo, p.x())
            && tol.less_equal(p.x(), x_hi)
            && tol.less_equal(y_lo, p.y())
            && tol.less_equal(p.y(), y_hi)
    }
}

impl<T: Scalar, const D: usize> Linear<T, D, Infinite> {
    /// `+∞`, or `0.0` for the null line.
    pub fn length(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            f64::INFINITY
        }
    }
}

impl<T: Scalar, const D: usize> Linear<T, D, Finite> {
    /// Euclidean length; `0.0` for the null segment.
    pub fn length(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.span_vector().norm()
        }
    }

    pub fn midpoint(&self) -> Point<T, D> {
        self.point_at(0.5)
    }

    /// Point at `|distance|` inside the segment, measured from `start` when
    /// `distance < 0` and from `end` when `distance > 0`. Clamped to the
    /// opposite endpoint once `|distance| ≥ length`; `0` gives `start`.
    pub fn interpolate(&self, distance: f64) -> Point<T, D> {
        if self.is_null() {
            return Point::null();
        }
        let len = self.length();
        if distance == 0.0 {
            return self.start();
        }
        if scalar::greater_equal(distance.abs(), len) {
            return if distance > 0.0 { self.start() } else { self.end() };
        }
        if distance < 0.0 {
            self.point_at(-distance / len)
        } else {
            self.point_at(1.0 - distance / len)
        }
    }

    /// Point `|distance|` beyond the segment: past `start` when
    /// `distance < 0`, past `end` when `distance > 0`; `0` gives `start`.
    pub fn extrapolate(&self, distance: f64) -> Point<T, D> {
        if self.is_null() {
            return Point::null();
        }
        if distance == 0.0 {
            return self.start();
        }
        let len = self.length();
        if distance < 0.0 {
            self.point_at(distance / len)
        } else {
            self.point_at(1.0 + distance / len)
        }
    }
}

/// Either orientation counts as the same segment.
impl<T: Scalar, const D: usize> PartialEq for Linear<T, D, Finite> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => {
                let (a, b) = self.endpoints();
                let (c, d) = other.endpoints();
                (a == c && b == d) || (a == d && b == c)
            }
            _ => false,
        }
    }
}

/// Same infinite line: parallel and sharing a point.
impl<T: Scalar> PartialEq for Linear<T, 2, Infinite> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => {
                let u = self.span_vector().normalize();
                let v = other.span_vector().normalize();
                let w = other.start.to_vector() - self.start.to_vector();
                let w_cross = u.x * w.y - u.y * w.x;
                scalar::equal(u.x * v.y - u.y * v.x, 0.0) && scalar::equal(w_cross, 0.0)
            }
            _ => false,
        }
    }
}

impl<T: Scalar, const D: usize, K> fmt::Display for Linear<T, D, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        write!(f, "{}-->{}", self.start(), self.end())
    }
}

impl<T: Scalar, const D: usize, K> From<Linear<T, D, K>> for [Point<T, D>; 2] {
    fn from(l: Linear<T, D, K>) -> Self {
        if l.is_null() {
            return [Point::null(), Point::null()];
        }
        [l.start(), l.end()]
    }
}

impl<T: Scalar, const D: usize, K> From<[Point<T, D>; 2]> for Linear<T, D, K> {
    fn from([a, b]: [Point<T, D>; 2]) -> Self {
        Self::through(a, b)
    }
}
