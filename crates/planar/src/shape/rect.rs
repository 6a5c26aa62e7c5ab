//! Axis-aligned rectangle `[left, right] × [top, bottom]`.
//!
//! `top` is the smaller y (screen convention). Edges and corners are derived
//! on demand.

use super::{Nullable, Point2, Segment2};
use crate::scalar::{self, Scalar, Tolerance};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(
    bound(
        serialize = "T: Scalar + Serialize",
        deserialize = "T: Scalar + Deserialize<'de>"
    ),
    into = "Option<[T; 4]>",
    from = "Option<[T; 4]>"
)]
pub struct Rect<T> {
    left: T,
    right: T,
    top: T,
    bottom: T,
}

impl<T: Scalar> Rect<T> {
    /// Null when `left > right`, `top > bottom` or any side is the sentinel.
    pub fn new(left: T, right: T, top: T, bottom: T) -> Self {
        let tol = Tolerance::default();
        let sentinel = [left, right, top, bottom].iter().any(|v| v.is_sentinel());
        if sentinel || tol.greater_than(left, right) || tol.greater_than(top, bottom) {
            return Self::null();
        }
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// From the top-left corner and non-negative extents. Null when the far
    /// corner does not fit in `T`.
    pub fn from_corner(location: Point2<T>, width: T, height: T) -> Self {
        if location.is_null() || width.is_sentinel() || height.is_sentinel() {
            return Self::null();
        }
        match (location.x().try_add(width), location.y().try_add(height)) {
            (Some(right), Some(bottom)) => Self::new(location.x(), right, location.y(), bottom),
            _ => Self::null(),
        }
    }

    /// Smallest rect holding every non-null point; null when there is none.
    pub fn bounding<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2<T>>,
    {
        points
            .into_iter()
            .filter(|p| !p.is_null())
            .fold(None, |acc: Option<[T; 4]>, p| {
                Some(match acc {
                    None => [p.x(), p.x(), p.y(), p.y()],
                    Some([l, r, t, b]) => [
                        scalar::min_of(l, p.x()),
                        scalar::max_of(r, p.x()),
                        scalar::min_of(t, p.y()),
                        scalar::max_of(b, p.y()),
                    ],
                })
            })
            .map_or_else(Self::null, |[l, r, t, b]| Self::new(l, r, t, b))
    }

    #[inline]
    pub fn left(&self) -> T {
        self.left
    }

    #[inline]
    pub fn right(&self) -> T {
        self.right
    }

    #[inline]
    pub fn top(&self) -> T {
        self.top
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.bottom
    }

    /// Zero for null; the sentinel when the extent does not fit in `T`.
    pub fn width(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.right.try_sub(self.left).unwrap_or_else(T::sentinel)
    }

    /// Zero for null; the sentinel when the extent does not fit in `T`.
    pub fn height(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.bottom.try_sub(self.top).unwrap_or_else(T::sentinel)
    }

    /// The sentinel on overflow, like `width`.
    pub fn area(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        let area = || self.right.try_sub(self.left)?.try_mul(self.bottom.try_sub(self.top)?);
        area().unwrap_or_else(T::sentinel)
    }

    pub fn perimeter(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        let half = || self.right.try_sub(self.left)?.try_add(self.bottom.try_sub(self.top)?);
        half()
            .and_then(|h| h.try_add(h))
            .unwrap_or_else(T::sentinel)
    }

    pub fn tl(&self) -> Point2<T> {
        Point2::new(self.left, self.top)
    }

    pub fn tr(&self) -> Point2<T> {
        Point2::new(self.right, self.top)
    }

    pub fn br(&self) -> Point2<T> {
        Point2::new(self.right, self.bottom)
    }

    pub fn bl(&self) -> Point2<T> {
        Point2::new(self.left, self.bottom)
    }

    pub fn corners(&self) -> [Point2<T>; 4] {
        [self.tl(), self.tr(), self.br(), self.bl()]
    }

    pub fn left_edge(&self) -> Segment2<T> {
        Segment2::through(self.tl(), self.bl())
    }

    pub fn right_edge(&self) -> Segment2<T> {
        Segment2::through(self.tr(), self.br())
    }

    pub fn top_edge(&self) -> Segment2<T> {
        Segment2::through(self.tl(), self.tr())
    }

    pub fn bottom_edge(&self) -> Segment2<T> {
        Segment2::through(self.bl(), self.br())
    }

    /// Left, right, top, bottom.
    pub fn edges(&self) -> [Segment2<T>; 4] {
        [
            self.left_edge(),
            self.right_edge(),
            self.top_edge(),
            self.bottom_edge(),
        ]
    }

    /// Inclusive containment with tolerance.
    pub fn contains(&self, p: &Point2<T>) -> bool {
        if self.is_null() || p.is_null() {
            return false;
        }
        let tol = Tolerance::default();
        tol.less_equal(self.left, p.x())
            && tol.less_equal(p.x(), self.right)
            && tol.less_equal(self.top, p.y())
            && tol.less_equal(p.y(), self.bottom)
    }
}

impl<T: Scalar> Nullable for Rect<T> {
    fn null() -> Self {
        let s = T::sentinel();
        Self {
            left: s,
            right: s,
            top: s,
            bottom: s,
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.left.is_sentinel()
    }
}

impl<T: Scalar> Default for Rect<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Scalar> PartialEq for Rect<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => {
                let tol = Tolerance::default();
                tol.equal(self.left, other.left)
                    && tol.equal(self.right, other.right)
                    && tol.equal(self.top, other.top)
                    && tol.equal(self.bottom, other.bottom)
            }
            _ => false,
        }
    }
}

impl<T: Scalar> fmt::Display for Rect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        write!(
            f,
            "Rect(l={}, r={}, t={}, b={})",
            self.left, self.right, self.top, self.bottom
        )
    }
}

impl<T: Scalar> From<Rect<T>> for Option<[T; 4]> {
    fn from(r: Rect<T>) -> Self {
        if r.is_null() {
            None
        } else {
            Some([r.left, r.right, r.top, r.bottom])
        }
    }
}

impl<T: Scalar> From<Option<[T; 4]>> for Rect<T> {
    fn from(raw: Option<[T; 4]>) -> Self {
        match raw {
            Some([l, r, t, b]) => Self::new(l, r, t, b),
            None => Self::null(),
        }
    }
}
