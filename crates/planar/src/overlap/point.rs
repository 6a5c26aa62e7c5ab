//! Point × anything.

use super::Overlap;
use crate::hull::{turn, Turn};
use crate::scalar::{self, Scalar};
use crate::shape::{Line2, Linear, Nullable, Point, Point2, Polygon, Rect, Segment2};

impl<T: Scalar, const D: usize> Overlap for Point<T, D> {
    type Output = Point<T, D>;

    fn overlap(&self, rhs: &Self) -> Point<T, D> {
        if self.is_null() || rhs.is_null() || self != rhs {
            return Point::null();
        }
        *self
    }
}

/// On the supporting line: equal x for a vertical line, otherwise
/// `y == slope·x + intercept`, evaluated as a collinearity test so integer
/// inputs stay exact.
pub(super) fn on_supporting_line<T: Scalar, K>(p: &Point2<T>, l: &Linear<T, 2, K>) -> bool {
    if p.is_null() || l.is_null() {
        return false;
    }
    if l.is_vertical() {
        return scalar::equal(p.x(), l.anchor().x());
    }
    turn(&l.start(), &l.end(), p) == Turn::Collinear
}

impl<T: Scalar> Overlap<Line2<T>> for Point2<T> {
    type Output = Point2<T>;

    fn overlap(&self, line: &Line2<T>) -> Point2<T> {
        if on_supporting_line(self, line) {
            *self
        } else {
            Point2::null()
        }
    }
}

impl<T: Scalar> Overlap<Segment2<T>> for Point2<T> {
    type Output = Point2<T>;

    fn overlap(&self, seg: &Segment2<T>) -> Point2<T> {
        if on_supporting_line(self, seg) && seg.spans(self) {
            *self
        } else {
            Point2::null()
        }
    }
}

impl<T: Scalar> Overlap<Rect<T>> for Point2<T> {
    type Output = Point2<T>;

    fn overlap(&self, rect: &Rect<T>) -> Point2<T> {
        if rect.contains(self) {
            *self
        } else {
            Point2::null()
        }
    }
}

impl<T: Scalar> Overlap<Polygon<T>> for Point2<T> {
    type Output = Point2<T>;

    /// Bounding-box rejection, then the point must not lie to the right of
    /// any hull edge (the hull is counter-clockwise). Boundary points count.
    fn overlap(&self, poly: &Polygon<T>) -> Point2<T> {
        if self.is_null() || poly.is_null() || !poly.bounding_box().contains(self) {
            return Point2::null();
        }
        let v = poly.vertices();
        let n = v.len();
        let inside = (0..n).all(|i| turn(&v[i], &v[(i + 1) % n], self) != Turn::Right);
        if inside {
            *self
        } else {
            Point2::null()
        }
    }
}

commute! {
    Line2<T>, Point2<T> => Point2<T>;
    Segment2<T>, Point2<T> => Point2<T>;
    Rect<T>, Point2<T> => Point2<T>;
    Polygon<T>, Point2<T> => Point2<T>;
}
