//! Line/Segment × Line/Segment → crossing point.

use super::point::on_supporting_line;
use super::Overlap;
use crate::hull::{turn, Turn};
use crate::scalar::{round_nearest_cast, Scalar};
use crate::shape::{Line2, Linear, Nullable, Point2, Segment2};
use nalgebra::{Matrix2, Vector2};
use tracing::trace;

/// Crossing of the two supporting lines; null when parallel (or coincident).
///
/// A vertical operand fixes x directly. Otherwise the system
/// `y − m₁x = c₁, y − m₂x = c₂` is solved by inverting its matrix.
pub(super) fn supporting_lines_cross<T: Scalar, K1, K2>(
    a: &Linear<T, 2, K1>,
    b: &Linear<T, 2, K2>,
) -> Point2<T> {
    if a.is_null() || b.is_null() {
        return Point2::null();
    }
    let (m1, m2) = (a.slope(), b.slope());
    let (v1, v2) = (m1.is_infinite(), m2.is_infinite());
    if (v1 && v2) || (!v1 && !v2 && crate::scalar::equal(m1, m2)) {
        trace!(m1, m2, "parallel lines do not cross");
        return Point2::null();
    }
    let xy = if v1 {
        let x = a.anchor().x();
        b.y_at(x.as_f64()).map(|y| Vector2::new(x.as_f64(), y))
    } else if v2 {
        let x = b.anchor().x();
        a.y_at(x.as_f64()).map(|y| Vector2::new(x.as_f64(), y))
    } else {
        solve_slope_intercept(m1, a.intercept(), m2, b.intercept())
    };
    match xy {
        Some(v) => Point2::new(round_nearest_cast(v.x), round_nearest_cast(v.y)),
        None => Point2::null(),
    }
}

fn solve_slope_intercept(m1: f64, c1: f64, m2: f64, c2: f64) -> Option<Vector2<f64>> {
    let a = Matrix2::new(-m1, 1.0, -m2, 1.0);
    if a.determinant().abs() < 1e-12 {
        return None;
    }
    let inv = a.try_inverse()?;
    Some(inv * Vector2::new(c1, c2))
}

impl<T: Scalar> Overlap for Line2<T> {
    type Output = Point2<T>;

    fn overlap(&self, rhs: &Line2<T>) -> Point2<T> {
        supporting_lines_cross(self, rhs)
    }
}

impl<T: Scalar> Overlap<Segment2<T>> for Line2<T> {
    type Output = Point2<T>;

    /// The lines' crossing, kept only when it falls within the segment.
    fn overlap(&self, seg: &Segment2<T>) -> Point2<T> {
        let p = supporting_lines_cross(self, seg);
        if !p.is_null() && seg.spans(&p) {
            p
        } else {
            Point2::null()
        }
    }
}

impl<T: Scalar> Overlap for Segment2<T> {
    type Output = Point2<T>;

    /// Orientation test. A proper crossing yields the crossing point, an
    /// endpoint touching the other segment yields that endpoint. Collinear
    /// segments sharing exactly one point yield it; a shared stretch of
    /// positive length is not a single point and yields null.
    fn overlap(&self, rhs: &Segment2<T>) -> Point2<T> {
        if self.is_null() || rhs.is_null() {
            return Point2::null();
        }
        let (p1, p2) = self.endpoints();
        let (q1, q2) = rhs.endpoints();
        let d1 = turn(&q1, &q2, &p1);
        let d2 = turn(&q1, &q2, &p2);
        let d3 = turn(&p1, &p2, &q1);
        let d4 = turn(&p1, &p2, &q2);

        let all_collinear = [d1, d2, d3, d4].iter().all(|&d| d == Turn::Collinear);
        if all_collinear {
            return collinear_touch(self, rhs);
        }
        let opposite = |a: Turn, b: Turn| {
            matches!((a, b), (Turn::Left, Turn::Right) | (Turn::Right, Turn::Left))
        };
        if opposite(d1, d2) && opposite(d3, d4) {
            return supporting_lines_cross(self, rhs);
        }
        let touching = [(d1, p1, rhs), (d2, p2, rhs), (d3, q1, self), (d4, q2, self)];
        touching
            .iter()
            .find(|(d, pt, other)| *d == Turn::Collinear && other.spans(pt))
            .map_or_else(Point2::null, |&(_, pt, _)| pt)
    }
}

/// Shared point of two collinear segments, if there is exactly one.
fn collinear_touch<T: Scalar>(a: &Segment2<T>, b: &Segment2<T>) -> Point2<T> {
    let (p1, p2) = a.endpoints();
    let (q1, q2) = b.endpoints();
    let mut shared: Vec<Point2<T>> = Vec::with_capacity(4);
    for (pt, other) in [(p1, b), (p2, b), (q1, a), (q2, a)] {
        if on_supporting_line(&pt, other) && other.spans(&pt) && !shared.contains(&pt) {
            shared.push(pt);
        }
    }
    match shared.as_slice() {
        [only] => *only,
        _ => Point2::null(),
    }
}

commute! {
    Segment2<T>, Line2<T> => Point2<T>;
}
