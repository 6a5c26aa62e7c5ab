//! Overlaps involving an area: Line/Segment × Rect/Polygon, Rect × Rect.

use super::linear::supporting_lines_cross;
use super::Overlap;
use crate::scalar::{self, Scalar, Tolerance};
use crate::shape::{Line2, Linear, Nullable, Polygon, Rect, Segment2};
use tracing::trace;

/// Chord of `rect` cut by the supporting line of `l`.
///
/// Each rect edge is intersected as an infinite line; a hit counts only when
/// it lies strictly inside that edge's span. The chord joins the first pair of
/// qualifying edges in the order (l,r), (l,t), (l,b), (r,t), (r,b), (t,b).
/// A line through a corner therefore never qualifies at that corner.
fn chord<T: Scalar, K>(l: &Linear<T, 2, K>, rect: &Rect<T>) -> Segment2<T> {
    if l.is_null() || rect.is_null() {
        return Segment2::null();
    }
    let tol = Tolerance::default();
    let strictly_within = |lo: T, v: T, hi: T| tol.less_than(lo, v) && tol.less_than(v, hi);
    let vertical_hit = |edge: Segment2<T>| {
        let p = supporting_lines_cross(l, &edge);
        (!p.is_null() && strictly_within(rect.top(), p.y(), rect.bottom())).then_some(p)
    };
    let horizontal_hit = |edge: Segment2<T>| {
        let p = supporting_lines_cross(l, &edge);
        (!p.is_null() && strictly_within(rect.left(), p.x(), rect.right())).then_some(p)
    };
    let left = vertical_hit(rect.left_edge());
    let right = vertical_hit(rect.right_edge());
    let top = horizontal_hit(rect.top_edge());
    let bottom = horizontal_hit(rect.bottom_edge());

    let pairs = [
        (left, right),
        (left, top),
        (left, bottom),
        (right, top),
        (right, bottom),
        (top, bottom),
    ];
    pairs
        .into_iter()
        .find_map(|pair| match pair {
            (Some(a), Some(b)) => Some(Segment2::through(a, b)),
            _ => None,
        })
        .unwrap_or_else(Segment2::null)
}

/// Part of the chord inside `seg`'s own parameter range `[0, 1]`.
fn clip_to_segment<T: Scalar>(seg: &Segment2<T>, chord: Segment2<T>) -> Segment2<T> {
    if chord.is_null() {
        return Segment2::null();
    }
    let (mut t0, mut t1) = (seg.parameter_of(&chord.start()), seg.parameter_of(&chord.end()));
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    let (lo, hi) = (t0.max(0.0), t1.min(1.0));
    if !scalar::less_than(lo, hi) {
        trace!(lo, hi, "segment misses the chord");
        return Segment2::null();
    }
    let at = |t: f64| {
        if t <= 0.0 {
            seg.start()
        } else if t >= 1.0 {
            seg.end()
        } else {
            seg.point_at(t)
        }
    };
    Segment2::through(at(lo), at(hi))
}

impl<T: Scalar> Overlap<Rect<T>> for Line2<T> {
    type Output = Segment2<T>;

    fn overlap(&self, rect: &Rect<T>) -> Segment2<T> {
        chord(self, rect)
    }
}

impl<T: Scalar> Overlap<Rect<T>> for Segment2<T> {
    type Output = Segment2<T>;

    fn overlap(&self, rect: &Rect<T>) -> Segment2<T> {
        clip_to_segment(self, chord(self, rect))
    }
}

impl<T: Scalar> Overlap<Polygon<T>> for Line2<T> {
    type Output = Segment2<T>;

    /// Approximation: the chord of the polygon's bounding box, not of the hull.
    fn overlap(&self, poly: &Polygon<T>) -> Segment2<T> {
        chord(self, &poly.bounding_box())
    }
}

impl<T: Scalar> Overlap<Polygon<T>> for Segment2<T> {
    type Output = Segment2<T>;

    /// Approximation: clipped against the polygon's bounding box, not the hull.
    fn overlap(&self, poly: &Polygon<T>) -> Segment2<T> {
        clip_to_segment(self, chord(self, &poly.bounding_box()))
    }
}

impl<T: Scalar> Overlap for Rect<T> {
    type Output = Rect<T>;

    /// Intersection box; null unless both extents are strictly positive.
    fn overlap(&self, rhs: &Rect<T>) -> Rect<T> {
        if self.is_null() || rhs.is_null() {
            return Rect::null();
        }
        let l = scalar::max_of(self.left(), rhs.left());
        let r = scalar::min_of(self.right(), rhs.right());
        let t = scalar::max_of(self.top(), rhs.top());
        let b = scalar::min_of(self.bottom(), rhs.bottom());
        if !(scalar::less_than(l, r) && scalar::less_than(t, b)) {
            return Rect::null();
        }
        Rect::new(l, r, t, b)
    }
}

commute! {
    Rect<T>, Line2<T> => Segment2<T>;
    Rect<T>, Segment2<T> => Segment2<T>;
    Polygon<T>, Line2<T> => Segment2<T>;
    Polygon<T>, Segment2<T> => Segment2<T>;
}
