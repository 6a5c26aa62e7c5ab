//! Graham-scan convex hull.
//!
//! Purpose
//! - Turn an arbitrary point set into the counter-clockwise vertex sequence a
//!   `Polygon` stores, plus the bounding box of the input.
//!
//! Algorithm
//! - Drop null points; fewer than 3 left ⇒ no hull.
//! - Pivot: lowest y, ties broken by lowest x.
//! - Sort the rest by polar angle around the pivot, closer first on equal
//!   angles; points equal to the pivot are dropped. Integer types sort with
//!   the exact turn test instead of `atan2`.
//! - Stack scan. Left turn pushes. Right turn pops and retries. Collinear keeps
//!   whichever of stack top and candidate lies farther from the point below
//!   the top, so interior collinear points never survive.
//! - Fewer than 3 vertices at the end (all input collinear or coincident) ⇒ no hull.
//!
//! Turn tests on integer coordinates are exact over the whole range of the
//! type (128-bit products). Float coordinates compare the two cross-product
//! terms with `T`'s epsilon rather than their difference with zero, so the
//! collinearity test scales with coordinate magnitude.
//!
//! Code cross-refs: `shape::Polygon::add_points`, `overlap` (point in polygon)

use crate::scalar::{widened_tolerance, Scalar, Tolerance, WideProduct};
use crate::shape::{Nullable, Point2, Rect};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Result of a successful scan.
#[derive(Clone, Debug)]
pub struct Hull<T> {
    /// Counter-clockwise, starting at the pivot.
    pub vertices: Vec<Point2<T>>,
    /// Bounds of the non-null input points.
    pub bounding_box: Rect<T>,
}

impl<T: Scalar> PartialEq for Hull<T> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.bounding_box == other.bounding_box
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise.
    Left,
    Collinear,
    /// Clockwise.
    Right,
}

/// Signed doubled area of `(p0, p1, p2)`; positive for a left turn.
///
/// The sentinel when a point is null or the area does not fit in `T`; `turn`
/// has no such limit.
pub fn orientation<T: Scalar>(p0: &Point2<T>, p1: &Point2<T>, p2: &Point2<T>) -> T {
    if p0.is_null() || p1.is_null() || p2.is_null() {
        return T::sentinel();
    }
    let area = || {
        let lhs = p1.x().try_sub(p0.x())?.try_mul(p2.y().try_sub(p0.y())?)?;
        let rhs = p1.y().try_sub(p0.y())?.try_mul(p2.x().try_sub(p0.x())?)?;
        lhs.try_sub(rhs)
    };
    area().unwrap_or_else(T::sentinel)
}

/// Direction of travel `p0 → p1 → p2`, with near-collinear snapped to `Collinear`.
/// Exact for integer coordinates.
pub fn turn<T: Scalar>(p0: &Point2<T>, p1: &Point2<T>, p2: &Point2<T>) -> Turn {
    let exact = if T::EXACT { exact_cross_cmp(p0, p1, p2) } else { None };
    let ord = exact.unwrap_or_else(|| {
        let (a, b, c) = (p0.to_vector(), p1.to_vector(), p2.to_vector());
        let lhs = (b.x - a.x) * (c.y - a.y);
        let rhs = (b.y - a.y) * (c.x - a.x);
        widened_tolerance::<T>().compare(lhs, rhs)
    });
    match ord {
        Ordering::Greater => Turn::Left,
        Ordering::Equal => Turn::Collinear,
        Ordering::Less => Turn::Right,
    }
}

fn exact_cross_cmp<T: Scalar>(p0: &Point2<T>, p1: &Point2<T>, p2: &Point2<T>) -> Option<Ordering> {
    if p0.is_null() || p1.is_null() || p2.is_null() {
        return None;
    }
    let lhs = WideProduct::of_differences(p1.x(), p0.x(), p2.y(), p0.y())?;
    let rhs = WideProduct::of_differences(p1.y(), p0.y(), p2.x(), p0.x())?;
    Some(lhs.cmp(&rhs))
}

/// `|Δx| + |Δy|` in 128 bits. Orders points on one ray exactly like the
/// Euclidean distance does.
fn taxicab<T: Scalar>(from: &Point2<T>, to: &Point2<T>) -> Option<u128> {
    let dx = to.x().to_i128()?.checked_sub(from.x().to_i128()?)?;
    let dy = to.y().to_i128()?.checked_sub(from.y().to_i128()?)?;
    dx.unsigned_abs().checked_add(dy.unsigned_abs())
}

/// `a` lies farther from `from` than `b` does; the three are collinear.
fn farther<T: Scalar>(from: &Point2<T>, a: &Point2<T>, b: &Point2<T>) -> bool {
    if T::EXACT {
        if let (Some(da), Some(db)) = (taxicab(from, a), taxicab(from, b)) {
            return da > db;
        }
    }
    widened_tolerance::<T>().greater_than(from.distance(a), from.distance(b))
}

/// Counter-clockwise order around `pivot`, closer first on a shared ray.
///
/// Every point lies at an angle in `[0, π)` from the lowest-then-leftmost
/// pivot, so for integers the exact turn test is a total order.
fn sort_by_angle<T: Scalar>(pivot: &Point2<T>, rest: &mut Vec<Point2<T>>) {
    if T::EXACT {
        rest.sort_by(|a, b| match turn(pivot, a, b) {
            Turn::Left => Ordering::Less,
            Turn::Right => Ordering::Greater,
            Turn::Collinear => taxicab(pivot, a).cmp(&taxicab(pivot, b)),
        });
        return;
    }
    let origin = pivot.to_vector();
    // (point, polar angle, squared distance), all relative to the pivot.
    let mut keyed: Vec<(Point2<T>, f64, f64)> = rest
        .iter()
        .map(|p| {
            let d = p.to_vector() - origin;
            (*p, d.y.atan2(d.x), d.norm_squared())
        })
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.2.total_cmp(&b.2)));
    *rest = keyed.into_iter().map(|(p, _, _)| p).collect();
}

/// Convex hull of `points`, or `None` when fewer than 3 hull vertices exist.
pub fn convex_hull<T: Scalar>(points: &[Point2<T>]) -> Option<Hull<T>> {
    let pts: Vec<Point2<T>> = points.iter().copied().filter(|p| !p.is_null()).collect();
    if pts.len() < 3 {
        trace!(n = pts.len(), "hull: fewer than 3 usable points");
        return None;
    }
    let bounding_box = Rect::bounding(&pts);

    let tol = Tolerance::<T>::default();
    let pivot = pts.iter().copied().reduce(|best, p| match tol.compare(p.y(), best.y()) {
        Ordering::Less => p,
        Ordering::Equal if tol.less_than(p.x(), best.x()) => p,
        _ => best,
    })?;

    let mut rest: Vec<Point2<T>> = pts.iter().copied().filter(|p| *p != pivot).collect();
    sort_by_angle(&pivot, &mut rest);
    rest.dedup_by(|a, b| a == b);

    let mut stack: Vec<Point2<T>> = Vec::with_capacity(rest.len() + 1);
    stack.push(pivot);
    for &cand in &rest {
        loop {
            let n = stack.len();
            if n < 2 {
                stack.push(cand);
                break;
            }
            let (below, top) = (stack[n - 2], stack[n - 1]);
            match turn(&below, &top, &cand) {
                Turn::Left => {
                    stack.push(cand);
                    break;
                }
                Turn::Right => {
                    stack.pop();
                }
                Turn::Collinear => {
                    if farther(&below, &cand, &top) {
                        stack.pop();
                    } else {
                        break;
                    }
                }
            }
        }
    }

    // Points on the closing edge (collinear with the pivot) are not vertices.
    while stack.len() >= 3 {
        let n = stack.len();
        if turn(&stack[n - 2], &stack[n - 1], &pivot) == Turn::Left {
            break;
        }
        stack.pop();
    }

    if stack.len() < 3 {
        debug!(
            input = pts.len(),
            vertices = stack.len(),
            "hull: input is collinear or coincident"
        );
        return None;
    }
    Some(Hull {
        vertices: stack,
        bounding_box,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn square_with_centre() {
        let pts = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0), p(2.0, 2.0)];
        let h = convex_hull(&pts).expect("hull");
        assert_eq!(
            h.vertices,
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]
        );
        assert_eq!(h.bounding_box, Rect::new(0.0, 4.0, 0.0, 4.0));
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = [p(2.0, 2.0), p(0.0, 4.0), p(4.0, 0.0), p(0.0, 0.0), p(4.0, 4.0)];
        let b = [p(4.0, 4.0), p(0.0, 0.0), p(2.0, 2.0), p(4.0, 0.0), p(0.0, 4.0)];
        assert_eq!(convex_hull(&a), convex_hull(&b));
    }

    #[test]
    fn drops_collinear_edge_points_and_duplicates() {
        let pts = [
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
            p(1.0, 1.0),
            p(0.0, 2.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
        ];
        let h = convex_hull(&pts).expect("hull");
        assert_eq!(
            h.vertices,
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]
        );
    }

    #[test]
    fn is_counter_clockwise_and_idempotent() {
        let pts = [
            p(3.0, 1.0),
            p(-1.0, 2.5),
            p(0.5, -2.0),
            p(2.0, 3.0),
            p(0.0, 0.0),
            p(-2.0, -1.0),
        ];
        let h = convex_hull(&pts).expect("hull");
        let v = &h.vertices;
        for i in 0..v.len() {
            let (a, b, c) = (v[i], v[(i + 1) % v.len()], v[(i + 2) % v.len()]);
            assert_eq!(turn(&a, &b, &c), Turn::Left);
        }
        let again = convex_hull(v).expect("hull");
        assert_eq!(&again.vertices, v);
    }

    #[test]
    fn pivot_is_lowest_then_leftmost() {
        let pts = [p(5.0, 1.0), p(1.0, 1.0), p(3.0, 4.0)];
        let h = convex_hull(&pts).expect("hull");
        assert_eq!(h.vertices[0], p(1.0, 1.0));
    }

    #[test]
    fn degenerate_inputs_have_no_hull() {
        assert!(convex_hull::<f64>(&[]).is_none());
        assert!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0)]).is_none());
        assert!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)]).is_none());
        assert!(convex_hull(&[p(1.0, 1.0); 5]).is_none());
        let with_nulls = [p(0.0, 0.0), Point2::null(), p(1.0, 0.0), Point2::null()];
        assert!(convex_hull(&with_nulls).is_none());
    }

    #[test]
    fn integer_coordinates() {
        let pts: Vec<Point2<i32>> = [(0, 0), (10, 0), (5, 3), (10, 10), (0, 10), (5, 10)]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        let h = convex_hull(&pts).expect("hull");
        assert_eq!(h.vertices.len(), 4);
        assert_eq!(h.bounding_box, Rect::new(0, 10, 0, 10));
        assert_eq!(orientation(&pts[0], &pts[1], &pts[3]), 100);
    }

    #[test]
    fn large_integer_coordinates_stay_exact() {
        // Cross product is -1 while each term is about 1e18, past f64's 2^53.
        let (a, b, c) = (
            Point2::new(0_i32, 0),
            Point2::new(999_999_999, 1_000_000_000),
            Point2::new(1_000_000_000, 1_000_000_001),
        );
        assert_eq!(turn(&a, &b, &c), Turn::Right);
        assert_eq!(turn(&a, &c, &b), Turn::Left);
        let h = convex_hull(&[a, b, c]).expect("a thin triangle is still a hull");
        assert_eq!(h.vertices, vec![a, c, b]);

        let far = |x: i64, y: i64| Point2::new(x, y);
        let pts = [
            far(i64::MIN + 1, i64::MIN + 1),
            far(i64::MAX - 1, i64::MIN + 1),
            far(i64::MAX - 1, i64::MAX - 1),
            far(i64::MIN + 1, i64::MAX - 1),
            far(0, 0),
            far(i64::MAX - 1, 0),
        ];
        let h = convex_hull(&pts).expect("hull");
        assert_eq!(h.vertices.len(), 4);
        assert_eq!(turn(&pts[0], &pts[4], &pts[2]), Turn::Collinear);
    }

    #[test]
    fn orientation_overflow_is_sentinel() {
        let (a, b, c) = (
            Point2::new(-2_000_000_000_i32, 0),
            Point2::new(2_000_000_000, 0),
            Point2::new(0, 5),
        );
        assert_eq!(orientation(&a, &b, &c), i32::sentinel());
        assert_eq!(turn(&a, &b, &c), Turn::Left);
        assert_eq!(orientation(&Point2::null(), &b, &c), i32::sentinel());
    }

    #[test]
    fn turn_classification() {
        let (a, b) = (p(0.0, 0.0), p(1.0, 0.0));
        assert_eq!(turn(&a, &b, &p(2.0, 1.0)), Turn::Left);
        assert_eq!(turn(&a, &b, &p(2.0, -1.0)), Turn::Right);
        assert_eq!(turn(&a, &b, &p(3.0, 0.0)), Turn::Collinear);
        assert_eq!(turn(&p(0.0, 0.0), &p(1e6, 1e6 / 3.0), &p(3e6, 1e6)), Turn::Collinear);
    }
}
