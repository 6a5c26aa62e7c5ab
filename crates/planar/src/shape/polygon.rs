//! Convex polygon: the hull of every point ever added, plus its bounding box.
//!
//! Invariants
//! - When valid, `points` is exactly the counter-clockwise output of
//!   `hull::convex_hull` and `bounding_box` bounds the points fed to it.
//! - When the accumulated points have fewer than 3 hull vertices, the polygon
//!   is null: `size() == 0`, null bounding box. The raw candidates are kept so
//!   a later `add_points` can complete the polygon.
//! - Every mutation rebuilds the hull from scratch over the accumulated set.

use super::{Nullable, Point2, Rect, Segment2};
use crate::hull;
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use tracing::trace;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    bound(
        serialize = "T: Scalar + Serialize",
        deserialize = "T: Scalar + Deserialize<'de>"
    ),
    into = "Vec<Point2<T>>",
    from = "Vec<Point2<T>>"
)]
pub struct Polygon<T> {
    points: Vec<Point2<T>>,
    bounding_box: Rect<T>,
}

impl<T: Scalar> Polygon<T> {
    /// The empty (null) polygon.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            bounding_box: Rect::null(),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point2<T>>>(points: I) -> Self {
        let mut poly = Self::new();
        poly.add_points(points);
        poly
    }

    pub fn add_point(&mut self, p: Point2<T>) {
        self.add_points(std::iter::once(p));
    }

    /// Append candidates and rebuild the hull over everything accumulated.
    /// Null points are dropped.
    pub fn add_points<I: IntoIterator<Item = Point2<T>>>(&mut self, points: I) {
        let before = self.points.len();
        self.points
            .extend(points.into_iter().filter(|p| !p.is_null()));
        if self.points.len() == before && !self.is_null() {
            return;
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        match hull::convex_hull(&self.points) {
            Some(h) => {
                trace!(
                    candidates = self.points.len(),
                    vertices = h.vertices.len(),
                    "polygon hull rebuilt"
                );
                self.points = h.vertices;
                self.bounding_box = h.bounding_box;
            }
            None => {
                trace!(candidates = self.points.len(), "polygon still degenerate");
                self.bounding_box = Rect::null();
            }
        }
    }

    /// Hull vertices, counter-clockwise from the lowest point. Empty when null.
    pub fn vertices(&self) -> &[Point2<T>] {
        if self.is_null() {
            &[]
        } else {
            &self.points
        }
    }

    /// Number of hull vertices; 0 when null.
    pub fn size(&self) -> usize {
        self.vertices().len()
    }

    pub fn get(&self, i: usize) -> Option<&Point2<T>> {
        self.vertices().get(i)
    }

    pub fn bounding_box(&self) -> Rect<T> {
        self.bounding_box
    }

    pub fn width(&self) -> T {
        self.bounding_box.width()
    }

    pub fn height(&self) -> T {
        self.bounding_box.height()
    }

    /// Hull edges in order, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<T>> + '_ {
        let v = self.vertices();
        (0..v.len()).map(move |i| Segment2::through(v[i], v[(i + 1) % v.len()]))
    }

    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Shoelace area (non-negative, hull is counter-clockwise).
    pub fn area(&self) -> f64 {
        self.signed_area_sum().abs() * 0.5
    }

    fn signed_area_sum(&self) -> f64 {
        let v = self.vertices();
        let mut sum = 0.0;
        for i in 0..v.len() {
            let (a, b) = (v[i].to_vector(), v[(i + 1) % v.len()].to_vector());
            sum += a.x * b.y - a.y * b.x;
        }
        sum
    }

    /// Area centroid, round-cast into `T`. Null when null.
    pub fn centroid(&self) -> Point2<T> {
        let v = self.vertices();
        let a2 = self.signed_area_sum();
        if v.is_empty() || a2 == 0.0 {
            return Point2::null();
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..v.len() {
            let (a, b) = (v[i].to_vector(), v[(i + 1) % v.len()].to_vector());
            let w = a.x * b.y - a.y * b.x;
            cx += (a.x + b.x) * w;
            cy += (a.y + b.y) * w;
        }
        let k = 1.0 / (3.0 * a2);
        Point2::from_vector(&nalgebra::Vector2::new(cx * k, cy * k))
    }
}

impl<T: Scalar> Nullable for Polygon<T> {
    fn null() -> Self {
        Self::new()
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.bounding_box.is_null()
    }
}

impl<T: Scalar> Default for Polygon<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounding boxes first, then the hull vertices in order.
impl<T: Scalar> PartialEq for Polygon<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bounding_box == other.bounding_box && self.vertices() == other.vertices()
    }
}

impl<T: Scalar> Index<usize> for Polygon<T> {
    type Output = Point2<T>;
    fn index(&self, i: usize) -> &Point2<T> {
        &self.vertices()[i]
    }
}

impl<T: Scalar> Extend<Point2<T>> for Polygon<T> {
    fn extend<I: IntoIterator<Item = Point2<T>>>(&mut self, iter: I) {
        self.add_points(iter);
    }
}

impl<T: Scalar> FromIterator<Point2<T>> for Polygon<T> {
    fn from_iter<I: IntoIterator<Item = Point2<T>>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<T: Scalar> fmt::Display for Polygon<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        write!(f, "Polygon(size={})", self.size())?;
        for (i, p) in self.vertices().iter().enumerate() {
            f.write_str(if i == 0 { " " } else { "->" })?;
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

impl<T: Scalar> From<Polygon<T>> for Vec<Point2<T>> {
    fn from(p: Polygon<T>) -> Self {
        p.vertices().to_vec()
    }
}

impl<T: Scalar> From<Vec<Point2<T>>> for Polygon<T> {
    fn from(points: Vec<Point2<T>>) -> Self {
        Self::from_points(points)
    }
}
