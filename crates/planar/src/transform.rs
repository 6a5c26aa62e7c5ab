//! Translate, rotate and mirror shapes.
//!
//! Model
//! - `Affine2` is the map `x ↦ M x + t` in `f64`. Applying it to a shape maps
//!   every defining point and round-casts back into the shape's scalar type,
//!   so integer shapes can land on neighbouring lattice points after a
//!   rotation.
//! - `Translate` moves by an exact offset in `T` and never round-trips
//!   through `f64`; translating by `(dx, dy)` then `(−dx, −dy)` restores the
//!   original.
//! - Rects are translated only: a rotated rect is not axis-aligned.
//! - Polygons rebuild their hull after a map, so a reflection still yields a
//!   counter-clockwise vertex order.
//! - Null in, null out.
//!
//! Code cross-refs: `shape::Polygon::from_points`, `scalar::round_nearest_cast`

use crate::scalar::Scalar;
use crate::shape::{Linear, Nullable, Point2, Polygon, Rect};
use nalgebra::{Matrix2, Vector2};

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::new(dx, dy),
        }
    }

    /// Rotation by `radians` about `center`; counter-clockwise unless
    /// `clockwise` is set.
    pub fn rotation_about(center: Vector2<f64>, radians: f64, clockwise: bool) -> Self {
        let theta = if clockwise { -radians } else { radians };
        let (s, c) = theta.sin_cos();
        let m = Matrix2::new(c, -s, s, c);
        Self {
            m,
            t: center - m * center,
        }
    }

    /// Reflection across the supporting line of `line`; `None` for a null line.
    pub fn reflection_across<T: Scalar, K>(line: &Linear<T, 2, K>) -> Option<Self> {
        if line.is_null() {
            return None;
        }
        let u = line.span_vector().try_normalize(0.0)?;
        let (ux, uy) = (u.x, u.y);
        let m = Matrix2::new(
            ux * ux - uy * uy,
            2.0 * ux * uy,
            2.0 * ux * uy,
            uy * uy - ux * ux,
        );
        let p = line.anchor().to_vector();
        Some(Self { m, t: p - m * p })
    }

    /// `self ∘ other`: apply `other` first.
    #[inline]
    pub fn compose(&self, other: &Affine2) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }

    #[inline]
    pub fn apply(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.m * v + self.t
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Exact offset in the shape's own scalar type.
pub trait Translate<T> {
    fn translated(&self, dx: T, dy: T) -> Self;
}

/// Image under an affine map.
pub trait Transform {
    fn transformed(&self, f: &Affine2) -> Self;
}

impl<T: Scalar> Translate<T> for Point2<T> {
    fn translated(&self, dx: T, dy: T) -> Self {
        if self.is_null() {
            return *self;
        }
        match (self.x().try_add(dx), self.y().try_add(dy)) {
            (Some(x), Some(y)) => Point2::new(x, y),
            _ => Point2::null(),
        }
    }
}

impl<T: Scalar, K> Translate<T> for Linear<T, 2, K> {
    fn translated(&self, dx: T, dy: T) -> Self {
        if self.is_null() {
            return Self::null();
        }
        let (a, b) = self.endpoints();
        Self::through(a.translated(dx, dy), b.translated(dx, dy))
    }
}

impl<T: Scalar> Translate<T> for Rect<T> {
    fn translated(&self, dx: T, dy: T) -> Self {
        if self.is_null() {
            return *self;
        }
        let moved = || {
            Some(Rect::new(
                self.left().try_add(dx)?,
                self.right().try_add(dx)?,
                self.top().try_add(dy)?,
                self.bottom().try_add(dy)?,
            ))
        };
        moved().unwrap_or_else(Rect::null)
    }
}

impl<T: Scalar> Translate<T> for Polygon<T> {
    fn translated(&self, dx: T, dy: T) -> Self {
        Polygon::from_points(self.vertices().iter().map(|p| p.translated(dx, dy)))
    }
}

impl<T: Scalar> Transform for Point2<T> {
    fn transformed(&self, f: &Affine2) -> Self {
        if self.is_null() {
            return *self;
        }
        Point2::from_vector(&f.apply(self.to_vector()))
    }
}

impl<T: Scalar, K> Transform for Linear<T, 2, K> {
    fn transformed(&self, f: &Affine2) -> Self {
        if self.is_null() {
            return Self::null();
        }
        let (a, b) = self.endpoints();
        Self::through(a.transformed(f), b.transformed(f))
    }
}

impl<T: Scalar> Transform for Polygon<T> {
    fn transformed(&self, f: &Affine2) -> Self {
        Polygon::from_points(self.vertices().iter().map(|p| p.transformed(f)))
    }
}

/// `shape` moved by `(dx, dy)`.
#[inline]
pub fn translate<T, S: Translate<T>>(shape: &S, dx: T, dy: T) -> S {
    shape.translated(dx, dy)
}

/// `shape` rotated by `radians` about `center`. A null center gives null.
pub fn rotate<T, S>(shape: &S, center: &Point2<T>, radians: f64, clockwise: bool) -> S
where
    T: Scalar,
    S: Transform + Nullable,
{
    if center.is_null() {
        return S::null();
    }
    shape.transformed(&Affine2::rotation_about(center.to_vector(), radians, clockwise))
}

/// `shape` reflected across the supporting line of `axis`. A null axis gives null.
pub fn mirror<T, K, S>(shape: &S, axis: &Linear<T, 2, K>) -> S
where
    T: Scalar,
    S: Transform + Nullable,
{
    match Affine2::reflection_across(axis) {
        Some(f) => shape.transformed(&f),
        None => S::null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Line2, Segment2};
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn translate_round_trip() {
        let poly = Polygon::from_points([p(0.0, 0.0), p(3.0, 0.5), p(1.0, 2.0)]);
        let back = translate(&translate(&poly, 2.5, -7.0), -2.5, 7.0);
        assert_eq!(back, poly);

        let r = Rect::new(1_i32, 4, 2, 8);
        assert_eq!(translate(&r, 3, -2), Rect::new(4, 7, 0, 6));
        let s = Segment2::through(Point2::new(0_i64, 0), Point2::new(5, 5));
        assert_eq!(translate(&translate(&s, 9, 9), -9, -9), s);
        assert!(translate(&Point2::<f64>::null(), 1.0, 1.0).is_null());
    }

    #[test]
    fn rotate_quarter_turn() {
        let q = rotate(&p(2.0, 1.0), &p(1.0, 1.0), FRAC_PI_2, false);
        assert_eq!(q, p(1.0, 2.0));
        let cw = rotate(&p(2.0, 1.0), &p(1.0, 1.0), FRAC_PI_2, true);
        assert_eq!(cw, p(1.0, 0.0));
        let qi = rotate(&Point2::new(3_i32, 0), &Point2::new(0, 0), FRAC_PI_2, false);
        assert_eq!(qi, Point2::new(0, 3));
        assert!(rotate(&p(2.0, 1.0), &Point2::<f64>::null(), 1.0, false).is_null());
    }

    #[test]
    fn mirror_across_diagonal() {
        let diag = Line2::through(p(0.0, 0.0), p(1.0, 1.0));
        assert_eq!(mirror(&p(3.0, 1.0), &diag), p(1.0, 3.0));

        let tri = Polygon::from_points([p(1.0, 0.0), p(4.0, 0.0), p(4.0, 2.0)]);
        let m = mirror(&tri, &diag);
        let expected = Polygon::from_points([p(0.0, 1.0), p(0.0, 4.0), p(2.0, 4.0)]);
        assert_eq!(m, expected);
        assert!((m.area() - tri.area()).abs() < 1e-12);
        assert!(mirror(&tri, &Line2::<f64>::null()).is_null());
    }

    #[test]
    fn affine_algebra() {
        let f = Affine2::rotation_about(Vector2::new(1.0, 2.0), 0.7, false);
        let g = Affine2::translation(3.0, -1.0);
        let fg = f.compose(&g);
        let v = Vector2::new(0.25, -4.0);
        assert!((fg.apply(v) - f.apply(g.apply(v))).norm() < 1e-12);
        let inv = fg.inverse().expect("invertible");
        assert!((inv.apply(fg.apply(v)) - v).norm() < 1e-12);
        assert!(f.is_orientation_preserving());
        let r = Affine2::reflection_across(&Line2::through(p(0.0, 1.0), p(1.0, 1.0))).expect("line");
        assert!(!r.is_orientation_preserving());
        assert!((r.apply(Vector2::new(5.0, 3.0)) - Vector2::new(5.0, -1.0)).norm() < 1e-12);
    }
}
