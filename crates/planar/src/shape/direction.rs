//! `Direction<T, D>`: a displacement vector with a cached Euclidean length.

use super::point::checked_zip;
use super::Nullable;
use crate::scalar::{round_nearest_cast, Scalar, Tolerance};
use nalgebra::SVector;
use std::fmt;
use std::ops::{Mul, Neg};

#[derive(Clone, Copy, Debug)]
pub struct Direction<T, const D: usize> {
    components: [T; D],
    length: f64,
}

pub type Direction2<T> = Direction<T, 2>;

impl<T: Scalar, const D: usize> Direction<T, D> {
    pub fn from_components(components: [T; D]) -> Self {
        if components.iter().any(|c| c.is_sentinel()) {
            return Self::null();
        }
        let length = SVector::<f64, D>::from(components.map(Scalar::as_f64)).norm();
        Self { components, length }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            components: [T::zero(); D],
            length: 0.0,
        }
    }

    #[inline]
    pub fn components(&self) -> &[T; D] {
        &self.components
    }

    /// Cached Euclidean norm; `+∞` for null.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_zero(&self) -> bool {
        let tol = Tolerance::default();
        !self.is_null() && self.components.iter().all(|&c| tol.equal(c, T::zero()))
    }

    #[inline]
    pub fn to_vector(&self) -> SVector<f64, D> {
        SVector::from(self.components.map(Scalar::as_f64))
    }

    /// The sentinel when either operand is null or the sum overflows `T`.
    pub fn dot(&self, other: &Self) -> T {
        if self.is_null() || other.is_null() {
            return T::sentinel();
        }
        self.components
            .iter()
            .zip(other.components.iter())
            .try_fold(T::zero(), |acc, (&a, &b)| acc.try_add(a.try_mul(b)?))
            .unwrap_or_else(T::sentinel)
    }

    /// Unit vector in `f64`; null for null or zero input.
    pub fn normalize(&self) -> Direction<f64, D> {
        if self.is_null() || self.is_zero() {
            return Direction::null();
        }
        let v = self.to_vector() / self.length;
        Direction::from_components(std::array::from_fn(|i| v[i]))
    }

    /// Multiply by a real factor, round-casting each component back into `T`.
    pub fn scaled(&self, factor: f64) -> Self {
        if self.is_null() {
            return Self::null();
        }
        Self::from_components(std::array::from_fn(|i| {
            round_nearest_cast(self.components[i].as_f64() * factor)
        }))
    }

    pub fn equals_with(&self, other: &Self, tol: &Tolerance<T>) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|(&a, &b)| tol.equal(a, b)),
            _ => false,
        }
    }
}

impl<T: Scalar> Direction<T, 2> {
    #[inline]
    pub fn new(dx: T, dy: T) -> Self {
        Self::from_components([dx, dy])
    }

    #[inline]
    pub fn dx(&self) -> T {
        self.components[0]
    }

    #[inline]
    pub fn dy(&self) -> T {
        self.components[1]
    }

    /// z-component of the 3-D cross product; positive when `other` is
    /// counter-clockwise of `self`.
    /// The sentinel when either operand is null or the product overflows `T`.
    pub fn cross(&self, other: &Self) -> T {
        if self.is_null() || other.is_null() {
            return T::sentinel();
        }
        let z = || {
            self.dx()
                .try_mul(other.dy())?
                .try_sub(self.dy().try_mul(other.dx())?)
        };
        z().unwrap_or_else(T::sentinel)
    }

    /// Rotated a quarter turn counter-clockwise.
    pub fn perp(&self) -> Self {
        if self.is_null() {
            return Self::null();
        }
        match T::zero().try_sub(self.dy()) {
            Some(ny) => Self::new(ny, self.dx()),
            None => Self::null(),
        }
    }
}

impl<T: Scalar, const D: usize> Nullable for Direction<T, D> {
    #[inline]
    fn null() -> Self {
        Self {
            components: [T::sentinel(); D],
            length: f64::INFINITY,
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.components.iter().any(|c| c.is_sentinel())
    }
}

impl<T: Scalar, const D: usize> Default for Direction<T, D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Scalar, const D: usize> PartialEq for Direction<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, &Tolerance::default())
    }
}

impl<T: Scalar, const D: usize> Neg for Direction<T, D> {
    type Output = Self;
    fn neg(self) -> Self {
        if self.is_null() {
            return self;
        }
        let zero = [T::zero(); D];
        match checked_zip(&zero, &self.components, T::try_sub) {
            Some(components) => Self {
                components,
                length: self.length,
            },
            None => Self::null(),
        }
    }
}

impl<T: Scalar, const D: usize> Mul<T> for Direction<T, D> {
    type Output = Self;
    fn mul(self, k: T) -> Self {
        if self.is_null() || k.is_sentinel() {
            return Self::null();
        }
        checked_zip(&self.components, &[k; D], T::try_mul)
            .map_or_else(Self::null, Self::from_components)
    }
}

impl<T: Scalar, const D: usize> fmt::Display for Direction<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        f.write_str("<")?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_cached_norm() {
        let d = Direction2::new(3.0, 4.0);
        assert!((d.length() - 5.0).abs() < 1e-12);
        let di = Direction2::new(-6_i32, 8);
        assert!((di.length() - 10.0).abs() < 1e-12);
        assert!(Direction2::<f64>::null().length().is_infinite());
    }

    #[test]
    fn normalize_and_cross() {
        let d = Direction2::new(0_i32, 7);
        let u = d.normalize();
        assert!((u.dx() - 0.0).abs() < 1e-12 && (u.dy() - 1.0).abs() < 1e-12);
        assert!(Direction2::<i32>::zero().normalize().is_null());
        let a = Direction2::new(1.0, 0.0);
        assert!(a.cross(&a.perp()) > 0.0);
        assert_eq!(a.dot(&a.perp()), 0.0);
    }

    #[test]
    fn arithmetic_absorbs_null() {
        let n = Direction2::<f64>::null();
        assert!((-n).is_null());
        assert!((n * 2.0).is_null());
        assert!(n.scaled(0.5).is_null());
        assert_eq!(Direction2::new(2_i32, -3) * 2, Direction2::new(4, -6));
        assert_eq!(Direction2::new(3_i32, 5).scaled(0.5), Direction2::new(2, 3));
    }
}
