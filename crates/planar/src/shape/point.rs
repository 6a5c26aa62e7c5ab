//! `Point<T, D>`: a location in D-space.
//!
//! A point whose coordinates include the sentinel is the null point; the
//! constructor canonicalizes it to all-sentinel so `coords()` never exposes a
//! half-valid point.
//!
//! Arithmetic is checked: a coordinate that leaves `T`'s range makes the
//! result null.

use super::{Direction, Nullable};
use crate::scalar::{round_nearest_cast, Scalar, Tolerance};
use nalgebra::SVector;
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::ops::{Add, Index, Sub};

#[derive(Clone, Copy, Debug)]
pub struct Point<T, const D: usize> {
    coords: [T; D],
}

pub type Point2<T> = Point<T, 2>;

impl<T: Scalar, const D: usize> Point<T, D> {
    pub fn from_coords(coords: [T; D]) -> Self {
        if coords.iter().any(|c| c.is_sentinel()) {
            Self::null()
        } else {
            Self { coords }
        }
    }

    #[inline]
    pub fn origin() -> Self {
        Self {
            coords: [T::zero(); D],
        }
    }

    #[inline]
    pub fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Round-cast each component of `v` into `T`.
    pub fn from_vector(v: &SVector<f64, D>) -> Self {
        Self::from_coords(std::array::from_fn(|i| round_nearest_cast(v[i])))
    }

    /// Coordinates widened to `f64`. Null maps to a vector of `+∞`.
    #[inline]
    pub fn to_vector(&self) -> SVector<f64, D> {
        if self.is_null() {
            return SVector::repeat(f64::INFINITY);
        }
        SVector::from(self.coords.map(Scalar::as_f64))
    }

    /// Euclidean distance; `+∞` if either point is null.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.is_null() || other.is_null() {
            return f64::INFINITY;
        }
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn equals_with(&self, other: &Self, tol: &Tolerance<T>) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(&a, &b)| tol.equal(a, b)),
            _ => false,
        }
    }
}

impl<T: Scalar> Point<T, 2> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self::from_coords([x, y])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.coords[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.coords[1]
    }
}

impl<T: Scalar, const D: usize> Nullable for Point<T, D> {
    #[inline]
    fn null() -> Self {
        Self {
            coords: [T::sentinel(); D],
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.coords.iter().any(|c| c.is_sentinel())
    }
}

impl<T: Scalar, const D: usize> Default for Point<T, D> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Scalar, const D: usize> PartialEq for Point<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with(other, &Tolerance::default())
    }
}

impl<T, const D: usize> Index<usize> for Point<T, D> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.coords[i]
    }
}

/// Componentwise `op`, or `None` as soon as one component overflows.
pub(crate) fn checked_zip<T: Copy, const D: usize>(
    a: &[T; D],
    b: &[T; D],
    op: impl Fn(T, T) -> Option<T>,
) -> Option<[T; D]> {
    let mut out = *a;
    for (o, &r) in out.iter_mut().zip(b) {
        *o = op(*o, r)?;
    }
    Some(out)
}

impl<T: Scalar, const D: usize> Sub for Point<T, D> {
    type Output = Direction<T, D>;

    /// Displacement from `rhs` to `self`.
    fn sub(self, rhs: Self) -> Direction<T, D> {
        if self.is_null() || rhs.is_null() {
            return Direction::null();
        }
        checked_zip(&self.coords, &rhs.coords, T::try_sub)
            .map_or_else(Direction::null, Direction::from_components)
    }
}

impl<T: Scalar, const D: usize> Add<Direction<T, D>> for Point<T, D> {
    type Output = Self;
    fn add(self, rhs: Direction<T, D>) -> Self {
        if self.is_null() || rhs.is_null() {
            return Self::null();
        }
        checked_zip(&self.coords, rhs.components(), T::try_add)
            .map_or_else(Self::null, Self::from_coords)
    }
}

impl<T: Scalar, const D: usize> Sub<Direction<T, D>> for Point<T, D> {
    type Output = Self;
    fn sub(self, rhs: Direction<T, D>) -> Self {
        if self.is_null() || rhs.is_null() {
            return Self::null();
        }
        checked_zip(&self.coords, rhs.components(), T::try_sub)
            .map_or_else(Self::null, Self::from_coords)
    }
}

impl<T: Scalar, const D: usize> fmt::Display for Point<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        f.write_str("[")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}

// JSON form: `[x, y, ...]`, or `null` for the null point.
impl<T: Scalar + Serialize, const D: usize> Serialize for Point<T, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_null() {
            return serializer.serialize_none();
        }
        let mut seq = serializer.serialize_seq(Some(D))?;
        for c in &self.coords {
            seq.serialize_element(c)?;
        }
        seq.end()
    }
}

impl<'de, T: Scalar + Deserialize<'de>, const D: usize> Deserialize<'de> for Point<T, D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let Some(raw) = Option::<Vec<T>>::deserialize(deserializer)? else {
            return Ok(Self::null());
        };
        let coords: [T; D] = raw
            .try_into()
            .map_err(|v: Vec<T>| De::Error::invalid_length(v.len(), &"one coordinate per axis"))?;
        Ok(Self::from_coords(coords))
    }
}
