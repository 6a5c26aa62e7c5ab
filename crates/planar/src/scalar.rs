//! Numeric tolerance kernel.
//!
//! Purpose
//! - One place that decides when two coordinates are "the same". Shapes, the
//!   hull builder and the overlap engine compare through here instead of using
//!   `==`/`<` on raw coordinates.
//!
//! Model
//! - Inexact scalars (`f32`, `f64`): `|a − b| ≤ ε·(|a| + |b| + 1)`, relative for
//!   large magnitudes and absolute near zero.
//! - Exact scalars (signed integers): plain `==`. Products that feed a
//!   predicate are formed in 128 bits (`WideProduct`) so no magnitude the type
//!   can hold is rounded away.
//! - Non-finite operands (the float sentinel `+∞`) only compare equal to
//!   themselves.
//! - Arithmetic that leaves the type's range (`try_add`, `try_sub`,
//!   `try_mul`) reports `None`; shapes turn that into null instead of
//!   wrapping or panicking.
//! - NaN is undefined input. Nothing here guards against it; results involving
//!   NaN are unspecified.
//!
//! Code cross-refs: `Tolerance`, `round_nearest_cast`, `shape::Point`

use num_traits::{Bounded, CheckedAdd, CheckedMul, CheckedSub, Num, NumCast, ToPrimitive};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Native rounding behavior of a conversion from `f64` into a scalar type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStyle {
    /// Truncation, what `as`/`NumCast` do for integer targets.
    TowardZero,
    ToNearest,
    TowardInfinity,
    TowardNegInfinity,
}

impl RoundStyle {
    /// Shift `value` so that a conversion with this style lands on the nearest
    /// integer. Half-way cases follow the style (away from zero for truncation).
    #[inline]
    pub fn pre_adjust(self, value: f64) -> f64 {
        match self {
            RoundStyle::TowardZero => {
                if value < 0.0 {
                    value - 0.5
                } else {
                    value + 0.5
                }
            }
            RoundStyle::TowardInfinity => value - 0.5,
            RoundStyle::TowardNegInfinity => value + 0.5,
            RoundStyle::ToNearest => value,
        }
    }

    /// The rounding this style denotes, applied to an `f64`.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundStyle::TowardZero => value.trunc(),
            RoundStyle::ToNearest => value.round(),
            RoundStyle::TowardInfinity => value.ceil(),
            RoundStyle::TowardNegInfinity => value.floor(),
        }
    }
}

/// Coordinate type accepted by every shape.
///
/// Implemented for `f32`, `f64`, `i8`, `i16`, `i32`, `i64`, `isize`. Unsigned
/// types are left out: orientation tests subtract coordinates.
pub trait Scalar:
    Copy + Debug + Display + PartialOrd + Num + NumCast + Bounded + Send + Sync + 'static
{
    /// `true` when `==` is meaningful (integers).
    const EXACT: bool;
    /// How `cast_from_f64` rounds.
    const ROUND_STYLE: RoundStyle;

    /// Reserved "no value": `+∞` when representable, else `MAX`.
    fn sentinel() -> Self;

    /// Default relative epsilon for `Tolerance`. Zero for exact types.
    fn default_eps() -> Self;

    /// `self + rhs`, or `None` when the result is not a finite value of `Self`.
    fn try_add(self, rhs: Self) -> Option<Self>;

    fn try_sub(self, rhs: Self) -> Option<Self>;

    fn try_mul(self, rhs: Self) -> Option<Self>;

    #[inline]
    fn is_sentinel(self) -> bool {
        self == Self::sentinel()
    }

    /// Lossy widening used by slope/length/angle math.
    #[inline]
    fn as_f64(self) -> f64 {
        <f64 as NumCast>::from(self).unwrap_or(f64::NAN)
    }

    /// Native conversion from `f64` (see `ROUND_STYLE`). Values the type cannot
    /// hold (out of range, NaN for integers) become the sentinel.
    #[inline]
    fn cast_from_f64(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::sentinel)
    }

    /// `|self|`; the sentinel when that is not representable (`MIN`).
    #[inline]
    fn abs_val(self) -> Self {
        if self < Self::zero() {
            Self::zero().try_sub(self).unwrap_or_else(Self::sentinel)
        } else {
            self
        }
    }
}

macro_rules! exact_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const EXACT: bool = true;
            const ROUND_STYLE: RoundStyle = RoundStyle::TowardZero;
            #[inline]
            fn sentinel() -> Self {
                <$t>::MAX
            }
            #[inline]
            fn default_eps() -> Self {
                0
            }
            #[inline]
            fn try_add(self, rhs: Self) -> Option<Self> {
                CheckedAdd::checked_add(&self, &rhs)
            }
            #[inline]
            fn try_sub(self, rhs: Self) -> Option<Self> {
                CheckedSub::checked_sub(&self, &rhs)
            }
            #[inline]
            fn try_mul(self, rhs: Self) -> Option<Self> {
                CheckedMul::checked_mul(&self, &rhs)
            }
        }
    )*};
}

macro_rules! inexact_scalar {
    ($($t:ty => $eps:expr),*) => {$(
        impl Scalar for $t {
            const EXACT: bool = false;
            const ROUND_STYLE: RoundStyle = RoundStyle::ToNearest;
            #[inline]
            fn sentinel() -> Self {
                <$t>::INFINITY
            }
            #[inline]
            fn default_eps() -> Self {
                $eps
            }
            #[inline]
            fn try_add(self, rhs: Self) -> Option<Self> {
                Some(self + rhs).filter(|v| v.is_finite())
            }
            #[inline]
            fn try_sub(self, rhs: Self) -> Option<Self> {
                Some(self - rhs).filter(|v| v.is_finite())
            }
            #[inline]
            fn try_mul(self, rhs: Self) -> Option<Self> {
                Some(self * rhs).filter(|v| v.is_finite())
            }
        }
    )*};
}

exact_scalar!(i8, i16, i32, i64, isize);
inexact_scalar!(f32 => 1e-6, f64 => 1e-12);

/// Comparison policy for one scalar type.
///
/// `eps` is ignored for exact types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T> {
    pub eps: T,
}

impl<T: Scalar> Default for Tolerance<T> {
    fn default() -> Self {
        Self {
            eps: T::default_eps(),
        }
    }
}

impl<T: Scalar> Tolerance<T> {
    #[inline]
    pub fn new(eps: T) -> Self {
        Self { eps }
    }

    pub fn equal(&self, a: T, b: T) -> bool {
        if T::EXACT || a == b {
            return a == b;
        }
        if !(a.as_f64().is_finite() && b.as_f64().is_finite()) {
            return false;
        }
        let diff = if a < b { b - a } else { a - b };
        diff <= self.eps * (a.abs_val() + b.abs_val() + T::one())
    }

    #[inline]
    pub fn less_than(&self, a: T, b: T) -> bool {
        !self.equal(a, b) && a < b
    }

    #[inline]
    pub fn greater_than(&self, a: T, b: T) -> bool {
        !self.equal(a, b) && a > b
    }

    #[inline]
    pub fn less_equal(&self, a: T, b: T) -> bool {
        self.equal(a, b) || a < b
    }

    #[inline]
    pub fn greater_equal(&self, a: T, b: T) -> bool {
        self.equal(a, b) || a > b
    }

    /// Three-way comparison; `Equal` within tolerance.
    pub fn compare(&self, a: T, b: T) -> Ordering {
        if self.equal(a, b) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Sign of `v` with values near zero snapped to `Equal`.
    #[inline]
    pub fn sign(&self, v: T) -> Ordering {
        self.compare(v, T::zero())
    }
}

#[inline]
pub fn equal<T: Scalar>(a: T, b: T) -> bool {
    Tolerance::default().equal(a, b)
}

#[inline]
pub fn less_than<T: Scalar>(a: T, b: T) -> bool {
    Tolerance::default().less_than(a, b)
}

#[inline]
pub fn greater_than<T: Scalar>(a: T, b: T) -> bool {
    Tolerance::default().greater_than(a, b)
}

#[inline]
pub fn less_equal<T: Scalar>(a: T, b: T) -> bool {
    Tolerance::default().less_equal(a, b)
}

#[inline]
pub fn greater_equal<T: Scalar>(a: T, b: T) -> bool {
    Tolerance::default().greater_equal(a, b)
}

/// `T`'s default tolerance carried over to `f64`, for predicates that are
/// evaluated on widened coordinates (exact types keep `ε = 0`).
#[inline]
pub fn widened_tolerance<T: Scalar>() -> Tolerance<f64> {
    Tolerance::new(T::default_eps().as_f64())
}

/// Convert a continuous value into `T`, rounding to the nearest representable
/// value under the target's `ROUND_STYLE`.
///
/// Integer targets truncate natively, so the value is shifted by ±0.5 first
/// (2.5 → 3, −2.5 → −3). Values outside the range of `T` become the sentinel,
/// which makes any point built from them null.
#[inline]
pub fn round_nearest_cast<T: Scalar>(value: f64) -> T {
    T::cast_from_f64(T::ROUND_STYLE.pre_adjust(value))
}

/// `(a1 − a0)·(b1 − b0)` for integer coordinates, held exactly as sign and
/// magnitude. Differences of 64-bit values fit in `u64`, so the magnitude
/// always fits in `u128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WideProduct {
    sign: Ordering,
    magnitude: u128,
}

impl WideProduct {
    /// `None` for values without an integer widening (floats are not routed
    /// here) or beyond 64 bits.
    pub(crate) fn of_differences<T: Scalar>(a1: T, a0: T, b1: T, b0: T) -> Option<Self> {
        let da = a1.to_i128()?.checked_sub(a0.to_i128()?)?;
        let db = b1.to_i128()?.checked_sub(b0.to_i128()?)?;
        Some(Self {
            sign: (da.signum() * db.signum()).cmp(&0),
            magnitude: da.unsigned_abs().checked_mul(db.unsigned_abs())?,
        })
    }
}

impl Ord for WideProduct {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Ordering::Greater, Ordering::Greater) => self.magnitude.cmp(&other.magnitude),
            (Ordering::Less, Ordering::Less) => other.magnitude.cmp(&self.magnitude),
            (a, b) => a.cmp(&b),
        }
    }
}

impl PartialOrd for WideProduct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
pub(crate) fn min_of<T: Scalar>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
pub(crate) fn max_of<T: Scalar>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_equality_scales_with_magnitude() {
        assert!(equal(0.1 + 0.2, 0.3));
        assert!(equal(1e9 + 1e-4, 1e9));
        assert!(!equal(1.0, 1.0 + 1e-6));
        assert!(!equal(0.0, 1e-9));
    }

    #[test]
    fn integers_compare_exactly() {
        assert!(equal(3_i32, 3));
        assert!(!equal(3_i32, 4));
        assert!(less_than(3_i64, 4));
        assert!(greater_equal(4_i16, 4));
    }

    #[test]
    fn sentinel_only_equals_itself() {
        assert!(equal(f64::INFINITY, f64::INFINITY));
        assert!(!equal(f64::INFINITY, 1e300));
        assert!(!equal(f32::INFINITY, 0.0));
        assert!(f64::sentinel().is_sentinel());
        assert_eq!(i32::sentinel(), i32::MAX);
    }

    #[test]
    fn orderings_are_exclusive_and_exhaustive() {
        let values = [-3.5, -1e-13, 0.0, 1e-13, 0.25, 7.0, 1e12];
        for &a in &values {
            for &b in &values {
                let hits = [less_than(a, b), equal(a, b), greater_than(a, b)]
                    .iter()
                    .filter(|&&h| h)
                    .count();
                assert_eq!(hits, 1, "a={a} b={b}");
                assert_eq!(equal(a, b), equal(b, a));
                assert_eq!(less_equal(a, b), !greater_than(a, b));
            }
        }
    }

    #[test]
    fn custom_tolerance_widens_equality() {
        let loose = Tolerance::new(1e-3_f64);
        assert!(loose.equal(1.0, 1.0005));
        assert!(!Tolerance::<f64>::default().equal(1.0, 1.0005));
        assert_eq!(loose.sign(-1e-5), Ordering::Equal);
        assert_eq!(loose.sign(-1.0), Ordering::Less);
    }

    #[test]
    fn round_cast_to_integers_is_nearest() {
        assert_eq!(round_nearest_cast::<i32>(2.4), 2);
        assert_eq!(round_nearest_cast::<i32>(2.5), 3);
        assert_eq!(round_nearest_cast::<i32>(-2.5), -3);
        assert_eq!(round_nearest_cast::<i32>(-0.4), 0);
        assert_eq!(round_nearest_cast::<i64>(1e10 + 0.7), 10_000_000_001);
    }

    #[test]
    fn round_cast_out_of_range_is_sentinel() {
        assert_eq!(round_nearest_cast::<i16>(1e6), i16::MAX);
        assert_eq!(round_nearest_cast::<i32>(f64::INFINITY), i32::MAX);
        assert!(round_nearest_cast::<f32>(f64::INFINITY).is_sentinel());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(2_000_000_000_i32.try_sub(-2_000_000_000), None);
        assert_eq!(i32::MAX.try_add(1), None);
        assert_eq!(100_i8.try_mul(2), None);
        assert_eq!(7_i64.try_sub(9), Some(-2));
        assert_eq!(f64::MAX.try_mul(2.0), None);
        assert_eq!(1.5_f64.try_add(1.0), Some(2.5));
        assert_eq!(i32::MIN.abs_val(), i32::sentinel());
        assert_eq!((-5_i8).abs_val(), 5);
    }

    #[test]
    fn wide_products_order_exactly() {
        let wide = |a1: i64, a0: i64, b1: i64, b0: i64| {
            WideProduct::of_differences(a1, a0, b1, b0).expect("integer")
        };
        // (2^63 - 1 - i64::MIN)^2 does not fit in i128 but still compares.
        let huge = wide(i64::MAX, i64::MIN, i64::MAX, i64::MIN);
        let less = wide(i64::MAX - 1, i64::MIN, i64::MAX, i64::MIN);
        assert!(huge > less);
        assert!(wide(1, 0, -3, 0) < wide(0, 0, 5, 0));
        assert!(wide(-2, 0, 3, 0) < wide(-1, 0, 5, 0));
        assert_eq!(wide(0, 0, 9, 1).cmp(&wide(4, 4, -9, 1)), Ordering::Equal);
        assert_eq!(
            wide(999_999_999, 0, 1_000_000_001, 0).cmp(&wide(1_000_000_000, 0, 1_000_000_000, 0)),
            Ordering::Less
        );
    }

    #[test]
    fn round_cast_to_floats_keeps_value() {
        assert_eq!(round_nearest_cast::<f64>(2.5), 2.5);
        assert!((round_nearest_cast::<f32>(0.1) - 0.1_f32).abs() < f32::EPSILON);
    }

    #[test]
    fn every_style_reaches_the_nearest_integer() {
        let styles = [
            RoundStyle::TowardZero,
            RoundStyle::ToNearest,
            RoundStyle::TowardInfinity,
            RoundStyle::TowardNegInfinity,
        ];
        for style in styles {
            for &(v, want) in &[(1.2, 1.0), (1.8, 2.0), (-1.2, -1.0), (-1.8, -2.0)] {
                assert_eq!(style.apply(style.pre_adjust(v)), want, "{style:?} {v}");
            }
        }
    }
}
