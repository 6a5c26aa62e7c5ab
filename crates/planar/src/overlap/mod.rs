//! Shape × shape overlap.
//!
//! Purpose
//! - One entry point, `overlap(&a, &b)`, for every supported pair of 2-D
//!   shapes. The result is the overlapping shape (a point, a segment or a
//!   rect) or its null sentinel. It never panics or errors.
//!
//! Pairs and result types
//! - Point × {Point, Line, Segment, Rect, Polygon} → Point
//! - Line/Segment × Line/Segment → Point
//! - Line/Segment × {Rect, Polygon} → Segment
//! - Rect × Rect → Rect
//!
//! Every pair is implemented for both operand orders; the reversed order
//! delegates. A null operand always gives a null result.
//!
//! Known approximation: Line/Segment × Polygon is computed against the
//! polygon's bounding box, not its hull.
//!
//! Code cross-refs: `hull::turn`, `shape::Nullable`

/// Overlap of `self` with `Rhs`.
pub trait Overlap<Rhs: ?Sized = Self> {
    type Output;

    fn overlap(&self, rhs: &Rhs) -> Self::Output;
}

/// `a.overlap(b)`, for call sites that read better symmetric.
#[inline]
pub fn overlap<A, B>(a: &A, b: &B) -> A::Output
where
    A: Overlap<B>,
{
    a.overlap(b)
}

/// Reversed operand order delegates to the forward implementation.
macro_rules! commute {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {$(
        impl<T: Scalar> Overlap<$rhs> for $lhs {
            type Output = $out;
            #[inline]
            fn overlap(&self, rhs: &$rhs) -> $out {
                rhs.overlap(self)
            }
        }
    )*};
}

mod area;
mod linear;
mod point;
