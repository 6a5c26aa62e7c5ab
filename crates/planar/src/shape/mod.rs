//! Primitive shape model.
//!
//! Purpose
//! - Small value types (`Point`, `Direction`, `Line`, `Segment`, `Rect`,
//!   `Polygon`) over any `Scalar`.
//! - Every type has exactly one invalid value, its null sentinel. Constructors
//!   never fail: degenerate input collapses to null, and null absorbs every
//!   later operation.
//!
//! Conventions
//! - Equality goes through the tolerance kernel; null == null, null != anything else.
//! - `Default` is null.
//! - Validity is re-derived whenever a value is built, not cached as a flag.
//!
//! Code cross-refs: `scalar::Tolerance`, `hull::convex_hull`, `overlap::Overlap`

mod direction;
mod linear;
mod point;
mod polygon;
mod rect;

pub use direction::{Direction, Direction2};
pub use linear::{Finite, Infinite, Line, Line2, Linear, Segment, Segment2};
pub use point::{Point, Point2};
pub use polygon::Polygon;
pub use rect::Rect;

/// Access to a type's null sentinel.
pub trait Nullable: Sized {
    fn null() -> Self;

    fn is_null(&self) -> bool;

    /// `None` for the null value; bridges to `?`/`Option` combinators.
    #[inline]
    fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}
