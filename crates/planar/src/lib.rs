//! Tolerant 2-D geometry primitives, convex hulls and shape overlap.
//!
//! Modules, leaves first
//! - `scalar`: tolerance kernel every comparison goes through.
//! - `shape`: `Point`, `Direction`, `Line`, `Segment`, `Rect`, `Polygon`, each
//!   with a null sentinel instead of errors.
//! - `hull`: Graham scan used by `Polygon`.
//! - `overlap`: `overlap(&a, &b)` for every supported shape pair.
//! - `transform`: translate, rotate, mirror.
//! - `sample`: seeded random clouds and polygons.
//!
//! Policy
//! - Geometry never panics and never returns `Result`: degenerate input yields
//!   the null shape, and null propagates. `Nullable::non_null` converts to
//!   `Option` where `?` reads better.
//! - The library emits `tracing` events but installs no subscriber.

pub mod hull;
pub mod overlap;
pub mod sample;
pub mod scalar;
pub mod shape;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use overlap::{overlap, Overlap};
pub use scalar::{Scalar, Tolerance};
pub use shape::Nullable;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hull::{convex_hull, orientation, turn, Hull, Turn};
    pub use crate::overlap::{overlap, Overlap};
    pub use crate::sample::{draw_cloud, draw_polygon, CloudCfg, ReplayToken, SampleError};
    pub use crate::scalar::{round_nearest_cast, RoundStyle, Scalar, Tolerance};
    pub use crate::shape::{
        Direction, Direction2, Line, Line2, Linear, Nullable, Point, Point2, Polygon, Rect,
        Segment, Segment2,
    };
    pub use crate::transform::{mirror, rotate, translate, Affine2, Transform, Translate};
}
