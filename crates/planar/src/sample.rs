//! Seeded random point clouds and polygons.
//!
//! Purpose
//! - Reproducible inputs for benches, property tests and demos. A draw is a
//!   pure function of its configuration and a replay token `(seed, index)`,
//!   so any failing case can be regenerated from the two numbers alone.
//!
//! Model
//! - Coordinates are uniform in `[min, max)` per axis, then round-cast into
//!   the target scalar type.
//! - Polygons are the hull of such a cloud; a cloud without a hull is
//!   reported as a degenerate sample, never returned as a null polygon.
//!
//! Code cross-refs: `shape::Polygon::from_points`, `scalar::round_nearest_cast`

use crate::scalar::{round_nearest_cast, Scalar};
use crate::shape::{Nullable, Point2, Polygon, Segment2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::debug;

/// Error type shared by all samplers.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    InvalidParams { reason: String },
    DegenerateSample { reason: String },
}

impl SampleError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sampler params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for SampleError {}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Same seed, next index.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Point cloud configuration: `count` points in the square `[min, max)²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudCfg {
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: 32,
            min: -100.0,
            max: 100.0,
        }
    }
}

impl CloudCfg {
    fn validate(&self) -> Result<(), SampleError> {
        if self.count == 0 {
            return Err(SampleError::invalid("count must be > 0"));
        }
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SampleError::invalid("bounds must be finite"));
        }
        if self.min >= self.max {
            return Err(SampleError::invalid("min < max required"));
        }
        Ok(())
    }
}

fn draw_point<T: Scalar, R: Rng>(rng: &mut R, cfg: &CloudCfg) -> Point2<T> {
    let x = rng.gen_range(cfg.min..cfg.max);
    let y = rng.gen_range(cfg.min..cfg.max);
    Point2::new(round_nearest_cast(x), round_nearest_cast(y))
}

/// `cfg.count` points, uniform in the configured square.
pub fn draw_cloud<T: Scalar>(cfg: CloudCfg, tok: ReplayToken) -> Result<Vec<Point2<T>>, SampleError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let pts: Vec<Point2<T>> = (0..cfg.count).map(|_| draw_point(&mut rng, &cfg)).collect();
    if pts.iter().any(|p| p.is_null()) {
        return Err(SampleError::invalid("bounds exceed the scalar type's range"));
    }
    debug!(count = pts.len(), seed = tok.seed, index = tok.index, "drew point cloud");
    Ok(pts)
}

/// Hull of a drawn cloud.
pub fn draw_polygon<T: Scalar>(cfg: CloudCfg, tok: ReplayToken) -> Result<Polygon<T>, SampleError> {
    if cfg.count < 3 {
        return Err(SampleError::invalid("a polygon needs count >= 3"));
    }
    let poly = Polygon::from_points(draw_cloud::<T>(cfg, tok)?);
    if poly.is_null() {
        return Err(SampleError::degenerate(format!(
            "cloud (seed={}, index={}) has no hull",
            tok.seed, tok.index
        )));
    }
    Ok(poly)
}

/// Segment between two drawn points.
pub fn draw_segment<T: Scalar>(cfg: CloudCfg, tok: ReplayToken) -> Result<Segment2<T>, SampleError> {
    let cfg = CloudCfg { count: 2, ..cfg };
    let pts = draw_cloud::<T>(cfg, tok)?;
    let seg = Segment2::through(pts[0], pts[1]);
    if seg.is_null() {
        return Err(SampleError::degenerate("endpoints coincide"));
    }
    Ok(seg)
}
