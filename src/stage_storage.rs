//! Stage-storage curves (C6)
//!
//! A [`StageStorageCurve`] maps pond water-surface elevation ("stage") to
//! impounded volume ("storage") and back, by piecewise-linear interpolation
//! over a strictly increasing table of points. Generators build such tables
//! for common pond shapes; the router and [`crate::pond`] consume only the
//! curve itself.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One (stage, storage) table entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StageStoragePoint {
    /// Water-surface elevation, ft
    pub stage: f64,
    /// Impounded volume, cubic feet
    pub storage: f64,
}

/// A strictly monotone-increasing stage-storage table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageStorageCurve {
    /// Points, sorted ascending in both stage and storage
    pub points: Vec<StageStoragePoint>,
}

impl StageStorageCurve {
    /// Build a curve from `(stage, storage)` pairs, validating strict monotonicity.
    pub fn new(samples: impl IntoIterator<Item = (f64, f64)>) -> SimResult<Self> {
        let points: Vec<StageStoragePoint> = samples
            .into_iter()
            .map(|(stage, storage)| StageStoragePoint { stage, storage })
            .collect();

        if points.len() < 2 {
            return Err(SimError::invalid_input(
                "stageStorageCurve",
                "must have at least 2 points",
            ));
        }
        for w in points.windows(2) {
            if w[1].stage <= w[0].stage {
                return Err(SimError::invalid_input(
                    "stageStorageCurve",
                    "stage must be strictly increasing",
                ));
            }
            if w[1].storage <= w[0].storage {
                return Err(SimError::invalid_input(
                    "stageStorageCurve",
                    "storage must be strictly increasing",
                ));
            }
        }

        Ok(Self { points })
    }

    /// Lowest stage in the curve's domain
    pub fn min_stage(&self) -> f64 {
        self.points[0].stage
    }

    /// Highest stage in the curve's domain
    pub fn max_stage(&self) -> f64 {
        self.points[self.points.len() - 1].stage
    }

    /// Storage at a given stage, piecewise-linear, clamped at the curve's endpoints.
    pub fn storage(&self, stage: f64) -> f64 {
        let stage = stage.clamp(self.min_stage(), self.max_stage());
        for w in self.points.windows(2) {
            if stage >= w[0].stage && stage <= w[1].stage {
                if (w[1].stage - w[0].stage).abs() < f64::EPSILON {
                    return w[0].storage;
                }
                let frac = (stage - w[0].stage) / (w[1].stage - w[0].stage);
                return w[0].storage + frac * (w[1].storage - w[0].storage);
            }
        }
        self.points[self.points.len() - 1].storage
    }

    /// Stage at a given storage, piecewise-linear, clamped at the curve's endpoints.
    pub fn stage(&self, storage: f64) -> f64 {
        let min_storage = self.points[0].storage;
        let max_storage = self.points[self.points.len() - 1].storage;
        let storage = storage.clamp(min_storage, max_storage);
        for w in self.points.windows(2) {
            if storage >= w[0].storage && storage <= w[1].storage {
                if (w[1].storage - w[0].storage).abs() < f64::EPSILON {
                    return w[0].stage;
                }
                let frac = (storage - w[0].storage) / (w[1].storage - w[0].storage);
                return w[0].stage + frac * (w[1].stage - w[0].stage);
            }
        }
        self.points[self.points.len() - 1].stage
    }
}

/// Generate a prismatic (rectangular-footprint, sloped-side) pond stage-storage
/// curve via the prismoidal formula, `n` evenly spaced points from `base_stage`
/// to `base_stage + depth`.
pub fn prismatic(
    base_stage: f64,
    depth: f64,
    bottom_length: f64,
    bottom_width: f64,
    side_slope: f64,
    n: usize,
) -> SimResult<StageStorageCurve> {
    if depth <= 0.0 || n < 2 {
        return Err(SimError::invalid_input(
            "depth",
            "depth must be > 0 and n must be >= 2",
        ));
    }
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let h = depth * (i as f64) / ((n - 1) as f64);
        let top_length = bottom_length + 2.0 * side_slope * h;
        let top_width = bottom_width + 2.0 * side_slope * h;
        let bottom_area = bottom_length * bottom_width;
        let top_area = top_length * top_width;
        let mid_area = ((bottom_length + top_length) / 2.0) * ((bottom_width + top_width) / 2.0);
        // Prismoidal formula: V = h/6 * (A_bottom + 4*A_mid + A_top)
        let storage = h / 6.0 * (bottom_area + 4.0 * mid_area + top_area);
        samples.push((base_stage + h, storage));
    }
    // Guarantee strict monotonicity at h=0 by nudging the first storage to 0.
    samples[0].1 = 0.0;
    StageStorageCurve::new(samples)
}

/// Generate a conical (inverted frustum) pond stage-storage curve, `n` evenly
/// spaced points from `base_stage` to `base_stage + depth`.
pub fn conical(
    base_stage: f64,
    depth: f64,
    bottom_radius: f64,
    side_slope: f64,
    n: usize,
) -> SimResult<StageStorageCurve> {
    if depth <= 0.0 || n < 2 {
        return Err(SimError::invalid_input(
            "depth",
            "depth must be > 0 and n must be >= 2",
        ));
    }
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let h = depth * (i as f64) / ((n - 1) as f64);
        let r = bottom_radius + side_slope * h;
        // Frustum volume: V = (pi*h/3) * (R^2 + R*r + r^2), r0 = bottom_radius
        let storage = (PI * h / 3.0) * (r * r + r * bottom_radius + bottom_radius * bottom_radius);
        samples.push((base_stage + h, storage));
    }
    samples[0].1 = 0.0;
    StageStorageCurve::new(samples)
}

/// Generate a cylindrical pond stage-storage curve, `n` evenly spaced points
/// from `base_stage` to `base_stage + depth`.
pub fn cylindrical(base_stage: f64, depth: f64, radius: f64, n: usize) -> SimResult<StageStorageCurve> {
    if depth <= 0.0 || n < 2 {
        return Err(SimError::invalid_input(
            "depth",
            "depth must be > 0 and n must be >= 2",
        ));
    }
    let area = PI * radius * radius;
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let h = depth * (i as f64) / ((n - 1) as f64);
        samples.push((base_stage + h, area * h));
    }
    samples[0].1 = 0.0;
    StageStorageCurve::new(samples)
}
