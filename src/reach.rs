//! Open-channel reach routing (C9) — kinematic translation
//!
//! A representative flow is translated through a reach by computing the
//! normal-depth velocity via Manning's equation (solved by bisection, the
//! same way this codebase has always solved Manning's equation rather than
//! by a closed form) and lagging the inflow hydrograph by the resulting
//! travel time, rounded to a whole number of samples. No attenuation is
//! modeled beyond this lag quantization.

use crate::error::{SimError, SimResult};
use crate::hydrograph::Hydrograph;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Maximum bisection iterations when solving for normal depth
const MAX_ITERATIONS: usize = 100;
/// Convergence tolerance on flow, cfs
const TOLERANCE: f64 = 0.001;
/// Fraction of peak inflow used as the representative routing flow
const REPRESENTATIVE_FLOW_FRACTION: f64 = 0.7;

/// Cross-sectional geometry of an open channel or culvert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChannelShape {
    /// Rectangular channel of fixed width
    Rectangular {
        /// Bottom width, ft
        width: f64,
    },
    /// Trapezoidal channel with symmetric side slopes
    Trapezoidal {
        /// Bottom width, ft
        bottom_width: f64,
        /// Side slope, horizontal:vertical
        side_slope: f64,
    },
    /// Circular pipe, flowing full or partially full
    Circular {
        /// Pipe diameter, ft
        diameter: f64,
    },
}

impl ChannelShape {
    /// Flow area (sq ft) and wetted perimeter (ft) at a given depth
    fn area_and_perimeter(&self, depth: f64) -> (f64, f64) {
        match self {
            ChannelShape::Rectangular { width } => (width * depth, width + 2.0 * depth),
            ChannelShape::Trapezoidal {
                bottom_width,
                side_slope,
            } => {
                let top_width = bottom_width + 2.0 * side_slope * depth;
                let area = (bottom_width + top_width) / 2.0 * depth;
                let wetted_perimeter = bottom_width + 2.0 * depth * (1.0 + side_slope * side_slope).sqrt();
                (area, wetted_perimeter)
            }
            ChannelShape::Circular { diameter } => {
                let radius = diameter / 2.0;
                if depth >= *diameter {
                    let area = PI * radius * radius;
                    let wetted_perimeter = PI * diameter;
                    return (area, wetted_perimeter);
                }
                // Central angle subtended by the water surface
                let theta = 2.0 * ((radius - depth) / radius).clamp(-1.0, 1.0).acos();
                let area = radius * radius / 2.0 * (theta - theta.sin());
                let wetted_perimeter = radius * theta;
                (area, wetted_perimeter)
            }
        }
    }

    /// Maximum meaningful depth for the bisection search (pipe diameter, or an
    /// arbitrarily generous bound for open shapes)
    fn max_depth(&self) -> f64 {
        match self {
            ChannelShape::Rectangular { .. } | ChannelShape::Trapezoidal { .. } => 1000.0,
            ChannelShape::Circular { diameter } => *diameter,
        }
    }
}

/// Open-channel reach: geometry and hydraulic properties between two nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reach {
    /// Reach length, ft, must be > 0
    pub length: f64,
    /// Manning's roughness coefficient, must be > 0
    #[serde(rename = "manningsN")]
    pub mannings_n: f64,
    /// Longitudinal slope, ft/ft, must be > 0
    pub slope: f64,
    /// Cross-sectional shape
    pub shape: ChannelShape,
}

/// Solve Manning's equation for the flow depth that carries `target_flow`, by
/// bisection over `[0, max_depth]`.
fn normal_depth(shape: &ChannelShape, mannings_n: f64, slope: f64, target_flow: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = shape.max_depth();

    let flow_at = |depth: f64| -> f64 {
        let (area, wetted_perimeter) = shape.area_and_perimeter(depth);
        if area <= 0.0 || wetted_perimeter <= 0.0 {
            return 0.0;
        }
        let hydraulic_radius = area / wetted_perimeter;
        (1.49 / mannings_n) * area * hydraulic_radius.powf(2.0 / 3.0) * slope.sqrt()
    };

    for _ in 0..MAX_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let q_mid = flow_at(mid);
        if (q_mid - target_flow).abs() < TOLERANCE {
            return mid;
        }
        if q_mid < target_flow {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Result of routing a hydrograph through a reach
#[derive(Debug, Clone, PartialEq)]
pub struct ReachRoutingResult {
    /// Translated outflow hydrograph, on the same time grid as the inflow
    pub outflow: Hydrograph,
    /// Peak outflow, cfs (equal to peak inflow; translation only)
    pub peak_outflow: f64,
    /// Time of peak outflow, hours
    pub peak_outflow_time: f64,
    /// Travel time through the reach, hours
    pub travel_time: f64,
}

/// Route an inflow hydrograph through a reach by kinematic translation.
///
/// Computes a representative flow (`0.7 * peak inflow`), solves for the
/// normal-depth velocity at that flow, and lags the hydrograph by
/// `round(travel_time / dt)` samples. Requires at least 2 inflow samples on
/// a uniform timestep.
pub fn route(inflow: &Hydrograph, reach: &Reach) -> SimResult<ReachRoutingResult> {
    if inflow.len() < 2 {
        return Err(SimError::invalid_input(
            "inflow",
            "reach routing requires at least 2 inflow samples",
        ));
    }
    if reach.length <= 0.0 {
        return Err(SimError::invalid_input("length", "must be > 0"));
    }
    if reach.mannings_n <= 0.0 {
        return Err(SimError::invalid_input("manningsN", "must be > 0"));
    }
    if reach.slope <= 0.0 {
        return Err(SimError::invalid_input("slope", "must be > 0"));
    }

    let dt_hours = inflow.points[1].time - inflow.points[0].time;
    let (peak_inflow, peak_inflow_time) = inflow.peak().unwrap_or((0.0, inflow.points[0].time));

    let representative_flow = REPRESENTATIVE_FLOW_FRACTION * peak_inflow;
    let depth = normal_depth(&reach.shape, reach.mannings_n, reach.slope, representative_flow);
    let (area, _) = reach.shape.area_and_perimeter(depth);
    let velocity = if area > 0.0 { representative_flow / area } else { 0.0 };
    let travel_time = if velocity > 0.0 {
        reach.length / velocity / 3600.0
    } else {
        0.0
    };

    let lag_samples = if dt_hours > 0.0 {
        (travel_time / dt_hours).round() as usize
    } else {
        0
    };

    let mut samples = Vec::with_capacity(inflow.len());
    for (i, point) in inflow.points.iter().enumerate() {
        let flow = if i >= lag_samples {
            inflow.points[i - lag_samples].flow
        } else {
            0.0
        };
        samples.push((point.time, flow));
    }
    let outflow = Hydrograph::new(samples);

    Ok(ReachRoutingResult {
        outflow,
        peak_outflow: peak_inflow,
        peak_outflow_time: peak_inflow_time + lag_samples as f64 * dt_hours,
        travel_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangular_inflow(peak: f64, dt: f64, n: usize) -> Hydrograph {
        let peak_idx = n / 2;
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let flow = if i <= peak_idx {
                    peak * (i as f64) / (peak_idx as f64)
                } else {
                    peak * ((n - 1 - i) as f64) / ((n - 1 - peak_idx) as f64)
                };
                (i as f64 * dt, flow)
            })
            .collect();
        Hydrograph::new(points)
    }

    #[test]
    fn test_rectangular_area_perimeter() {
        let shape = ChannelShape::Rectangular { width: 10.0 };
        let (area, wp) = shape.area_and_perimeter(2.0);
        assert_eq!(area, 20.0);
        assert_eq!(wp, 14.0);
    }

    #[test]
    fn test_trapezoidal_area_perimeter() {
        let shape = ChannelShape::Trapezoidal {
            bottom_width: 4.0,
            side_slope: 2.0,
        };
        let (area, wp) = shape.area_and_perimeter(1.0);
        // top width = 4 + 2*2*1 = 8, area = (4+8)/2 * 1 = 6
        assert_eq!(area, 6.0);
        assert!((wp - (4.0 + 2.0 * (5.0_f64).sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_circular_full_flow() {
        let shape = ChannelShape::Circular { diameter: 4.0 };
        let (area, wp) = shape.area_and_perimeter(4.0);
        assert!((area - PI * 4.0).abs() < 1e-9);
        assert!((wp - PI * 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_partial_flow_less_than_full() {
        let shape = ChannelShape::Circular { diameter: 4.0 };
        let (area_partial, _) = shape.area_and_perimeter(2.0);
        let (area_full, _) = shape.area_and_perimeter(4.0);
        assert!(area_partial < area_full);
        assert!(area_partial > 0.0);
    }

    #[test]
    fn test_normal_depth_converges() {
        let shape = ChannelShape::Rectangular { width: 10.0 };
        let depth = normal_depth(&shape, 0.013, 0.01, 50.0);
        let (area, wp) = shape.area_and_perimeter(depth);
        let r = area / wp;
        let q = (1.49 / 0.013) * area * r.powf(2.0 / 3.0) * 0.01_f64.sqrt();
        assert!((q - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_route_preserves_peak_value_and_time_set() {
        let reach = Reach {
            length: 1000.0,
            mannings_n: 0.013,
            slope: 0.005,
            shape: ChannelShape::Trapezoidal {
                bottom_width: 5.0,
                side_slope: 2.0,
            },
        };
        let inflow = triangular_inflow(100.0, 0.1, 50);
        let result = route(&inflow, &reach).unwrap();

        assert_eq!(result.peak_outflow, inflow.peak().unwrap().0);
        // same sample times preserved
        assert_eq!(result.outflow.len(), inflow.len());
        for (a, b) in result.outflow.points.iter().zip(inflow.points.iter()) {
            assert_eq!(a.time, b.time);
        }
        assert!(result.travel_time >= 0.0);
    }

    #[test]
    fn test_route_rejects_short_inflow() {
        let reach = Reach {
            length: 100.0,
            mannings_n: 0.013,
            slope: 0.01,
            shape: ChannelShape::Rectangular { width: 5.0 },
        };
        let inflow = Hydrograph::new([(0.0, 10.0)]);
        assert!(route(&inflow, &reach).is_err());
    }

    #[test]
    fn test_route_rejects_nonpositive_geometry() {
        let inflow = triangular_inflow(10.0, 0.1, 10);
        let bad_length = Reach {
            length: 0.0,
            mannings_n: 0.013,
            slope: 0.01,
            shape: ChannelShape::Rectangular { width: 5.0 },
        };
        assert!(route(&inflow, &bad_length).is_err());

        let bad_slope = Reach {
            length: 100.0,
            mannings_n: 0.013,
            slope: 0.0,
            shape: ChannelShape::Rectangular { width: 5.0 },
        };
        assert!(route(&inflow, &bad_slope).is_err());
    }
}
