//! Time of concentration (Chapter 4 hydrology pipeline, step 3)
//!
//! Tc is the sum of travel times for an ordered chain of flow segments: sheet
//! flow, shallow concentrated flow, and open-channel flow, in the order water
//! actually travels them to the subcatchment outlet.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// One leg of a time-of-concentration flow path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FlowSegment {
    /// Thin, even sheet flow over a plane (HEC-22/TR-55 Tt = 0.007(nL)^0.8 / (P2^0.5 s^0.4))
    Sheet {
        /// Flow length (ft), must be <= 300
        length: f64,
        /// Manning's roughness coefficient for the surface
        roughness: f64,
        /// Slope (ft/ft), must be > 0
        slope: f64,
        /// 2-year, 24-hour rainfall depth (inches), must be > 0
        #[serde(rename = "p2")]
        p2: f64,
    },
    /// Shallow concentrated flow, after sheet flow consolidates into rills
    ShallowConcentrated {
        /// Flow length (ft)
        length: f64,
        /// Slope (ft/ft), must be > 0
        slope: f64,
        /// Surface type, sets the velocity coefficient
        surface: SurfaceType,
    },
    /// Flow in a defined open channel
    Channel {
        /// Flow length (ft)
        length: f64,
        /// Manning's roughness coefficient
        roughness: f64,
        /// Slope (ft/ft), must be > 0
        slope: f64,
        /// Flow area (sq ft), must be > 0
        area: f64,
        /// Wetted perimeter (ft), must be > 0
        #[serde(rename = "wettedPerimeter")]
        wetted_perimeter: f64,
    },
}

/// Surface type for shallow concentrated flow velocity coefficients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    /// Paved surface, k = 20.3282
    Paved,
    /// Unpaved surface, k = 16.1345
    Unpaved,
}

impl SurfaceType {
    fn velocity_coefficient(self) -> f64 {
        match self {
            SurfaceType::Paved => 20.3282,
            SurfaceType::Unpaved => 16.1345,
        }
    }
}

impl FlowSegment {
    /// Travel time for this segment, in hours
    pub fn travel_time(&self) -> SimResult<f64> {
        match self {
            FlowSegment::Sheet {
                length,
                roughness,
                slope,
                p2,
            } => sheet_flow_time(*length, *roughness, *slope, *p2),
            FlowSegment::ShallowConcentrated {
                length,
                slope,
                surface,
            } => shallow_concentrated_time(*length, *slope, *surface),
            FlowSegment::Channel {
                length,
                roughness,
                slope,
                area,
                wetted_perimeter,
            } => channel_flow_time(*length, *roughness, *slope, *area, *wetted_perimeter),
        }
    }
}

/// Sheet flow travel time, hours: `Tt = 0.007(nL)^0.8 / (P2^0.5 s^0.4)`
///
/// Rejects `length > 300` ft per the TR-55 limit on sheet flow.
pub fn sheet_flow_time(length: f64, roughness: f64, slope: f64, p2: f64) -> SimResult<f64> {
    if length > 300.0 {
        return Err(SimError::invalid_input(
            "length",
            format!("sheet flow length must be <= 300 ft, got {}", length),
        ));
    }
    if slope <= 0.0 {
        return Err(SimError::invalid_input(
            "slope",
            format!("must be > 0, got {}", slope),
        ));
    }
    if p2 <= 0.0 {
        return Err(SimError::invalid_input(
            "p2",
            format!("must be > 0, got {}", p2),
        ));
    }

    Ok(0.007 * (roughness * length).powf(0.8) / (p2.sqrt() * slope.powf(0.4)))
}

/// Shallow concentrated flow travel time, hours: `V = k s^0.5`, `Tt = L / V / 3600`
pub fn shallow_concentrated_time(length: f64, slope: f64, surface: SurfaceType) -> SimResult<f64> {
    if slope <= 0.0 {
        return Err(SimError::invalid_input(
            "slope",
            format!("must be > 0, got {}", slope),
        ));
    }
    let velocity = surface.velocity_coefficient() * slope.sqrt();
    Ok(length / velocity / 3600.0)
}

/// Open channel flow travel time, hours, via Manning's equation:
/// `R = A/WP`, `V = (1.49/n) R^(2/3) s^0.5`, `Tt = L / V / 3600`
pub fn channel_flow_time(
    length: f64,
    roughness: f64,
    slope: f64,
    area: f64,
    wetted_perimeter: f64,
) -> SimResult<f64> {
    if area <= 0.0 {
        return Err(SimError::invalid_input(
            "area",
            format!("must be > 0, got {}", area),
        ));
    }
    if wetted_perimeter <= 0.0 {
        return Err(SimError::invalid_input(
            "wettedPerimeter",
            format!("must be > 0, got {}", wetted_perimeter),
        ));
    }
    if slope <= 0.0 {
        return Err(SimError::invalid_input(
            "slope",
            format!("must be > 0, got {}", slope),
        ));
    }

    let hydraulic_radius = area / wetted_perimeter;
    let velocity = (1.49 / roughness) * hydraulic_radius.powf(2.0 / 3.0) * slope.sqrt();
    Ok(length / velocity / 3600.0)
}

/// Sum travel times over an ordered chain of flow segments, hours
pub fn time_of_concentration(segments: &[FlowSegment]) -> SimResult<f64> {
    let mut total = 0.0;
    for segment in segments {
        total += segment.travel_time()?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_flow_rejects_long_length() {
        let result = sheet_flow_time(301.0, 0.011, 0.02, 2.5);
        assert!(result.is_err());
    }

    #[test]
    fn test_sheet_flow_travel_time() {
        let tt = sheet_flow_time(100.0, 0.15, 0.01, 3.0).unwrap();
        assert!(tt > 0.0);
    }

    #[test]
    fn test_shallow_concentrated_paved_faster_than_unpaved() {
        let paved = shallow_concentrated_time(500.0, 0.02, SurfaceType::Paved).unwrap();
        let unpaved = shallow_concentrated_time(500.0, 0.02, SurfaceType::Unpaved).unwrap();
        assert!(paved < unpaved);
    }

    #[test]
    fn test_channel_flow_time_positive() {
        let tt = channel_flow_time(1000.0, 0.03, 0.005, 10.0, 12.0).unwrap();
        assert!(tt > 0.0);
    }

    #[test]
    fn test_time_of_concentration_sums_segments() {
        let segments = vec![
            FlowSegment::Sheet {
                length: 100.0,
                roughness: 0.15,
                slope: 0.01,
                p2: 3.0,
            },
            FlowSegment::ShallowConcentrated {
                length: 500.0,
                slope: 0.02,
                surface: SurfaceType::Unpaved,
            },
            FlowSegment::Channel {
                length: 1000.0,
                roughness: 0.03,
                slope: 0.005,
                area: 10.0,
                wetted_perimeter: 12.0,
            },
        ];

        let individual_sum: f64 = segments.iter().map(|s| s.travel_time().unwrap()).sum();
        let tc = time_of_concentration(&segments).unwrap();
        assert!((tc - individual_sum).abs() < 1e-12);
    }

    #[test]
    fn test_empty_segments_yields_zero() {
        assert_eq!(time_of_concentration(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_nonpositive_slope_rejected() {
        assert!(sheet_flow_time(100.0, 0.15, 0.0, 3.0).is_err());
        assert!(shallow_concentrated_time(100.0, -0.01, SurfaceType::Paved).is_err());
        assert!(channel_flow_time(100.0, 0.03, 0.0, 10.0, 12.0).is_err());
    }
}
