//! Subcatchment runoff (C5)
//!
//! Composes rainfall, runoff, time of concentration, and the unit hydrograph
//! into a single runoff hydrograph for a land parcel made up of one or more
//! sub-areas and an ordered time-of-concentration flow path.

use crate::error::{SimError, SimResult};
use crate::hydrograph::Hydrograph;
use crate::rainfall::StormType;
use crate::tc::{self, FlowSegment};
use crate::unit_hydrograph;
use serde::{Deserialize, Serialize};

/// Hydrologic soil group, per SCS-NRCS classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HydrologicSoilGroup {
    A,
    B,
    C,
    D,
}

/// A homogeneous land-cover area contributing to a subcatchment's runoff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubArea {
    /// Human-readable description (e.g. "Lawn, good condition")
    pub description: String,
    /// Hydrologic soil group
    #[serde(rename = "soilGroup")]
    pub soil_group: HydrologicSoilGroup,
    /// SCS curve number, must be in (0, 100]
    #[serde(rename = "curveNumber")]
    pub curve_number: f64,
    /// Area, acres, must be > 0
    pub area: f64,
}

/// A subcatchment: one or more sub-areas draining through a time-of-concentration path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcatchment {
    /// Constituent sub-areas, at least one with positive area
    #[serde(rename = "subAreas")]
    pub sub_areas: Vec<SubArea>,
    /// Ordered time-of-concentration flow path segments
    #[serde(rename = "flowSegments", default)]
    pub flow_segments: Vec<FlowSegment>,
    /// Explicit Tc override (hours), bypassing `flow_segments` if set
    #[serde(rename = "tcOverride", skip_serializing_if = "Option::is_none")]
    pub tc_override: Option<f64>,
    /// Explicit composite-CN override, bypassing the area-weighted average if set
    #[serde(rename = "cnOverride", skip_serializing_if = "Option::is_none")]
    pub cn_override: Option<f64>,
}

/// Result of simulating a subcatchment's runoff for one storm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubcatchmentResult {
    /// Area-weighted composite curve number actually used
    #[serde(rename = "compositeCn")]
    pub composite_cn: f64,
    /// Total contributing area, acres
    #[serde(rename = "totalArea")]
    pub total_area: f64,
    /// Time of concentration actually used, hours
    pub tc: f64,
    /// Resulting runoff hydrograph
    pub hydrograph: Hydrograph,
}

impl Subcatchment {
    /// Total area across all sub-areas, acres
    pub fn total_area(&self) -> f64 {
        self.sub_areas.iter().map(|a| a.area).sum()
    }

    /// Area-weighted composite curve number, rounded to the nearest integer,
    /// unless `cn_override` is set.
    pub fn composite_cn(&self) -> SimResult<f64> {
        if let Some(cn) = self.cn_override {
            return Ok(cn);
        }
        let total_area = self.total_area();
        if total_area <= 0.0 {
            return Err(SimError::invalid_project(
                "subcatchment has no sub-areas with positive area",
            ));
        }
        let weighted: f64 = self
            .sub_areas
            .iter()
            .map(|a| a.curve_number * a.area)
            .sum();
        Ok((weighted / total_area).round())
    }

    /// Time of concentration, hours, unless `tc_override` is set.
    pub fn time_of_concentration(&self) -> SimResult<f64> {
        if let Some(tc) = self.tc_override {
            return Ok(tc);
        }
        if self.flow_segments.is_empty() {
            return Err(SimError::invalid_project(
                "subcatchment has neither flow segments nor a time-of-concentration override",
            ));
        }
        tc::time_of_concentration(&self.flow_segments)
    }

    /// Validate structural invariants: at least one positive-area sub-area,
    /// and either flow segments or a Tc override.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();
        if self.sub_areas.is_empty() || self.total_area() <= 0.0 {
            findings.push("subcatchment must have at least one sub-area with positive area".into());
        }
        if self.flow_segments.is_empty() && self.tc_override.is_none() {
            findings.push("subcatchment must have flow segments or a Tc override".into());
        }
        findings
    }
}

/// Simulate a subcatchment's runoff hydrograph for a design storm.
pub fn simulate(
    subcatchment: &Subcatchment,
    storm_type: StormType,
    total_depth: f64,
) -> SimResult<SubcatchmentResult> {
    let composite_cn = subcatchment.composite_cn()?;
    let total_area = subcatchment.total_area();
    let tc = subcatchment.time_of_concentration()?;

    let hydrograph = unit_hydrograph::generate_hydrograph(
        total_area,
        composite_cn,
        tc,
        storm_type,
        total_depth,
        None,
        unit_hydrograph::DEFAULT_LAMBDA,
    )?;

    Ok(SubcatchmentResult {
        composite_cn,
        total_area,
        tc,
        hydrograph,
    })
}
